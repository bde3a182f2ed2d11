//! Cursor and iterator APIs for navigating the element tree

use crate::node::Node;
use crate::Error;
use crate::Result;

/// A cursor for navigating the tree
pub struct Cursor<'a> {
    /// Current node
    node: &'a Node,

    /// Path to current node (for error reporting)
    path: Vec<String>,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given node
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            path: vec![node.name.clone()],
        }
    }

    /// Get the current node
    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Get the current path
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Navigate to a child node by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if no direct child carries `name`.
    pub fn child(&self, name: &str) -> Result<Cursor<'a>> {
        match self.node.find_child(name) {
            Some(child) => {
                let mut new_path = self.path.clone();
                new_path.push(name.to_string());
                Ok(Cursor {
                    node: child,
                    path: new_path,
                })
            }
            None => Err(Error::node_not_found(format!(
                "{}/{}",
                self.path.join("/"),
                name
            ))),
        }
    }

    /// Navigate using a relative path (e.g., "pricing/price" or "variant[1]/color")
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for malformed index segments and
    /// [`Error::NodeNotFound`] when a segment does not resolve.
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        let mut current_node = self.node;
        let mut current_path = self.path.clone();

        for segment in path.split('/') {
            if segment.is_empty() {
                continue;
            }

            // Handle indexing like "variant[0]"
            if let Some(open_bracket) = segment.find('[') {
                let name = &segment[..open_bracket];
                let close_bracket = segment
                    .find(']')
                    .filter(|close| *close > open_bracket)
                    .ok_or_else(|| Error::invalid_path(path, format!("unclosed bracket in '{segment}'")))?;
                let index: usize = segment[open_bracket + 1..close_bracket]
                    .parse()
                    .map_err(|_| Error::invalid_path(path, format!("invalid index in '{segment}'")))?;

                current_node = current_node
                    .children
                    .iter()
                    .filter(|c| c.name == name)
                    .nth(index)
                    .ok_or_else(|| {
                        Error::node_not_found(format!("{}/{}", current_path.join("/"), segment))
                    })?;
                current_path.push(format!("{name}[{index}]"));
            } else {
                current_node = current_node.find_child(segment).ok_or_else(|| {
                    Error::node_not_found(format!("{}/{}", current_path.join("/"), segment))
                })?;
                current_path.push(segment.to_string());
            }
        }

        Ok(Cursor {
            node: current_node,
            path: current_path,
        })
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(node: &'a Node) -> Self {
        Self {
            stack: node.children.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn catalog() -> Node {
        Node::new("catalog")
            .child(
                Node::new("product")
                    .child(Node::with_text("sku", "A1"))
                    .child(Node::new("variant").child(Node::with_text("color", "Red")))
                    .child(Node::new("variant").child(Node::with_text("color", "Blue"))),
            )
            .child(Node::with_text("sku", "B2"))
    }

    #[test]
    fn test_cursor_creation() {
        let root = Node::new("ROOT");
        let cursor = Cursor::new(&root);

        assert_eq!(cursor.node().name, "ROOT");
        assert_eq!(cursor.path(), &["ROOT"]);
    }

    #[test]
    fn test_cursor_child() {
        let root = catalog();
        let cursor = Cursor::new(&root);
        let product = cursor.child("product").unwrap();

        assert_eq!(product.node().name, "product");
        assert_eq!(product.path(), &["catalog", "product"]);
    }

    #[test]
    fn test_cursor_child_not_found() {
        let root = catalog();
        let err = Cursor::new(&root).child("missing").err().unwrap();
        assert_eq!(err, Error::node_not_found("catalog/missing"));
    }

    #[test]
    fn test_navigate_with_index() {
        let root = catalog();
        let color = Cursor::new(&root).navigate("product/variant[1]/color").unwrap();

        assert_eq!(color.node().text().as_deref(), Some("Blue"));
        assert_eq!(color.path(), &["catalog", "product", "variant[1]", "color"]);
    }

    #[test]
    fn test_navigate_ignores_empty_segments() {
        let root = catalog();
        let sku = Cursor::new(&root).navigate("/product//sku").unwrap();
        assert_eq!(sku.node().text().as_deref(), Some("A1"));
    }

    #[test]
    fn test_navigate_invalid_index() {
        let root = catalog();
        let cursor = Cursor::new(&root);

        assert!(matches!(
            cursor.navigate("product/variant[x]"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("product/variant[0"),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            cursor.navigate("product/variant[5]"),
            Err(Error::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_descendants_preorder() {
        let root = catalog();
        let names: Vec<&str> = root.descendants().map(|n| n.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["product", "sku", "variant", "color", "variant", "color", "sku"]
        );
    }
}
