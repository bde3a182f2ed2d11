//! Document representation for the element tree
#![allow(clippy::must_use_candidate)] // Builder/constructor API intentionally omits pervasive #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for ergonomics.

use crate::metadata::SourceInfo;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// A parsed source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Root element of the document
    pub root: Node,

    /// Document-level metadata
    pub metadata: DocumentMetadata,
}

/// Metadata associated with a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source information (file, rendition, etc.)
    pub source: Option<SourceInfo>,

    /// Declared markup version (e.g. the XML declaration's `version`)
    pub version: Option<String>,

    /// Declared character encoding
    pub encoding: Option<String>,

    /// Parse timestamp
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Document {
    /// Create a new document with the given root node
    pub fn new(root: Node) -> Self {
        Self {
            root,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Create a new document with metadata
    pub fn with_metadata(root: Node, metadata: DocumentMetadata) -> Self {
        Self { root, metadata }
    }

    /// Set the source information
    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.metadata.source = Some(source);
        self
    }

    /// Name of the root element
    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// First element below the root whose tag name equals `name`
    pub fn find_first(&self, name: &str) -> Option<&Node> {
        self.root.find_first(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Position, SourceInfo};

    #[test]
    fn test_document_creation() {
        let doc = Document::new(Node::new("product"));

        assert_eq!(doc.root_name(), "product");
        assert!(doc.metadata.source.is_none());
        assert!(doc.metadata.created_at.is_none());
    }

    #[test]
    fn test_document_with_metadata() {
        let metadata = DocumentMetadata {
            source: Some(SourceInfo::new("sofa.xml", Position::new(1, 1, 0))),
            version: Some("1.0".to_string()),
            encoding: Some("UTF-8".to_string()),
            created_at: Some(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH),
        };

        let doc = Document::with_metadata(Node::new("product"), metadata);

        assert_eq!(doc.metadata.version.as_deref(), Some("1.0"));
        assert_eq!(doc.metadata.encoding.as_deref(), Some("UTF-8"));
        assert_eq!(doc.metadata.source.as_ref().unwrap().source, "sofa.xml");
        assert_eq!(doc.metadata.created_at, Some(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH));
    }

    #[test]
    fn test_document_find_first() {
        let root = Node::new("product").child(Node::with_text("color", "Red"));
        let doc = Document::new(root).with_source(SourceInfo::new("mem", Position::default()));

        assert_eq!(doc.find_first("color").unwrap().text().as_deref(), Some("Red"));
        assert!(doc.find_first("size").is_none());
        assert!(doc.metadata.source.is_some());
    }
}
