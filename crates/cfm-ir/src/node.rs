//! Node types for the element tree
#![allow(clippy::must_use_candidate)] // Accessors read clearly at call sites without #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent builder methods return Self for chaining.

use crate::traversal::Descendants;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An element in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Element tag name, as written in the source (including any prefix)
    pub name: String,

    /// First text value carried directly by the element
    pub value: Option<Value>,

    /// Child elements in document order
    pub children: Vec<Node>,

    /// Element attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

/// Values that can be carried by nodes or produced by the mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Integer(i64),

    /// Decimal value
    Decimal(f64),

    /// String value
    String(String),
}

impl Node {
    /// Create a new element without a value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Create an element with a value
    pub fn with_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::new(name)
        }
    }

    /// Create an element carrying a text value
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_value(name, Value::String(text.into()))
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Builder form of [`Node::add_child`]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Find a direct child by name
    pub fn find_child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Find all direct children by name
    pub fn find_children(&self, name: &str) -> Vec<&Node> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// Iterate over all descendants (not including `self`) in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }

    /// First descendant in document order whose tag name equals `name`
    pub fn find_first(&self, name: &str) -> Option<&Node> {
        self.descendants().find(|n| n.name == name)
    }

    /// The element's text content, if it has a non-empty one
    pub fn text(&self) -> Option<String> {
        self.value
            .as_ref()
            .map(Value::as_string)
            .filter(|text| !text.is_empty())
    }

    /// Whether the element carries any text content
    pub fn has_text(&self) -> bool {
        self.text().is_some()
    }
}

impl Value {
    /// Convert value to its string form
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
        }
    }

    /// Borrow the value as a string slice if it is textual
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if any
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Decimal payload, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
        }
    }
}
