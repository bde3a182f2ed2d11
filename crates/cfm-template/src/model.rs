//! Template model definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A content fragment template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentTemplate {
    /// Reference the template was loaded from (path or registry key)
    #[serde(default)]
    pub reference: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

/// A named, typed field of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Relative element path overriding the tag-name lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

/// Declared data type of a field
///
/// Unrecognized tags are kept as `Other` and handled as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    FloatingPoint,
    Integer,
    #[default]
    Text,
    Other(String),
}

impl FieldType {
    /// Resolve a type tag, case-insensitively
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "double" | "float" | "decimal" | "number" => FieldType::FloatingPoint,
            "long" | "integer" | "int" => FieldType::Integer,
            "string" | "text" => FieldType::Text,
            _ => FieldType::Other(tag.to_string()),
        }
    }

    /// Canonical tag for the type
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            FieldType::FloatingPoint => "double",
            FieldType::Integer => "long",
            FieldType::Text => "string",
            FieldType::Other(tag) => tag,
        }
    }

    /// Whether values of this type are parsed from text
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::FloatingPoint | FieldType::Integer)
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from_tag(&tag)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.tag().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            source_path: None,
        }
    }

    /// Shorthand for a floating-point field
    pub fn floating_point(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::FloatingPoint)
    }

    /// Shorthand for an integer field
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Shorthand for a text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

impl FragmentTemplate {
    /// Create a new template
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            reference: String::new(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Find a field by name
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}
