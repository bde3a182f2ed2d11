//! Field mapper
//!
//! Maps the elements of a parsed document onto an ordered list of typed
//! template fields.

use cfm_ir::{Cursor, Document, Node};
use cfm_template::FieldDescriptor;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::coercion::coerce;
use crate::mapping::FieldValueMapping;
use crate::policies::CoercionPolicy;

/// Stateless mapper from documents to field value mappings
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper {
    policy: CoercionPolicy,
}

/// Outcome of a mapping pass, including the fields that produced no entry
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingReport {
    pub mapping: FieldValueMapping,
    /// Fields with no matching element or no text
    pub skipped: Vec<String>,
    /// Fields whose text failed coercion (lenient policy only)
    pub rejected: Vec<RejectedField>,
}

/// A field left out because its text could not be coerced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedField {
    pub field: String,
    pub expected: String,
    pub value: String,
    pub reason: String,
}

impl FieldMapper {
    /// Create a strict mapper
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper applying `policy` in [`FieldMapper::map_with_report`]
    #[must_use]
    pub fn with_policy(policy: CoercionPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    /// Map `document` onto `fields`
    ///
    /// Always strict: the first coercion failure aborts the pass and no
    /// partial mapping is returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TypeCoercion`] when an element's text does
    /// not parse as its field's numeric type.
    pub fn map(&self, document: &Document, fields: &[FieldDescriptor]) -> crate::Result<FieldValueMapping> {
        let mut mapping = FieldValueMapping::new();

        for field in fields {
            let Some(text) = source_text(document, field) else {
                debug!("No text for field '{}', skipping", field.name);
                continue;
            };

            let value = coerce(field, &text)?;
            trace!("Set field '{}' to {} value {}", field.name, value.type_name(), value);
            mapping.insert(field.name.clone(), value);
        }

        Ok(mapping)
    }

    /// Map `document` onto `fields` under the mapper's coercion policy
    ///
    /// # Errors
    ///
    /// Under [`CoercionPolicy::Strict`], returns the first coercion error.
    /// Under [`CoercionPolicy::Lenient`] this never fails.
    pub fn map_with_report(&self, document: &Document, fields: &[FieldDescriptor]) -> crate::Result<MappingReport> {
        let mut report = MappingReport::default();

        for field in fields {
            let Some(text) = source_text(document, field) else {
                debug!("No text for field '{}', skipping", field.name);
                report.skipped.push(field.name.clone());
                continue;
            };

            match coerce(field, &text) {
                Ok(value) => {
                    trace!("Set field '{}' to {} value {}", field.name, value.type_name(), value);
                    report.mapping.insert(field.name.clone(), value);
                }
                Err(crate::Error::TypeCoercion {
                    field,
                    expected,
                    value,
                    reason,
                }) if !self.policy.is_strict() => {
                    warn!("Rejected field '{}': '{}' is not a valid {} ({})", field, value, expected, reason);
                    report.rejected.push(RejectedField {
                        field,
                        expected,
                        value,
                        reason,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }
}

impl MappingReport {
    /// Whether every field was either mapped or skipped
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Locate the element backing `field` and return its first text value
fn source_text(document: &Document, field: &FieldDescriptor) -> Option<String> {
    source_node(document, field).and_then(Node::text)
}

fn source_node<'a>(document: &'a Document, field: &FieldDescriptor) -> Option<&'a Node> {
    match &field.source_path {
        Some(path) => match Cursor::new(&document.root).navigate(path) {
            Ok(cursor) => Some(cursor.node()),
            Err(error) => {
                debug!("Source path for field '{}' did not resolve: {}", field.name, error);
                None
            }
        },
        None => document.find_first(&field.name),
    }
}
