//! # cfm-mapping
//!
//! Field mapping from parsed documents onto typed fragment template fields.
//!
//! [`FieldMapper`] walks the template's fields in order, looks up the
//! matching element in the document, and coerces its text to the field's
//! declared type. Fields without source data are skipped; text that does
//! not parse as the declared numeric type fails the pass.

pub mod coercion;
pub mod mapper;
pub mod mapping;
pub mod naming;
pub mod policies;

pub use coercion::coerce;
pub use mapper::{FieldMapper, MappingReport, RejectedField};
pub use mapping::FieldValueMapping;
pub use naming::humanize;
pub use policies::CoercionPolicy;

use thiserror::Error;

/// Errors that can occur during mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Cannot coerce '{value}' to {expected} for field '{field}': {reason}")]
    TypeCoercion {
        field: String,
        expected: String,
        value: String,
        reason: String,
    },

    #[error("Cannot derive a label from an empty identifier")]
    EmptyIdentifier,
}

impl Error {
    pub(crate) fn type_coercion(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            field: field.into(),
            expected: expected.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
