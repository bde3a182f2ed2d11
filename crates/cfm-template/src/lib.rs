//! # cfm-template
//!
//! Content fragment template model, loader, and template cache.
//!
//! A template names the fields a fragment carries and the data type each
//! field is declared with. The field mapper consumes the ordered field
//! list; the workflow step records the template reference on the
//! fragments it creates.

pub mod loader;
pub mod model;
pub mod registry;

pub use loader::TemplateLoader;
pub use model::{FieldDescriptor, FieldType, FragmentTemplate};
pub use registry::TemplateRegistry;

use thiserror::Error;

/// Errors that can occur when working with templates
#[derive(Error, Debug)]
pub enum Error {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    #[error("Invalid template '{template}': {message}")]
    Validation { template: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            template: template.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
