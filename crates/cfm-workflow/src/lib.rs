#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # cfm-workflow
//!
//! XML-to-content-fragment workflow step, its configuration, and the
//! asset and fragment stores it runs against.
//!
//! The step resolves a workflow payload to an asset, picks the asset's
//! first XML rendition, parses it, maps it onto the configured template's
//! fields and commits a new content fragment next to the asset.

pub mod asset;
pub mod config;
pub mod fragment;
pub mod payload;
pub mod process;
pub mod stores;

pub use asset::{Asset, AssetStore, Rendition};
pub use config::ProcessingConfig;
pub use fragment::{ContentFragment, FragmentStore};
pub use payload::{PayloadType, WorkItem};
pub use process::{ProcessOutcome, ProcessReport, SkipReason, XmlProcessingStep};
#[cfg(feature = "memory")]
pub use stores::memory::{InMemoryAssetStore, InMemoryFragmentStore};
pub use stores::fs::{FsAssetStore, FsFragmentStore};

use thiserror::Error;

/// Errors raised by asset and fragment stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Resource already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },

    #[error("Serialization error for '{path}': {message}")]
    Serialization { path: String, message: String },
}

impl StoreError {
    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        error: &std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: error.to_string(),
        }
    }
}

/// Errors that can occur while running the workflow step
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] cfm_template::Error),

    #[error("XML error: {0}")]
    Xml(#[from] cfm_adapter_xml::Error),

    #[error("Mapping error: {0}")]
    Mapping(#[from] cfm_mapping::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
