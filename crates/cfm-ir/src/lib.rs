#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # cfm-ir
//!
//! Element tree representation and navigation APIs for parsed source documents.
//!
//! Adapters (XML today) turn raw renditions into a [`Document`]; the field
//! mapper only ever reads this tree, so it never depends on a concrete
//! parser.

/// Document container and document-level metadata.
pub mod document;
/// Source positions used when reporting parse failures.
pub mod metadata;
/// Element nodes and typed values.
pub mod node;
/// Cursor navigation and document-order search.
pub mod traversal;

/// Primary document type.
pub use document::{Document, DocumentMetadata};
/// Position and source metadata.
pub use metadata::{Position, SourceInfo};
/// Node primitives for tree structure and value typing.
pub use node::{Node, Value};
/// Navigation entry points.
pub use traversal::{Cursor, Descendants};

use thiserror::Error;

/// Errors that can occur when navigating a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node not found at path: {path}")]
    NodeNotFound { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl Error {
    /// Build a node-not-found error with path context.
    pub fn node_not_found(path: impl Into<String>) -> Self {
        Self::NodeNotFound { path: path.into() }
    }

    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;
