//! # cfm-adapter-xml
//!
//! XML rendition parser producing element-tree documents.
//!
//! Only well-formed XML gets through: unbalanced or mismatched tags,
//! multiple roots, and stray text outside the root element are rejected
//! here so the mapper never sees a partial tree.

pub mod parser;

pub use parser::XmlParser;

use thiserror::Error;

/// Errors that can occur when parsing XML
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at line {line}, col {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
