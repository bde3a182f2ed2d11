//! Store implementations
//!
//! `memory` backs tests and embedding; `fs` backs the command line.

pub mod fs;
#[cfg(feature = "memory")]
pub mod memory;
