//! Metadata for tracking source positions
#![allow(clippy::must_use_candidate)] // Constructor helpers are clear at call sites without #[must_use].
#![allow(clippy::return_self_not_must_use)] // Fluent setters are designed for chaining.

use serde::{Deserialize, Serialize};

/// Source position information for error reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed, in characters)
    pub column: usize,

    /// Byte offset from start of input
    pub offset: usize,
}

/// Information about the source of the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source file path or identifier
    pub source: String,

    /// Position within the source
    pub position: Position,

    /// Additional context (e.g., rendition name)
    pub context: Option<String>,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Compute the line and column of a byte offset within `input`
    ///
    /// Offsets past the end clamp to the end of input.
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut end = offset.min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        let consumed = &input[..end];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |idx| idx + 1);
        let column = consumed[line_start..].chars().count() + 1;

        Self::new(line, column, end)
    }
}

impl SourceInfo {
    /// Create new source info
    pub fn new(source: impl Into<String>, position: Position) -> Self {
        Self {
            source: source.into(),
            position,
            context: None,
        }
    }

    /// Add context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        assert_eq!(Position::locate("<a>x</a>", 3), Position::new(1, 4, 3));
    }

    #[test]
    fn test_locate_after_newlines() {
        let input = "<a>\n  <b>\n</a>";
        assert_eq!(Position::locate(input, 6), Position::new(2, 3, 6));
    }

    #[test]
    fn test_locate_clamps_past_end() {
        assert_eq!(Position::locate("ab", 10), Position::new(1, 3, 2));
    }

    #[test]
    fn test_locate_counts_characters_not_bytes() {
        // "é" is two bytes
        assert_eq!(Position::locate("é<", 2).column, 2);
    }

    #[test]
    fn test_source_info_context() {
        let info = SourceInfo::new("/content/dam/sofa.xml", Position::default())
            .with_context("rendition original");
        assert_eq!(info.context.as_deref(), Some("rendition original"));
        assert_eq!(info.position.line, 0);
    }
}
