//! Source location tracking for error reporting.
//!
//! Input is line oriented, so a span never crosses a line boundary.

use std::fmt;
use serde::Serialize;

/// A position in the input (line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open column range on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed)
    pub line: usize,
    /// First column covered (1-indexed)
    pub start_column: usize,
    /// Column one past the last one covered
    pub end_column: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            line,
            start_column,
            end_column,
        }
    }

    /// Get the start location.
    pub fn start(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.start_column)
    }

}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start_column, self.end_column)
    }
}
