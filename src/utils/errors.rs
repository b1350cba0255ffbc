//! Error types for the projection toolkit.
//!
//! This module defines all error types used throughout the crate,
//! organized by the layer that produces them.

use thiserror::Error;
use crate::utils::location::SourceLocation;
use std::fmt;

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum PolyError {
    /// Contract violation in the linear algebra core
    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    /// Syntax error in a textual system or vector
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Elimination produced more rows than the configured ceiling
    #[error("Row limit exceeded: eliminating axis {axis} would produce {rows} rows (limit {limit})")]
    RowLimitExceeded {
        /// The axis being collapsed when the limit tripped
        axis: usize,
        /// Row count of the system the step would have produced
        rows: usize,
        /// The configured ceiling
        limit: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolyError {
    /// Input location of a parse error.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Parse(e) => Some(e.location),
            _ => None,
        }
    }
}

/// Contract violation raised by `Vector`, `Matrix` and `Polyhedron`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand sizes are incompatible
    #[error("dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The operation that rejected its operands
        operation: &'static str,
        /// The size the operation required
        expected: usize,
        /// The size it was given
        found: usize,
    },

    /// An index exceeds the extent of the addressed axis
    #[error("{target} index {index} out of bounds (extent {extent})")]
    IndexOutOfBounds {
        /// What was indexed ("vector", "matrix row", ...)
        target: &'static str,
        /// The offending index
        index: usize,
        /// The valid extent
        extent: usize,
    },

    /// An intermediate value does not fit the scalar type
    #[error("arithmetic overflow in {operation}")]
    Overflow {
        /// The operation whose arithmetic overflowed
        operation: &'static str,
    },
}

impl LinalgError {
    /// Build a `DimensionMismatch` error.
    pub fn mismatch(operation: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { operation, expected, found }
    }

    /// Build an `IndexOutOfBounds` error.
    pub fn out_of_bounds(target: &'static str, index: usize, extent: usize) -> Self {
        Self::IndexOutOfBounds { target, index, extent }
    }

    /// Build an `Overflow` error.
    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    /// Check if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }

    /// Check if this is an out-of-bounds access.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }

    /// Check if this is an arithmetic overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

/// Validate a contract, producing the error lazily.
///
/// With the `unchecked` feature enabled neither closure runs and the
/// contract is assumed to hold.
#[cfg(not(feature = "unchecked"))]
#[inline]
pub(crate) fn ensure(
    holds: impl FnOnce() -> bool,
    error: impl FnOnce() -> LinalgError,
) -> LinalgResult<()> {
    if holds() {
        Ok(())
    } else {
        Err(error())
    }
}

#[cfg(feature = "unchecked")]
#[inline(always)]
pub(crate) fn ensure(
    _holds: impl FnOnce() -> bool,
    _error: impl FnOnce() -> LinalgError,
) -> LinalgResult<()> {
    Ok(())
}

/// Error during parsing of inequalities or vectors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in the input
    pub location: SourceLocation,
    /// The kind of parse error
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, location: SourceLocation, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            location,
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.location)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Character that cannot start any token
    UnexpectedChar,
    /// Token that does not fit the grammar here
    UnexpectedToken,
    /// Literal rejected by the scalar type
    InvalidScalar,
    /// Variable index missing, zero or too large
    InvalidVariable,
    /// Missing `<=`
    ExpectedRelation,
    /// Line ended too early
    UnexpectedEol,
}

/// Result type for the linear algebra core.
pub type LinalgResult<T> = Result<T, LinalgError>;

/// Result type for the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type using PolyError.
pub type PolyResult<T> = Result<T, PolyError>;
