//! Utility modules shared across the crate.
//!
//! This module contains:
//! - Error types
//! - Source location tracking
//! - Polyhedron printing

pub mod errors;
pub mod location;
pub mod poly_print;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, Span};
pub use poly_print::{format_inequality, print_polyhedron, PolyPrinter};
