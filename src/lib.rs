//! # polyproj - Polyhedral projection by Fourier-Motzkin elimination
//!
//! Decide whether a system of linear inequalities `Ax <= b` has a solution
//! and project its solution set along arbitrary directions:
//! - Dense vectors and matrices over a generic scalar field
//! - Borrowed row and column views
//! - Projection along a direction or a coordinate axis
//! - An emptiness test built on eliminating every axis
//! - A line-oriented text format with a batch driver
//!
//! ## Architecture
//!
//! ```text
//! Text → Frontend → Polyhedron → Projection / Emptiness → Printer → Output
//! ```
//!
//! ## Example
//!
//! ```rust
//! use polyproj::prelude::*;
//!
//! let p: Polyhedron<i64> = parse_polyhedron("-1x1 <= 0\n-1x2 <= 0\n1x1 + 1x2 <= 4\n")?;
//! assert!(!p.is_empty());
//!
//! let shadow = p.collapse_dimension(0)?;
//! assert_eq!(shadow.to_string(), "-1x2 <= 0\n1x2 <= 4");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod linalg;
pub mod polyhedral;
pub mod frontend;
pub mod driver;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::driver::{run_batch, BatchConfig, BatchSummary, OutputFormat};
    pub use crate::frontend::{parse_inequality, parse_polyhedron, parse_vector, read_polyhedron};
    pub use crate::linalg::{CheckedArith, Column, ColumnMut, Matrix, Row, RowMut, Scalar, Vector};
    pub use crate::polyhedral::{EliminationConfig, Partition, Polyhedron};
    pub use crate::utils::errors::*;
    pub use crate::utils::poly_print::PolyPrinter;
}

use crate::linalg::Scalar;
use crate::polyhedral::{EliminationConfig, Polyhedron};
use crate::utils::errors::PolyResult;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a system and test it for emptiness.
pub fn is_empty<F: Scalar>(source: &str) -> PolyResult<bool> {
    frontend::parse_polyhedron::<F>(source)?.check_emptiness(&EliminationConfig::new())
}

/// Parse a system and eliminate the given zero-based axes in order.
pub fn eliminate<F: Scalar>(source: &str, axes: &[usize]) -> PolyResult<Polyhedron<F>> {
    let p = frontend::parse_polyhedron::<F>(source)?;
    Ok(p.eliminate(axes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_convenience_functions() {
        assert!(is_empty::<i64>("1x1 <= -1\n-1x1 <= 0\n").unwrap());
        assert!(!is_empty::<f64>("0.5x1 <= 1\n").unwrap());
        assert!(is_empty::<i64>("4000000000x1 <= 1\n-4000000000x1 <= 1\n").is_err());

        let p = eliminate::<i64>("-1x1 <= 0\n-1x2 <= 0\n1x1 + 1x2 <= 4\n", &[1]).unwrap();
        assert_eq!(p.to_string(), "-1x1 <= 0\n1x1 <= 4");
    }

    #[cfg(not(feature = "unchecked"))]
    #[test]
    fn test_eliminate_rejects_missing_axis() {
        assert!(eliminate::<i64>("1x1 <= 0\n", &[3]).is_err());
    }
}
