//! Dense linear algebra over a generic scalar field.
//!
//! This module provides the arithmetic kernel the polyhedral layer is
//! built on:
//! - The `Scalar` capability trait
//! - Fixed-length vectors
//! - Fixed-shape row-major matrices
//! - Borrowed row and column views
//!
//! Every binary operation validates operand shapes and every indexed access
//! validates its index, reporting a [`crate::utils::errors::LinalgError`].
//! Building with the `unchecked` feature turns those checks off.

pub mod scalar;
pub mod vector;
pub mod matrix;
pub mod view;

pub use scalar::{CheckedArith, Scalar};
pub use vector::Vector;
pub use matrix::Matrix;
pub use view::{Column, ColumnMut, Row, RowMut};
