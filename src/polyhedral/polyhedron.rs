//! Polyhedra in H-representation.
//!
//! A polyhedron `P(A, b)` is the set `{ x : Ax <= b }`. Row `i` of `A`
//! together with `b[i]` is the half-space `A[i]·x <= b[i]`.

use crate::linalg::{Matrix, Row, Scalar, Vector};
use crate::utils::errors::{ensure, LinalgError, LinalgResult};
use serde::Serialize;

/// A polyhedron `{ x : Ax <= b }` over the scalar type `F`.
///
/// Immutable once built: projection and elimination return new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(bound(serialize = "F: Scalar + Serialize"))]
pub struct Polyhedron<F> {
    #[serde(rename = "A")]
    pub(crate) a: Matrix<F>,
    pub(crate) b: Vector<F>,
}

impl<F: Scalar> Polyhedron<F> {
    /// Create `P(A, b)`. `A` must have one row per entry of `b`.
    pub fn new(a: Matrix<F>, b: Vector<F>) -> LinalgResult<Self> {
        ensure(
            || a.rows() == b.len(),
            || LinalgError::mismatch("polyhedron construction", a.rows(), b.len()),
        )?;
        Ok(Self { a, b })
    }

    /// Create `P(A, b)` from coefficient rows and bounds.
    pub fn from_rows(rows: Vec<Vec<F>>, bounds: Vec<F>) -> LinalgResult<Self> {
        Self::new(Matrix::from_rows(rows)?, Vector::from(bounds))
    }

    /// The whole space of the given dimension (no constraints).
    pub fn universe(dimensions: usize) -> Self {
        Self {
            a: Matrix::zeros(0, dimensions),
            b: Vector::zeros(0),
        }
    }

    /// The coefficient matrix `A`.
    pub fn a(&self) -> &Matrix<F> {
        &self.a
    }

    /// The bound vector `b`.
    pub fn b(&self) -> &Vector<F> {
        &self.b
    }

    /// Number of dimensions of the ambient space.
    pub fn dimensions(&self) -> usize {
        self.a.cols()
    }

    /// Number of inequalities.
    pub fn constraints(&self) -> usize {
        self.a.rows()
    }

    /// The inequality in row `index` as `(coefficients, bound)`.
    pub fn inequality(&self, index: usize) -> LinalgResult<(Row<'_, F>, F)> {
        Ok((self.a.row(index)?, self.b.get(index)?))
    }

    /// Split into `(A, b)`.
    pub fn into_parts(self) -> (Matrix<F>, Vector<F>) {
        (self.a, self.b)
    }

    /// Check if `point` satisfies every inequality.
    pub fn contains(&self, point: &Vector<F>) -> LinalgResult<bool> {
        ensure(
            || point.len() == self.dimensions(),
            || LinalgError::mismatch("point membership", self.dimensions(), point.len()),
        )?;
        let lhs = self.a.mul_vec(point)?;
        Ok(lhs.iter().zip(self.b.iter()).all(|(l, r)| l <= r))
    }

    /// Check if some bound is negative.
    ///
    /// Once every axis has been eliminated each row reads `0 <= d[i]`, so
    /// this decides feasibility of the original system.
    pub(crate) fn has_negative_bound(&self) -> bool {
        self.b.iter().any(|d| d.is_negative_value())
    }
}
