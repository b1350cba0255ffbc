//! Projection by Fourier-Motzkin elimination.
//!
//! Projecting `P(A, b)` along a direction `u` splits the rows of `A` by the
//! sign of `A[i]·u`:
//!
//! ```text
//! N = { i : A[i]·u < 0 }    Z = { i : A[i]·u = 0 }    P = { i : A[i]·u > 0 }
//! ```
//!
//! Rows in `Z` survive unchanged. Every pair `(s, t)` in `N × P` is combined
//! with the non-negative multipliers `pp = A[t]·u` and `-np = -A[s]·u`:
//!
//! ```text
//! (pp·A[s] - np·A[t])·x <= pp·b[s] - np·b[t]
//! ```
//!
//! which has zero component along `u`. The result has `|Z| + |N|·|P|` rows,
//! `Z` rows first in their original order, then the pairs with `N` as the
//! outer loop.
//!
//! Combined coefficients are formed with checked arithmetic; a value that
//! does not fit the scalar type fails the step with
//! [`LinalgError::Overflow`] instead of wrapping.
//!
//! Row counts can grow multiplicatively with every step, so eliminating
//! many dimensions from many constraints is doubly exponential in the worst
//! case. That is inherent to the method.

use crate::linalg::{CheckedArith, Matrix, Scalar, Vector};
use crate::polyhedral::polyhedron::Polyhedron;
use crate::utils::errors::{ensure, LinalgError, LinalgResult};
use log::{debug, trace};

/// Row indices of a polyhedron split by the sign of their product with a
/// projection direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Rows with a negative component along the direction
    pub negative: Vec<usize>,
    /// Rows orthogonal to the direction
    pub zero: Vec<usize>,
    /// Rows with a positive component along the direction
    pub positive: Vec<usize>,
}

impl Partition {
    /// Split row indices by the sign of the matching product.
    pub fn from_products<F: Scalar>(products: &[F]) -> Self {
        let mut partition = Self {
            negative: Vec::with_capacity(products.len()),
            zero: Vec::with_capacity(products.len()),
            positive: Vec::with_capacity(products.len()),
        };
        for (i, p) in products.iter().enumerate() {
            if p.is_negative_value() {
                partition.negative.push(i);
            } else if p.is_positive_value() {
                partition.positive.push(i);
            } else {
                partition.zero.push(i);
            }
        }
        partition
    }

    /// Number of rows the projection will have: `|Z| + |N|·|P|`.
    pub fn output_rows(&self) -> usize {
        self.zero.len() + self.negative.len() * self.positive.len()
    }
}

impl<F: Scalar> Polyhedron<F> {
    /// Partition the rows by the sign of `A[i]·direction`.
    pub fn partition(&self, direction: &Vector<F>) -> LinalgResult<Partition> {
        let products = self.direction_products(direction)?;
        Ok(Partition::from_products(&products))
    }

    /// Project along `direction`.
    ///
    /// Returns `P(D, d)` such that, for any half-space `H`, the projection
    /// of this polyhedron along `direction` onto `H` is `P(D, d) ∩ H`. The
    /// result has the same number of dimensions.
    pub fn project(&self, direction: &Vector<F>) -> LinalgResult<Self> {
        let products = self.direction_products(direction)?;
        let partition = Partition::from_products(&products);
        self.combine(&products, &partition)
    }

    /// Eliminate coordinate `coord`: projection along the basis vector
    /// `e_coord`.
    ///
    /// Fails with a dimension mismatch when the axis does not exist; the
    /// reported `found` is the dimension the axis would require.
    pub fn collapse_dimension(&self, coord: usize) -> LinalgResult<Self> {
        ensure(
            || coord < self.dimensions(),
            || LinalgError::mismatch("dimension collapse", self.dimensions(), coord + 1),
        )?;
        self.collapse_axis(coord)
    }

    /// Collapse each coordinate of `coords` in order.
    pub fn eliminate(&self, coords: &[usize]) -> LinalgResult<Self> {
        let mut projection = self.clone();
        for &coord in coords {
            projection = projection.collapse_dimension(coord)?;
        }
        Ok(projection)
    }

    /// Collapse an axis already known to be in range.
    ///
    /// `A[i]·e_axis` is just column `axis`, so no dot products are formed.
    pub(crate) fn collapse_axis(&self, axis: usize) -> LinalgResult<Self> {
        let products = self.axis_products(axis);
        let partition = Partition::from_products(&products);
        self.combine(&products, &partition)
    }

    pub(crate) fn axis_products(&self, axis: usize) -> Vec<F> {
        (0..self.a.rows()).map(|i| self.a.cell(i, axis)).collect()
    }

    fn direction_products(&self, direction: &Vector<F>) -> LinalgResult<Vec<F>> {
        ensure(
            || direction.len() == self.dimensions(),
            || LinalgError::mismatch("polyhedron projection", self.dimensions(), direction.len()),
        )?;
        self.a
            .iter_rows()
            .map(|row| {
                row.iter()
                    .zip(direction.iter())
                    .try_fold(F::zero(), |acc, (&a, &u)| a.mul_checked(u)?.add_checked(acc))
                    .ok_or_else(|| LinalgError::overflow("polyhedron projection"))
            })
            .collect()
    }

    /// One elimination step given the per-row products and their partition.
    pub(crate) fn combine(&self, products: &[F], partition: &Partition) -> LinalgResult<Self> {
        let cols = self.dimensions();
        let rows = partition.output_rows();
        debug!(
            "projecting {} rows: |N| = {}, |Z| = {}, |P| = {} -> {} rows",
            self.constraints(),
            partition.negative.len(),
            partition.zero.len(),
            partition.positive.len(),
            rows
        );

        let overflow = || LinalgError::overflow("polyhedron projection");
        let mut data = Vec::with_capacity(rows * cols);
        let mut bounds = Vec::with_capacity(rows);

        for &z in &partition.zero {
            data.extend_from_slice(self.a.row_slice(z));
            bounds.push(self.b[z]);
        }

        for &s in &partition.negative {
            let np = products[s];
            let row_s = self.a.row_slice(s);
            for &t in &partition.positive {
                let pp = products[t];
                let row_t = self.a.row_slice(t);
                trace!("combining rows {} and {} (products {} and {})", s, t, np, pp);
                for (&a_s, &a_t) in row_s.iter().zip(row_t) {
                    data.push(F::cross_checked(pp, a_s, np, a_t).ok_or_else(overflow)?);
                }
                bounds.push(F::cross_checked(pp, self.b[s], np, self.b[t]).ok_or_else(overflow)?);
            }
        }

        Ok(Self {
            a: Matrix::from_raw_parts(rows, cols, data),
            b: Vector::from(bounds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polyhedron<i64> {
        // x >= 0, y >= 0, x + y <= 4
        Polyhedron::from_rows(vec![vec![-1, 0], vec![0, -1], vec![1, 1]], vec![0, 0, 4]).unwrap()
    }

    #[test]
    fn test_partition() {
        let p = triangle();
        let part = p.partition(&Vector::from(vec![1, 0])).unwrap();
        assert_eq!(part.negative, vec![0]);
        assert_eq!(part.zero, vec![1]);
        assert_eq!(part.positive, vec![2]);
        assert_eq!(part.output_rows(), 2);
    }

    #[test]
    fn test_project_rows_and_order() {
        let p = triangle();
        let q = p.project(&Vector::from(vec![1, 0])).unwrap();
        assert_eq!(q.dimensions(), 2);
        // zero rows first, then the single N x P combination:
        // 1·(-x) - (-1)·(x + y) = y <= 1·0 - (-1)·4 = 4
        assert_eq!(
            q,
            Polyhedron::from_rows(vec![vec![0, -1], vec![0, 1]], vec![0, 4]).unwrap()
        );
    }

    #[test]
    fn test_combined_rows_are_orthogonal() {
        let p = Polyhedron::from_rows(
            vec![vec![2, -1, 3], vec![-1, 4, 0], vec![-3, 1, 1], vec![5, 0, -2]],
            vec![1, 2, 3, 4],
        )
        .unwrap();
        let u = Vector::from(vec![1, 2, -1]);
        let part = p.partition(&u).unwrap();
        let q = p.project(&u).unwrap();
        assert_eq!(q.constraints(), part.output_rows());
        for row in q.a().iter_rows().skip(part.zero.len()) {
            assert_eq!(row.dot(&u).unwrap(), 0);
        }
    }

    #[test]
    fn test_collapse_matches_basis_projection() {
        let p = triangle();
        for axis in 0..2 {
            let e = Vector::basis(2, axis).unwrap();
            assert_eq!(p.collapse_dimension(axis).unwrap(), p.project(&e).unwrap());
        }
    }

    #[test]
    fn test_collapse_zeroes_column() {
        let q = triangle().collapse_dimension(1).unwrap();
        assert!(q.a().column(1).unwrap().is_zero());
    }

    #[test]
    fn test_one_sided_direction_drops_rows() {
        // both rows grow along x: nothing bounds x from below
        let p = Polyhedron::from_rows(vec![vec![1, 2], vec![3, 2]], vec![1, 1]).unwrap();
        let q = p.collapse_dimension(0).unwrap();
        assert_eq!(q.constraints(), 0);
        assert_eq!(q.dimensions(), 2);
    }

    #[test]
    fn test_eliminate_sequence() {
        let p = triangle();
        let q = p.eliminate(&[0, 1]).unwrap();
        assert!(q.a().is_zero());
        assert_eq!(q, p.collapse_dimension(0).unwrap().collapse_dimension(1).unwrap());
    }

    #[cfg(not(feature = "unchecked"))]
    #[test]
    fn test_projection_errors() {
        let p = triangle();
        assert_eq!(
            p.project(&Vector::from(vec![1, 0, 0])),
            Err(LinalgError::mismatch("polyhedron projection", 2, 3))
        );
        assert_eq!(
            p.collapse_dimension(2),
            Err(LinalgError::mismatch("dimension collapse", 2, 3))
        );
        assert!(p.eliminate(&[0, 5]).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        // 4e9 · 4e9 does not fit in i64
        let p = Polyhedron::from_rows(
            vec![vec![4_000_000_000], vec![-4_000_000_000]],
            vec![1, 1],
        )
        .unwrap();
        assert_eq!(
            p.collapse_dimension(0),
            Err(LinalgError::overflow("polyhedron projection"))
        );

        let big = Vector::from(vec![4_000_000_000i64]);
        assert!(p.project(&big).unwrap_err().is_overflow());
    }

    #[test]
    fn test_rational_overflow_is_reported() {
        use num_rational::Rational64;

        let r = Rational64::from_integer;
        let p = Polyhedron::from_rows(
            vec![vec![r(4_000_000_000)], vec![r(-4_000_000_000)]],
            vec![r(1), r(1)],
        )
        .unwrap();
        assert!(p.collapse_dimension(0).unwrap_err().is_overflow());
    }

    #[test]
    fn test_floats_do_not_overflow() {
        let p = Polyhedron::from_rows(vec![vec![4e9], vec![-4e9]], vec![1.0, 1.0]).unwrap();
        let q = p.collapse_dimension(0).unwrap();
        assert_eq!(q.constraints(), 1);
        assert_eq!(q.b()[0], 8e9);
    }
}
