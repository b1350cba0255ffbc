//! Emptiness test by full elimination.
//!
//! Collapsing every axis leaves a system `0·x <= d`, which is satisfiable
//! exactly when no `d[i]` is negative. A bound of zero is feasible.

use crate::linalg::Scalar;
use crate::polyhedral::polyhedron::Polyhedron;
use crate::polyhedral::projection::Partition;
use crate::utils::errors::{PolyError, PolyResult};
use log::{debug, warn};

/// Configuration for elimination runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EliminationConfig {
    /// Largest intermediate system allowed, in rows (`None` for no limit)
    pub max_rows: Option<usize>,
}

impl EliminationConfig {
    /// Create a configuration with no row limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop elimination once a step would produce more than `limit` rows.
    pub fn with_max_rows(mut self, limit: usize) -> Self {
        self.max_rows = Some(limit);
        self
    }
}

impl<F: Scalar> Polyhedron<F> {
    /// Check if the polyhedron contains no point.
    ///
    /// Collapses axes `0..n` in order and inspects the remaining bounds.
    /// With no dimensions the bounds are inspected directly.
    ///
    /// # Panics
    ///
    /// Panics if an intermediate coefficient overflows `F`. Use
    /// [`Polyhedron::check_emptiness`] to get the overflow as an error.
    pub fn is_empty(&self) -> bool {
        match self.check_emptiness(&EliminationConfig::new()) {
            Ok(empty) => empty,
            Err(e) => panic!("emptiness test failed: {}", e),
        }
    }

    /// Like [`Polyhedron::is_empty`], but gives up with
    /// [`PolyError::RowLimitExceeded`] when an intermediate system would
    /// outgrow `config.max_rows`, and with an overflow error when a combined
    /// coefficient does not fit `F`.
    pub fn check_emptiness(&self, config: &EliminationConfig) -> PolyResult<bool> {
        let mut reduced = self.clone();
        for axis in 0..self.dimensions() {
            let products = reduced.axis_products(axis);
            let partition = Partition::from_products(&products);
            let rows = partition.output_rows();
            if let Some(limit) = config.max_rows {
                if rows > limit {
                    warn!(
                        "eliminating axis {} would produce {} rows, over the limit of {}",
                        axis, rows, limit
                    );
                    return Err(PolyError::RowLimitExceeded { axis, rows, limit });
                }
            }
            reduced = reduced.combine(&products, &partition).map_err(|e| {
                warn!("eliminating axis {} failed: {}", axis, e);
                e
            })?;
        }
        debug_assert!(reduced.a.is_zero());
        let empty = reduced.has_negative_bound();
        debug!(
            "emptiness check on {} x {} system: {}",
            self.constraints(),
            self.dimensions(),
            if empty { "empty" } else { "feasible" }
        );
        Ok(empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{Matrix, Vector};
    use num_rational::Rational64;

    #[test]
    fn test_one_sided_system_is_feasible() {
        let p = Polyhedron::from_rows(vec![vec![1, 2], vec![3, 2]], vec![1, 1]).unwrap();
        assert!(!p.is_empty());
        assert!(p.contains(&Vector::from(vec![-1, 0])).unwrap());
    }

    #[test]
    fn test_bounded_polygon_is_feasible() {
        let p = Polyhedron::from_rows(
            vec![
                vec![1, 2],
                vec![3, 2],
                vec![5, 1],
                vec![0, 1],
                vec![-3, -1],
                vec![-1, 0],
                vec![0, -1],
            ],
            vec![5, 10, 15, 2, -2, 0, 0],
        )
        .unwrap();
        assert!(!p.is_empty());
        assert!(p.contains(&Vector::from(vec![1, 1])).unwrap());
    }

    #[test]
    fn test_contradictory_bounds_are_empty() {
        // x <= -1 and x >= 0
        let p = Polyhedron::from_rows(vec![vec![1], vec![-1]], vec![-1, 0]).unwrap();
        assert!(p.is_empty());

        // x >= 0, y >= 0, x + y <= -1
        let p = Polyhedron::from_rows(vec![vec![-1, 0], vec![0, -1], vec![1, 1]], vec![0, 0, -1])
            .unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_zero_bound_is_feasible() {
        // x <= 0 and x >= 0 pins x to the origin
        let p = Polyhedron::from_rows(vec![vec![1], vec![-1]], vec![0, 0]).unwrap();
        assert!(!p.is_empty());
    }

    #[test]
    fn test_no_dimensions() {
        assert!(!Polyhedron::<i64>::universe(0).is_empty());

        let p = Polyhedron::new(Matrix::<i64>::zeros(2, 0), Vector::from(vec![0, 3])).unwrap();
        assert!(!p.is_empty());

        let p = Polyhedron::new(Matrix::<i64>::zeros(2, 0), Vector::from(vec![1, -1])).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn test_rational_scalars() {
        let r = |n, d| Rational64::new(n, d);
        // x <= 1/2 and -2x <= -3/2 (x >= 3/4)
        let p = Polyhedron::from_rows(
            vec![vec![r(1, 1)], vec![r(-2, 1)]],
            vec![r(1, 2), r(-3, 2)],
        )
        .unwrap();
        assert!(p.is_empty());

        // x <= 1/2 and -2x <= -1/2 (x >= 1/4)
        let p = Polyhedron::from_rows(
            vec![vec![r(1, 1)], vec![r(-2, 1)]],
            vec![r(1, 2), r(-1, 2)],
        )
        .unwrap();
        assert!(!p.is_empty());
    }

    #[test]
    fn test_floating_scalars() {
        let p = Polyhedron::from_rows(
            vec![vec![0.5, 1.0], vec![-1.0, 0.0], vec![0.0, -1.0]],
            vec![1.0, 0.0, 0.0],
        )
        .unwrap();
        assert!(!p.is_empty());
    }

    #[test]
    fn test_check_emptiness_agrees_without_limit() {
        let p = Polyhedron::from_rows(vec![vec![-1, 0], vec![0, -1], vec![1, 1]], vec![0, 0, -1])
            .unwrap();
        assert!(p.check_emptiness(&EliminationConfig::new()).unwrap());
        assert!(p
            .check_emptiness(&EliminationConfig::new().with_max_rows(2))
            .unwrap());
    }

    #[test]
    fn test_row_limit() {
        let p = Polyhedron::from_rows(
            vec![vec![1, 1], vec![1, -1], vec![-1, 1], vec![-1, -1]],
            vec![1, 1, 1, 1],
        )
        .unwrap();
        let err = p
            .check_emptiness(&EliminationConfig::new().with_max_rows(3))
            .unwrap_err();
        assert!(matches!(
            err,
            PolyError::RowLimitExceeded { axis: 0, rows: 4, limit: 3 }
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let p = Polyhedron::from_rows(
            vec![vec![4_000_000_000_i64], vec![-4_000_000_000_i64]],
            vec![1, 1],
        )
        .unwrap();
        let err = p.check_emptiness(&EliminationConfig::new()).unwrap_err();
        assert!(matches!(err, PolyError::Linalg(ref e) if e.is_overflow()));
    }

    #[test]
    #[should_panic(expected = "arithmetic overflow")]
    fn test_is_empty_panics_on_overflow() {
        let p = Polyhedron::from_rows(
            vec![vec![4_000_000_000_i64], vec![-4_000_000_000_i64]],
            vec![1, 1],
        )
        .unwrap();
        p.is_empty();
    }
}
