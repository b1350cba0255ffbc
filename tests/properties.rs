//! Property tests for the arithmetic kernel and the projection engine.

use polyproj::prelude::*;
use proptest::prelude::*;

/// Small coefficients keep repeated elimination within `i64` range.
fn coefficient() -> impl Strategy<Value = i64> {
    -5i64..=5
}

fn vector(len: usize) -> impl Strategy<Value = Vector<i64>> {
    prop::collection::vec(coefficient(), len).prop_map(Vector::from)
}

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<i64>> {
    prop::collection::vec(coefficient(), rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
}

fn polyhedron(max_rows: usize, dims: usize) -> impl Strategy<Value = Polyhedron<i64>> {
    (1..=max_rows).prop_flat_map(move |rows| {
        (matrix(rows, dims), vector(rows))
            .prop_map(|(a, b)| Polyhedron::new(a, b).unwrap())
    })
}

/// A polyhedron together with a point it contains: `b = Ax + slack`.
fn feasible(max_rows: usize, dims: usize) -> impl Strategy<Value = (Polyhedron<i64>, Vector<i64>)> {
    (1..=max_rows).prop_flat_map(move |rows| {
        (
            matrix(rows, dims),
            vector(dims),
            prop::collection::vec(0i64..=5, rows),
        )
            .prop_map(|(a, x, slack)| {
                let b = a.mul_vec(&x).unwrap().add(&Vector::from(slack)).unwrap();
                (Polyhedron::new(a, b).unwrap(), x)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_vector_addition_is_componentwise(
        (u, v) in (1usize..6).prop_flat_map(|n| (vector(n), vector(n)))
    ) {
        let sum = u.add(&v).unwrap();
        for i in 0..u.len() {
            prop_assert_eq!(sum[i], u[i] + v[i]);
        }
        prop_assert_eq!(sum, v.add(&u).unwrap());
    }

    #[test]
    fn prop_dot_is_symmetric(
        (u, v) in (0usize..6).prop_flat_map(|n| (vector(n), vector(n)))
    ) {
        prop_assert_eq!(u.dot(&v).unwrap(), v.dot(&u).unwrap());
    }

    #[test]
    fn prop_additive_inverse(u in (0usize..6).prop_flat_map(vector)) {
        prop_assert!(u.add(&-&u).unwrap().is_zero());
    }

    #[test]
    fn prop_multiplication_is_associative(
        (a, b, c) in (1usize..4, 1usize..4, 1usize..4, 1usize..4)
            .prop_flat_map(|(m, n, p, q)| (matrix(m, n), matrix(n, p), matrix(p, q)))
    ) {
        let left = a.mul(&b).unwrap().mul(&c).unwrap();
        let right = a.mul(&b.mul(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_transpose_is_involution(a in (1usize..5, 1usize..5).prop_flat_map(|(r, c)| matrix(r, c))) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn prop_mul_vec_matches_row_dots(
        (a, v) in (1usize..5, 1usize..5).prop_flat_map(|(r, c)| (matrix(r, c), vector(c)))
    ) {
        let product = a.mul_vec(&v).unwrap();
        for (i, row) in a.iter_rows().enumerate() {
            prop_assert_eq!(product[i], row.dot(&v).unwrap());
        }
    }

    #[test]
    fn prop_projection_shape_and_orthogonality(
        (p, u) in (1usize..4).prop_flat_map(|n| (polyhedron(6, n), vector(n)))
    ) {
        let partition = p.partition(&u).unwrap();
        let q = p.project(&u).unwrap();
        prop_assert_eq!(q.constraints(), partition.output_rows());
        prop_assert_eq!(q.dimensions(), p.dimensions());
        for row in q.a().iter_rows().skip(partition.zero.len()) {
            prop_assert_eq!(row.dot(&u).unwrap(), 0);
        }
    }

    #[test]
    fn prop_full_collapse_leaves_zero_matrix(p in (1usize..4).prop_flat_map(|n| polyhedron(4, n))) {
        let axes: Vec<usize> = (0..p.dimensions()).collect();
        prop_assert!(p.eliminate(&axes).unwrap().a().is_zero());
    }

    #[test]
    fn prop_projection_contains_shadow(
        ((p, x), axis, t) in (1usize..4)
            .prop_flat_map(|n| (feasible(5, n), 0..n, -5i64..=5))
    ) {
        // Any point of P stays in the projection when moved along the axis.
        prop_assert!(p.contains(&x).unwrap());
        let q = p.collapse_dimension(axis).unwrap();
        let mut moved = x.clone();
        moved[axis] = x[axis] + t;
        prop_assert!(q.contains(&moved).unwrap());
    }

    #[test]
    fn prop_systems_with_a_point_are_not_empty(
        (p, _) in (1usize..4).prop_flat_map(|n| feasible(5, n))
    ) {
        prop_assert!(!p.is_empty());
    }

    #[test]
    fn prop_check_emptiness_agrees(p in (1usize..4).prop_flat_map(|n| polyhedron(5, n))) {
        prop_assert_eq!(p.check_emptiness(&EliminationConfig::new()).unwrap(), p.is_empty());
    }
}
