//! Dense fixed-length vectors.

use crate::linalg::scalar::Scalar;
use crate::utils::errors::{ensure, LinalgError, LinalgResult};
use serde::Serialize;
use std::fmt;
use std::ops::{Index, IndexMut, Mul, Neg};

/// A dense vector over the scalar type `F`.
///
/// The length is fixed at construction. Arithmetic never mutates its
/// operands; only explicit indexed assignment does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Vector<F> {
    coords: Vec<F>,
}

impl<F: Scalar> Vector<F> {
    /// Create a zero vector of the given size.
    pub fn zeros(size: usize) -> Self {
        Self {
            coords: vec![F::zero(); size],
        }
    }

    /// Create a vector with every coordinate set to `value`.
    pub fn filled(size: usize, value: F) -> Self {
        Self {
            coords: vec![value; size],
        }
    }

    /// Create a vector by copying a slice.
    pub fn from_slice(coords: &[F]) -> Self {
        Self {
            coords: coords.to_vec(),
        }
    }

    /// The standard basis vector `e_index` of dimension `size`.
    pub fn basis(size: usize, index: usize) -> LinalgResult<Self> {
        ensure(|| index < size, || LinalgError::out_of_bounds("basis vector", index, size))?;
        let mut e = Self::zeros(size);
        e.coords[index] = F::one();
        Ok(e)
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if the vector has no coordinates.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Read a coordinate.
    pub fn get(&self, index: usize) -> LinalgResult<F> {
        ensure(|| index < self.len(), || LinalgError::out_of_bounds("vector", index, self.len()))?;
        Ok(self.coords[index])
    }

    /// Get a mutable reference to a coordinate.
    pub fn get_mut(&mut self, index: usize) -> LinalgResult<&mut F> {
        let len = self.len();
        ensure(|| index < len, || LinalgError::out_of_bounds("vector", index, len))?;
        Ok(&mut self.coords[index])
    }

    /// Overwrite a coordinate.
    pub fn set(&mut self, index: usize, value: F) -> LinalgResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Vector addition.
    pub fn add(&self, other: &Self) -> LinalgResult<Self> {
        self.zip_with(other, "vector addition", |a, b| a + b)
    }

    /// Vector subtraction.
    pub fn sub(&self, other: &Self) -> LinalgResult<Self> {
        self.zip_with(other, "vector subtraction", |a, b| a - b)
    }

    /// Multiply every coordinate by a scalar.
    pub fn scale(&self, scalar: F) -> Self {
        self.coords.iter().map(|&c| c * scalar).collect()
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> LinalgResult<F> {
        dot_slices(&self.coords, &other.coords, "dot product")
    }

    /// Check if every coordinate is zero.
    pub fn is_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_zero())
    }

    /// Iterate over the coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.coords.iter()
    }

    /// View the coordinates as a slice.
    pub fn as_slice(&self) -> &[F] {
        &self.coords
    }

    /// Consume the vector and return its coordinates.
    pub fn into_inner(self) -> Vec<F> {
        self.coords
    }

    fn zip_with(
        &self,
        other: &Self,
        operation: &'static str,
        op: impl Fn(F, F) -> F,
    ) -> LinalgResult<Self> {
        ensure(
            || self.len() == other.len(),
            || LinalgError::mismatch(operation, self.len(), other.len()),
        )?;
        Ok(self
            .coords
            .iter()
            .zip(&other.coords)
            .map(|(&a, &b)| op(a, b))
            .collect())
    }
}

/// Dot product of two equally sized slices.
pub(crate) fn dot_slices<F: Scalar>(
    lhs: &[F],
    rhs: &[F],
    operation: &'static str,
) -> LinalgResult<F> {
    ensure(
        || lhs.len() == rhs.len(),
        || LinalgError::mismatch(operation, lhs.len(), rhs.len()),
    )?;
    Ok(lhs
        .iter()
        .zip(rhs)
        .fold(F::zero(), |acc, (&a, &b)| acc + a * b))
}

impl<F> From<Vec<F>> for Vector<F> {
    fn from(coords: Vec<F>) -> Self {
        Self { coords }
    }
}

impl<F> FromIterator<F> for Vector<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl<F> Index<usize> for Vector<F> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.coords[index]
    }
}

impl<F> IndexMut<usize> for Vector<F> {
    fn index_mut(&mut self, index: usize) -> &mut F {
        &mut self.coords[index]
    }
}

impl<F: Scalar> Neg for &Vector<F> {
    type Output = Vector<F>;

    fn neg(self) -> Vector<F> {
        self.coords.iter().map(|&c| -c).collect()
    }
}

impl<F: Scalar> Neg for Vector<F> {
    type Output = Vector<F>;

    fn neg(self) -> Vector<F> {
        -&self
    }
}

impl<F: Scalar> Mul<F> for &Vector<F> {
    type Output = Vector<F>;

    fn mul(self, scalar: F) -> Vector<F> {
        self.scale(scalar)
    }
}

impl<F: Scalar> Mul<F> for Vector<F> {
    type Output = Vector<F>;

    fn mul(self, scalar: F) -> Vector<F> {
        self.scale(scalar)
    }
}

impl<F: fmt::Display> fmt::Display for Vector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for c in &self.coords {
            write!(f, " {}", c)?;
        }
        write!(f, " ]")
    }
}
