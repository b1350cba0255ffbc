//! Borrowed row and column views into a [`Matrix`].
//!
//! A view is a matrix reference plus an index. Shared views (`Row`,
//! `Column`) read cells in place; mutable views (`RowMut`, `ColumnMut`)
//! write through to the parent. Either kind can be materialized into an
//! independent [`Vector`] with `vec()` or a single-row/column [`Matrix`]
//! with `mat()`.

use crate::linalg::matrix::Matrix;
use crate::linalg::scalar::Scalar;
use crate::linalg::vector::{dot_slices, Vector};
use crate::utils::errors::{ensure, LinalgError, LinalgResult};

/// A shared view of one matrix row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a, F> {
    matrix: &'a Matrix<F>,
    index: usize,
}

impl<'a, F: Scalar> Row<'a, F> {
    pub(crate) fn new(matrix: &'a Matrix<F>, index: usize) -> Self {
        Self { matrix, index }
    }

    /// Index of the row in its matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.matrix.cols()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the cell in column `col`.
    pub fn get(&self, col: usize) -> LinalgResult<F> {
        self.matrix.get(self.index, col)
    }

    /// The row's cells as a slice.
    pub fn as_slice(&self) -> &'a [F] {
        self.matrix.row_slice(self.index)
    }

    /// Iterate over the row's cells.
    pub fn iter(&self) -> std::slice::Iter<'a, F> {
        self.as_slice().iter()
    }

    /// Dot product with a vector of the same length.
    pub fn dot(&self, other: &Vector<F>) -> LinalgResult<F> {
        dot_slices(self.as_slice(), other.as_slice(), "row dot product")
    }

    /// Check if every cell in the row is zero.
    pub fn is_zero(&self) -> bool {
        self.iter().all(|c| c.is_zero())
    }

    /// Copy the row into a vector.
    pub fn vec(&self) -> Vector<F> {
        Vector::from_slice(self.as_slice())
    }

    /// Copy the row into a `1 × n` matrix.
    pub fn mat(&self) -> Matrix<F> {
        Matrix::from_row(&self.vec())
    }
}

/// A shared view of one matrix column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a, F> {
    matrix: &'a Matrix<F>,
    index: usize,
}

impl<'a, F: Scalar> Column<'a, F> {
    pub(crate) fn new(matrix: &'a Matrix<F>, index: usize) -> Self {
        Self { matrix, index }
    }

    /// Index of the column in its matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    /// Check if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the cell in row `row`.
    pub fn get(&self, row: usize) -> LinalgResult<F> {
        self.matrix.get(row, self.index)
    }

    /// Iterate over the column's cells, top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = F> + 'a {
        let matrix = self.matrix;
        let col = self.index;
        (0..matrix.rows()).map(move |i| matrix.cell(i, col))
    }

    /// Dot product with a vector of the same length.
    pub fn dot(&self, other: &Vector<F>) -> LinalgResult<F> {
        ensure(
            || self.len() == other.len(),
            || LinalgError::mismatch("column dot product", self.len(), other.len()),
        )?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(F::zero(), |acc, (a, &b)| acc + a * b))
    }

    /// Check if every cell in the column is zero.
    pub fn is_zero(&self) -> bool {
        self.iter().all(|c| c.is_zero())
    }

    /// Copy the column into a vector.
    pub fn vec(&self) -> Vector<F> {
        self.iter().collect()
    }

    /// Copy the column into an `n × 1` matrix.
    pub fn mat(&self) -> Matrix<F> {
        Matrix::from_column(&self.vec())
    }
}

/// A mutable view of one matrix row.
#[derive(Debug)]
pub struct RowMut<'a, F> {
    matrix: &'a mut Matrix<F>,
    index: usize,
}

impl<'a, F: Scalar> RowMut<'a, F> {
    pub(crate) fn new(matrix: &'a mut Matrix<F>, index: usize) -> Self {
        Self { matrix, index }
    }

    /// Reborrow as a shared view.
    pub fn as_row(&self) -> Row<'_, F> {
        Row::new(&*self.matrix, self.index)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.matrix.cols()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the cell in column `col`.
    pub fn get(&self, col: usize) -> LinalgResult<F> {
        self.matrix.get(self.index, col)
    }

    /// Overwrite the cell in column `col`.
    pub fn set(&mut self, col: usize, value: F) -> LinalgResult<()> {
        self.matrix.set(self.index, col, value)
    }

    /// Overwrite the whole row with `values`, which must match its length.
    pub fn assign(&mut self, values: &Vector<F>) -> LinalgResult<()> {
        ensure(
            || self.len() == values.len(),
            || LinalgError::mismatch("row assignment", self.len(), values.len()),
        )?;
        self.matrix
            .row_slice_mut(self.index)
            .copy_from_slice(values.as_slice());
        Ok(())
    }

    /// Copy the row into a vector.
    pub fn vec(&self) -> Vector<F> {
        self.as_row().vec()
    }

    /// Copy the row into a `1 × n` matrix.
    pub fn mat(&self) -> Matrix<F> {
        self.as_row().mat()
    }
}

/// A mutable view of one matrix column.
#[derive(Debug)]
pub struct ColumnMut<'a, F> {
    matrix: &'a mut Matrix<F>,
    index: usize,
}

impl<'a, F: Scalar> ColumnMut<'a, F> {
    pub(crate) fn new(matrix: &'a mut Matrix<F>, index: usize) -> Self {
        Self { matrix, index }
    }

    /// Reborrow as a shared view.
    pub fn as_column(&self) -> Column<'_, F> {
        Column::new(&*self.matrix, self.index)
    }

    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    /// Check if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the cell in row `row`.
    pub fn get(&self, row: usize) -> LinalgResult<F> {
        self.matrix.get(row, self.index)
    }

    /// Overwrite the cell in row `row`.
    pub fn set(&mut self, row: usize, value: F) -> LinalgResult<()> {
        self.matrix.set(row, self.index, value)
    }

    /// Overwrite the whole column with `values`, which must match its length.
    pub fn assign(&mut self, values: &Vector<F>) -> LinalgResult<()> {
        ensure(
            || self.len() == values.len(),
            || LinalgError::mismatch("column assignment", self.len(), values.len()),
        )?;
        for (i, &value) in values.iter().enumerate() {
            *self.matrix.cell_mut(i, self.index) = value;
        }
        Ok(())
    }

    /// Copy the column into a vector.
    pub fn vec(&self) -> Vector<F> {
        self.as_column().vec()
    }

    /// Copy the column into an `n × 1` matrix.
    pub fn mat(&self) -> Matrix<F> {
        self.as_column().mat()
    }
}
