//! Dense row-major matrices.
//!
//! Whole rows and columns are reached through the borrowed views in
//! [`crate::linalg::view`], so a view can never outlive or observe a
//! reshaped parent.

use crate::linalg::scalar::Scalar;
use crate::linalg::vector::Vector;
use crate::linalg::view::{Column, ColumnMut, Row, RowMut};
use crate::utils::errors::{ensure, LinalgError, LinalgResult};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

/// A dense matrix over the scalar type `F`.
///
/// The shape is fixed at construction and the backing buffer always holds
/// exactly `rows * cols` cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix<F> {
    data: Vec<F>,
    rows: usize,
    cols: usize,
}

impl<F: Scalar> Matrix<F> {
    /// Create a new matrix with the given dimensions, initialized to zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![F::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<F>) -> LinalgResult<Self> {
        if data.len() != rows * cols {
            return Err(LinalgError::mismatch("matrix construction", rows * cols, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// Wrap a buffer whose length is already known to be `rows * cols`.
    pub(crate) fn from_raw_parts(rows: usize, cols: usize, data: Vec<F>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Create a matrix from a list of rows, which must all have equal length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> LinalgResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(LinalgError::mismatch("matrix construction", n_cols, row.len()));
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Create an `n × 1` matrix whose single column is `vec`.
    pub fn from_column(vec: &Vector<F>) -> Self {
        Self {
            data: vec.as_slice().to_vec(),
            rows: vec.len(),
            cols: 1,
        }
    }

    /// Create a `1 × n` matrix whose single row is `vec`.
    pub fn from_row(vec: &Vector<F>) -> Self {
        Self {
            data: vec.as_slice().to_vec(),
            rows: 1,
            cols: vec.len(),
        }
    }

    /// Create an identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut mat = Self::zeros(n, n);
        for i in 0..n {
            mat.data[i * n + i] = F::one();
        }
        mat
    }

    /// Get the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get an element.
    pub fn get(&self, row: usize, col: usize) -> LinalgResult<F> {
        self.check_cell(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Get a mutable reference to an element.
    pub fn get_mut(&mut self, row: usize, col: usize) -> LinalgResult<&mut F> {
        self.check_cell(row, col)?;
        let cols = self.cols;
        Ok(&mut self.data[row * cols + col])
    }

    /// Set an element.
    pub fn set(&mut self, row: usize, col: usize, value: F) -> LinalgResult<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Borrow a row.
    pub fn row(&self, row: usize) -> LinalgResult<Row<'_, F>> {
        self.check_row(row)?;
        Ok(Row::new(self, row))
    }

    /// Mutably borrow a row.
    pub fn row_mut(&mut self, row: usize) -> LinalgResult<RowMut<'_, F>> {
        self.check_row(row)?;
        Ok(RowMut::new(self, row))
    }

    /// Borrow a column.
    pub fn column(&self, col: usize) -> LinalgResult<Column<'_, F>> {
        self.check_column(col)?;
        Ok(Column::new(self, col))
    }

    /// Mutably borrow a column.
    pub fn column_mut(&mut self, col: usize) -> LinalgResult<ColumnMut<'_, F>> {
        self.check_column(col)?;
        Ok(ColumnMut::new(self, col))
    }

    /// Iterate over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_, F>> + '_ {
        (0..self.rows).map(move |i| Row::new(self, i))
    }

    /// Matrix addition.
    pub fn add(&self, other: &Self) -> LinalgResult<Self> {
        ensure(
            || self.rows == other.rows,
            || LinalgError::mismatch("matrix addition", self.rows, other.rows),
        )?;
        ensure(
            || self.cols == other.cols,
            || LinalgError::mismatch("matrix addition", self.cols, other.cols),
        )?;
        Ok(Self {
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| a + b).collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Multiply every cell by a scalar.
    pub fn scale(&self, scalar: F) -> Self {
        Self {
            data: self.data.iter().map(|&c| c * scalar).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Matrix multiplication.
    ///
    /// Cell `(i, j)` is the dot product of row `i` of `self` with column
    /// `j` of `other`.
    pub fn mul(&self, other: &Self) -> LinalgResult<Self> {
        ensure(
            || self.cols == other.rows,
            || LinalgError::mismatch("matrix multiplication", self.cols, other.rows),
        )?;
        let columns: Vec<Vector<F>> = other.iter_columns().map(|c| c.vec()).collect();
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for row in self.iter_rows() {
            for column in &columns {
                data.push(row.dot(column)?);
            }
        }
        Ok(Self {
            data,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// The vector is treated as a single-column matrix and the product is
    /// flattened back into a vector.
    pub fn mul_vec(&self, vec: &Vector<F>) -> LinalgResult<Vector<F>> {
        ensure(
            || self.cols == vec.len(),
            || LinalgError::mismatch("matrix-vector product", self.cols, vec.len()),
        )?;
        let product = self.mul(&Self::from_column(vec))?;
        Ok(product.column(0)?.vec())
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.cell(i, j));
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Check if every cell is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|c| c.is_zero())
    }

    /// View the row-major buffer.
    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    fn iter_columns(&self) -> impl Iterator<Item = Column<'_, F>> + '_ {
        (0..self.cols).map(move |j| Column::new(self, j))
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> F {
        self.data[row * self.cols + col]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut F {
        &mut self.data[row * self.cols + col]
    }

    pub(crate) fn row_slice(&self, row: usize) -> &[F] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [F] {
        let cols = self.cols;
        &mut self.data[row * cols..(row + 1) * cols]
    }

    fn check_cell(&self, row: usize, col: usize) -> LinalgResult<()> {
        self.check_row(row)?;
        self.check_column(col)
    }

    fn check_row(&self, row: usize) -> LinalgResult<()> {
        ensure(|| row < self.rows, || LinalgError::out_of_bounds("matrix row", row, self.rows))
    }

    fn check_column(&self, col: usize) -> LinalgResult<()> {
        ensure(|| col < self.cols, || LinalgError::out_of_bounds("matrix column", col, self.cols))
    }
}

impl<F: Scalar> Index<(usize, usize)> for Matrix<F> {
    type Output = F;

    fn index(&self, (row, col): (usize, usize)) -> &F {
        assert!(col < self.cols, "matrix column {} out of bounds", col);
        &self.data[row * self.cols + col]
    }
}

impl<F: Scalar> IndexMut<(usize, usize)> for Matrix<F> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut F {
        assert!(col < self.cols, "matrix column {} out of bounds", col);
        self.cell_mut(row, col)
    }
}

impl<F: Scalar> Mul<F> for &Matrix<F> {
    type Output = Matrix<F>;

    fn mul(self, scalar: F) -> Matrix<F> {
        self.scale(scalar)
    }
}

impl<F: Scalar + Serialize> Serialize for Matrix<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq((0..self.rows).map(|i| self.row_slice(i)))
    }
}

impl<F: Scalar> fmt::Display for Matrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for row in self.iter_rows() {
            write!(f, "  [")?;
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", val)?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "]")
    }
}
