pub mod echelon;
pub mod span;

pub use span::Span;

use crate::error::AlgebraError;
use crate::row::{Element, Row, RowSlice};
use rand::Rng;
use std::{
    fmt,
    ops::{Add, Index, Mul, Rem, Sub},
};

/// A matrix of field elements, stored as a vector of equal-length [`Row`]s
///
/// The shape is always derived from the rows: `rows` is the number of rows and `cols` the
/// length of the first row, so an empty matrix has shape `(0, 0)`. A matrix may hold rows of
/// length zero (shape `(r, 0)`), which is how a matrix is grown column by column with
/// [`Matrix::push_column`].
///
/// Arithmetic works over the integers; callers reduce with [`Matrix::mod2`] to work over
/// GF(2). Row-reduction lives in [`echelon`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Row>,
}

/// Elementary row operations over GF(2)
pub trait RowOps {
    /// Adds row `from` into row `to`, reducing the result mod 2
    fn add_row(&mut self, from: usize, to: usize) -> Result<(), AlgebraError>;
    fn swap_rows(&mut self, from: usize, to: usize) -> Result<(), AlgebraError>;
}

impl Matrix {
    /// Builds a matrix from rows, which must all have the same length
    pub fn new(rows: Vec<Row>) -> Result<Self, AlgebraError> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
                return Err(AlgebraError::RaggedRows {
                    row,
                    len: r.len(),
                    expected,
                });
            }
        }
        Ok(Matrix { rows })
    }

    /// Converts nested vectors of elements into a matrix
    pub fn from_vecs(data: Vec<Vec<Element>>) -> Result<Self, AlgebraError> {
        Self::new(data.into_iter().map(Row::from).collect())
    }

    /// Builds a matrix from a function `f` giving the element at each position
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Element) -> Self {
        Matrix {
            rows: (0..rows)
                .map(|i| (0..cols).map(|j| f(i, j)).collect())
                .collect(),
        }
    }

    /// A single-row matrix
    #[inline]
    pub fn row_vector(row: Row) -> Self {
        Matrix { rows: vec![row] }
    }

    #[inline]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows: vec![Row::zeros(cols); rows],
        }
    }

    #[inline]
    pub fn ones(rows: usize, cols: usize) -> Self {
        Matrix {
            rows: vec![Row::ones(cols); rows],
        }
    }

    /// The `size` by `size` identity matrix
    pub fn identity(size: usize) -> Self {
        Matrix {
            rows: (0..size).map(|i| Row::unit(size, i)).collect(),
        }
    }

    /// A random 0/1 matrix
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Matrix {
            rows: (0..rows).map(|_| Row::random(rng, cols)).collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    #[inline]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    #[inline]
    fn check_row(&self, index: usize) -> Result<(), AlgebraError> {
        if index < self.rows() {
            Ok(())
        } else {
            Err(AlgebraError::IndexOutOfBounds {
                what: "row",
                index,
                len: self.rows(),
            })
        }
    }

    #[inline]
    fn check_col(&self, index: usize) -> Result<(), AlgebraError> {
        if index < self.cols() {
            Ok(())
        } else {
            Err(AlgebraError::IndexOutOfBounds {
                what: "column",
                index,
                len: self.cols(),
            })
        }
    }

    /// A new row may join the matrix if it is empty or the lengths agree
    #[inline]
    fn check_row_len(&self, row: &RowSlice) -> Result<(), AlgebraError> {
        if self.rows.is_empty() || row.len() == self.cols() {
            Ok(())
        } else {
            Err(AlgebraError::LengthMismatch {
                left: self.cols(),
                right: row.len(),
            })
        }
    }

    pub fn row(&self, index: usize) -> Result<&Row, AlgebraError> {
        self.check_row(index)?;
        Ok(&self.rows[index])
    }

    pub fn get(&self, i: usize, j: usize) -> Result<Element, AlgebraError> {
        self.row(i)?.get(j)
    }

    pub fn set(&mut self, i: usize, j: usize, value: Element) -> Result<(), AlgebraError> {
        self.check_row(i)?;
        self.rows[i].set(j, value)
    }

    /// Replaces row `index`; the new row must have the same length
    pub fn set_row(&mut self, index: usize, row: Row) -> Result<(), AlgebraError> {
        self.check_row(index)?;
        if row.len() != self.cols() {
            return Err(AlgebraError::LengthMismatch {
                left: self.cols(),
                right: row.len(),
            });
        }
        self.rows[index] = row;
        Ok(())
    }

    pub fn column(&self, index: usize) -> Result<Row, AlgebraError> {
        self.check_col(index)?;
        Ok(self.rows.iter().map(|r| r[index]).collect())
    }

    pub fn columns(&self, indices: &[usize]) -> Result<Vec<Row>, AlgebraError> {
        indices.iter().map(|&j| self.column(j)).collect()
    }

    /// Sum of the selected columns, reduced mod 2
    pub fn column_sum(&self, indices: &[usize]) -> Result<Row, AlgebraError> {
        for &j in indices {
            self.check_col(j)?;
        }
        Ok(self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&j| r[j]).sum::<Element>().rem_euclid(2))
            .collect())
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self {
        Matrix {
            rows: (0..self.cols())
                .map(|j| self.rows.iter().map(|r| r[j]).collect())
                .collect(),
        }
    }

    /// Removes and returns row `index`
    pub fn remove_row(&mut self, index: usize) -> Result<Row, AlgebraError> {
        self.check_row(index)?;
        Ok(self.rows.remove(index))
    }

    /// Inserts `row` before position `pos`; `pos == rows()` appends
    pub fn insert_row(&mut self, row: Row, pos: usize) -> Result<(), AlgebraError> {
        if pos > self.rows() {
            return Err(AlgebraError::IndexOutOfBounds {
                what: "row",
                index: pos,
                len: self.rows(),
            });
        }
        self.check_row_len(&row)?;
        self.rows.insert(pos, row);
        Ok(())
    }

    pub fn push_row(&mut self, row: Row) -> Result<(), AlgebraError> {
        self.insert_row(row, self.rows())
    }

    /// Appends a column; it needs one element per row
    pub fn push_column(&mut self, column: &RowSlice) -> Result<(), AlgebraError> {
        if column.len() != self.rows() {
            return Err(AlgebraError::LengthMismatch {
                left: self.rows(),
                right: column.len(),
            });
        }
        for (row, x) in self.rows.iter_mut().zip(column.iter()) {
            row.push(x);
        }
        Ok(())
    }

    /// Concatenates `other` to the right of this matrix
    pub fn hstack(&self, other: &Matrix) -> Result<Self, AlgebraError> {
        if self.rows() != other.rows() {
            return Err(AlgebraError::ShapeMismatch {
                op: "hstack",
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Matrix {
            rows: self
                .rows
                .iter()
                .zip(other.rows.iter())
                .map(|(a, b)| a.concat(b))
                .collect(),
        })
    }

    /// Concatenates `other` below this matrix. A matrix without rows stacks with anything.
    pub fn vstack(&self, other: &Matrix) -> Result<Self, AlgebraError> {
        if self.rows() != 0 && other.rows() != 0 && self.cols() != other.cols() {
            return Err(AlgebraError::ShapeMismatch {
                op: "vstack",
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Matrix {
            rows: self.rows.iter().chain(other.rows.iter()).cloned().collect(),
        })
    }

    /// Extracts the sub-block selected by `rows` and `cols`
    ///
    /// ```
    /// use lincode::{Matrix, Span};
    ///
    /// let m = Matrix::from_vecs(vec![vec![1, 0, 1, 1], vec![0, 1, 1, 0]]).unwrap();
    /// assert_eq!(m.split(.., 2..), Matrix::from_vecs(vec![vec![1, 1], vec![1, 0]]).unwrap());
    /// assert_eq!(m.split(Span::new(Some(-1), None), ..1).shape(), (1, 1));
    /// ```
    pub fn split(&self, rows: impl Into<Span>, cols: impl Into<Span>) -> Self {
        let rows = rows.into().resolve(self.rows());
        let cols = cols.into().resolve(self.cols());
        Matrix {
            rows: self.rows[rows]
                .iter()
                .map(|r| r[cols.clone()].to_row())
                .collect(),
        }
    }

    #[inline]
    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<(), AlgebraError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(AlgebraError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            })
        }
    }

    /// Element-wise sum
    pub fn try_add(&self, other: &Matrix) -> Result<Self, AlgebraError> {
        self.check_same_shape(other, "addition")?;
        Ok(Matrix {
            rows: self
                .rows
                .iter()
                .zip(other.rows.iter())
                .map(|(a, b)| a.try_add(b))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Element-wise difference
    pub fn try_sub(&self, other: &Matrix) -> Result<Self, AlgebraError> {
        self.check_same_shape(other, "subtraction")?;
        Ok(Matrix {
            rows: self
                .rows
                .iter()
                .zip(other.rows.iter())
                .map(|(a, b)| a.try_sub(b))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Matrix product over the integers
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Self, AlgebraError> {
        if self.cols() != rhs.rows() {
            return Err(AlgebraError::ShapeMismatch {
                op: "multiplication",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut res = Matrix::zeros(self.rows(), rhs.cols());
        for (out, row) in res.rows.iter_mut().zip(self.rows.iter()) {
            for (j, x) in row.iter().enumerate() {
                if x != 0 {
                    for (c, y) in rhs.rows[j].iter().enumerate() {
                        out[c] += x * y;
                    }
                }
            }
        }
        Ok(res)
    }

    /// Computes `self · vᵗ`, treating `v` as a column vector (not reduced)
    pub fn try_mul_vector(&self, v: &RowSlice) -> Result<Row, AlgebraError> {
        if !self.rows.is_empty() && self.cols() != v.len() {
            return Err(AlgebraError::ShapeMismatch {
                op: "matrix-vector multiplication",
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        self.rows.iter().map(|r| r.dot(v)).collect()
    }

    /// Computes `v · self`, treating `v` as a row vector (not reduced)
    pub fn try_row_mul(&self, v: &RowSlice) -> Result<Row, AlgebraError> {
        if v.len() != self.rows() {
            return Err(AlgebraError::ShapeMismatch {
                op: "vector-matrix multiplication",
                left: (1, v.len()),
                right: self.shape(),
            });
        }
        let mut out = Row::zeros(self.cols());
        for (x, row) in v.iter().zip(self.rows.iter()) {
            if x != 0 {
                for (c, y) in row.iter().enumerate() {
                    out[c] += x * y;
                }
            }
        }
        Ok(out)
    }

    pub fn scaled(&self, k: Element) -> Self {
        Matrix {
            rows: self.rows.iter().map(|r| r.scaled(k)).collect(),
        }
    }

    pub fn modulo(&self, m: Element) -> Self {
        Matrix {
            rows: self.rows.iter().map(|r| r.modulo(m)).collect(),
        }
    }

    #[inline]
    pub fn mod2(&self) -> Self {
        self.modulo(2)
    }

    /// Truthiness of the matrix: true if any element is nonzero
    #[inline]
    pub fn any(&self) -> bool {
        self.rows.iter().any(|r| r.any())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        !self.any()
    }

    /// Is the matrix of the form `(I | A)`, with `I` the identity on the first `rows()` columns
    pub fn is_systematic(&self) -> bool {
        let k = self.rows();
        k <= self.cols() && self.split(.., ..k) == Matrix::identity(k)
    }
}

impl RowOps for Matrix {
    fn add_row(&mut self, from: usize, to: usize) -> Result<(), AlgebraError> {
        self.check_row(from)?;
        self.check_row(to)?;
        let source = self.rows[from].clone();
        self.rows[to].add_assign_mod2(&source)
    }

    fn swap_rows(&mut self, from: usize, to: usize) -> Result<(), AlgebraError> {
        self.check_row(from)?;
        self.check_row(to)?;
        self.rows.swap(from, to);
        Ok(())
    }
}

impl From<Row> for Matrix {
    fn from(row: Row) -> Self {
        Matrix::row_vector(row)
    }
}

impl Index<usize> for Matrix {
    type Output = Row;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Element;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.rows[index.0][index.1]
    }
}

impl<'a> IntoIterator for &'a Matrix {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Add for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: Self) -> Self::Output {
        match self.try_add(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Sub for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: Self) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols() != rhs.rows() {
            panic!(
                "Attempting to multiply matrices of incompatible dimensions: {} != {}",
                self.cols(),
                rhs.rows()
            );
        }
        match self.try_mul(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Rem<Element> for &Matrix {
    type Output = Matrix;
    fn rem(self, rhs: Element) -> Self::Output {
        self.modulo(rhs)
    }
}
