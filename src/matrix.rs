//! Dense matrices of fractions

use crate::config::ApproxConfig;
use crate::errors::FractionError;
use crate::fraction::Fraction;
use core::mem::size_of;
use core::ops::{Add, Index, IndexMut, Mul, Sub};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// A `rows x columns` matrix of [Fraction]s, stored row by row.
///
/// Both dimensions are positive and every cell holds a valid fraction (zero after
/// construction). Cells are copied in and out, a matrix never shares storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    elements: Vec<Fraction>,
}

impl Matrix {
    /// Create a zero matrix
    pub fn new(rows: usize, columns: usize) -> Result<Self, FractionError> {
        if rows == 0 || columns == 0 {
            return Err(FractionError::InvalidArgument(
                "matrix dimensions must be positive",
            ));
        }
        // storage is bounded by isize::MAX bytes
        let max_cells = isize::MAX as usize / size_of::<Fraction>();
        let cells = rows
            .checked_mul(columns)
            .filter(|n| *n <= max_cells)
            .ok_or(FractionError::InvalidArgument("matrix too large"))?;
        Ok(Matrix {
            rows,
            columns,
            elements: vec![Fraction::ZERO; cells],
        })
    }

    /// Create a matrix from a list of rows of equal, non-zero length
    pub fn from_rows(rows: Vec<Vec<Fraction>>) -> Result<Self, FractionError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(FractionError::InvalidArgument(
                "matrix dimensions must be positive",
            ));
        }
        if rows.iter().any(|r| r.len() != columns) {
            return Err(FractionError::InvalidArgument(
                "all rows must have the same length",
            ));
        }

        Ok(Matrix {
            rows: rows.len(),
            columns,
            elements: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> Result<usize, FractionError> {
        if row >= self.rows || column >= self.columns {
            return Err(FractionError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    pub fn get(&self, row: usize, column: usize) -> Result<Fraction, FractionError> {
        self.offset(row, column).map(|i| self.elements[i])
    }

    pub fn set(&mut self, row: usize, column: usize, value: Fraction) -> Result<(), FractionError> {
        let i = self.offset(row, column)?;
        self.elements[i] = value;
        Ok(())
    }

    /// Cells of one row, None if `row` is out of range
    #[inline]
    pub fn row(&self, row: usize) -> Option<&[Fraction]> {
        if row < self.rows {
            Some(&self.elements[row * self.columns..(row + 1) * self.columns])
        } else {
            None
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut elements = Vec::with_capacity(self.elements.len());
        for j in 0..self.columns {
            for i in 0..self.rows {
                elements.push(self.elements[i * self.columns + j]);
            }
        }
        Matrix {
            rows: self.columns,
            columns: self.rows,
            elements,
        }
    }

    fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Result<Self, FractionError>
    where
        F: FnMut(usize, usize) -> Result<Fraction, FractionError>,
    {
        let mut m = Matrix::new(rows, columns)?;
        for i in 0..rows {
            for j in 0..columns {
                m.elements[i * columns + j] = f(i, j)?;
            }
        }
        Ok(m)
    }

    /// Matrix of random integers in `[-99, 99]`
    pub fn random_whole<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<Self, FractionError> {
        debug!(rows, columns, "generating random integer matrix");
        Self::from_fn(rows, columns, |_, _| {
            Ok(Fraction::from_integer(rng.gen_range(-99..=99)))
        })
    }

    /// Matrix of random fractions with numerators in `[-9, 9]` and denominators in `[1, 9]`
    pub fn random_fraction<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<Self, FractionError> {
        debug!(rows, columns, "generating random fraction matrix");
        Self::from_fn(rows, columns, |_, _| {
            let numer = rng.gen_range(-9..=9);
            let denom = rng.gen_range(1..=9);
            Fraction::new(numer, denom)
        })
    }

    /// Matrix of random floats in `[0, 1)`, approximated with [ApproxConfig::RANDOM_DOUBLE]
    pub fn random_double<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<Self, FractionError> {
        debug!(rows, columns, "generating random float matrix");
        Self::from_fn(rows, columns, |_, _| {
            Fraction::from_f64_approx(rng.gen::<f64>(), &ApproxConfig::RANDOM_DOUBLE)
        })
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: F) -> Result<Matrix, FractionError>
    where
        F: Fn(Fraction, Fraction) -> Result<Fraction, FractionError>,
    {
        if self.shape() != rhs.shape() {
            return Err(FractionError::IncompatibleDimensions {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        let elements = self
            .elements
            .iter()
            .zip(rhs.elements.iter())
            .map(|(a, b)| op(*a, *b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Matrix {
            rows: self.rows,
            columns: self.columns,
            elements,
        })
    }

    /// Element-wise sum, both matrices must have the same shape
    pub fn try_add(&self, rhs: &Matrix) -> Result<Matrix, FractionError> {
        self.zip_with(rhs, Fraction::try_add)
    }

    /// Element-wise difference, both matrices must have the same shape
    pub fn try_sub(&self, rhs: &Matrix) -> Result<Matrix, FractionError> {
        self.zip_with(rhs, Fraction::try_sub)
    }

    /// Matrix product, the column count of `self` must equal the row count of `rhs`
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix, FractionError> {
        if self.columns != rhs.rows {
            return Err(FractionError::IncompatibleDimensions {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        Self::from_fn(self.rows, rhs.columns, |i, j| {
            let mut acc = Fraction::ZERO;
            for k in 0..self.columns {
                let term = self[(i, k)].try_mul(rhs[(k, j)])?;
                acc = acc.try_add(term)?;
            }
            Ok(acc)
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Fraction;

    fn index(&self, (row, column): (usize, usize)) -> &Fraction {
        match self.offset(row, column) {
            Ok(i) => &self.elements[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Fraction {
        match self.offset(row, column) {
            Ok(i) => &mut self.elements[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl fmt::Display for Matrix {
    /// Nested braces, e.g. `{{1, 1/2}, {-3, 0}}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, row) in self.elements.chunks(self.columns).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{{")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "}}")?;
        }
        write!(f, "}}")
    }
}

macro_rules! matrix_op_impl {
    (impl $imp:ident, $method:ident, $try_method:ident) => {
        impl<'a> $imp<&'a Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'a Matrix) -> Matrix {
                match self.$try_method(rhs) {
                    Ok(m) => m,
                    Err(e) => panic!("matrix arithmetic failed: {}", e),
                }
            }
        }

        impl $imp<Matrix> for Matrix {
            type Output = Matrix;

            #[inline]
            fn $method(self, rhs: Matrix) -> Matrix {
                (&self).$method(&rhs)
            }
        }
    };
}

matrix_op_impl!(impl Add, add, try_add);
matrix_op_impl!(impl Sub, sub, try_sub);
matrix_op_impl!(impl Mul, mul, try_mul);
