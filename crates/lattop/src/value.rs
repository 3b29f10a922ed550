//! Local Hamiltonian values attached to sites and bonds.
//!
//! A local value is either a scalar (a 1x1 strength) or a dense complex
//! matrix whose rows index the internal degrees of the first site and whose
//! columns index those of the second.

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{LattopError, LattopResult};

/// The shape of a [`LocalValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// A bare number.
    Scalar,
    /// A `rows x cols` matrix.
    Matrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Scalar => write!(f, "scalar"),
            ValueShape::Matrix { rows, cols } => write!(f, "{rows}x{cols} matrix"),
        }
    }
}

/// A scalar or matrix Hamiltonian element.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalValue {
    /// Interaction strength of a single internal degree.
    Scalar(Complex64),
    /// Dense matrix over internal degrees, indexed `[row, col]`.
    Matrix(Array2<Complex64>),
}

impl LocalValue {
    /// A real scalar.
    pub fn real(x: f64) -> Self {
        LocalValue::Scalar(Complex64::new(x, 0.0))
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        LocalValue::Matrix(Array2::eye(n))
    }

    /// Build a matrix from nested rows.
    ///
    /// Fails on an empty matrix or on rows of differing length.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> LattopResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_cols == 0 {
            return Err(LattopError::UnsupportedValue("empty matrix".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(LattopError::UnsupportedValue(format!(
                "ragged matrix: row {i} has {} entries, expected {n_cols}",
                row.len()
            )));
        }
        let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_rows, n_cols), flat)
            .map(LocalValue::Matrix)
            .map_err(|e| LattopError::UnsupportedValue(e.to_string()))
    }

    /// Shape of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            LocalValue::Scalar(_) => ValueShape::Scalar,
            LocalValue::Matrix(m) => {
                let (rows, cols) = m.dim();
                ValueShape::Matrix { rows, cols }
            }
        }
    }

    /// Internal dimension implied by an on-site value.
    ///
    /// A scalar is one degree; a non-empty square `n x n` matrix is `n`
    /// degrees. Anything else has no well-defined dimension.
    pub fn site_dim(&self) -> Option<usize> {
        match self.shape() {
            ValueShape::Scalar => Some(1),
            ValueShape::Matrix { rows, cols } if rows == cols && rows > 0 => Some(rows),
            ValueShape::Matrix { .. } => None,
        }
    }

    /// The matrix payload, if any.
    pub fn as_matrix(&self) -> Option<&Array2<Complex64>> {
        match self {
            LocalValue::Scalar(_) => None,
            LocalValue::Matrix(m) => Some(m),
        }
    }

    /// Multiply every element by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: impl Into<Complex64>) -> Self {
        let factor = factor.into();
        match self {
            LocalValue::Scalar(c) => LocalValue::Scalar(c * factor),
            LocalValue::Matrix(m) => LocalValue::Matrix(m.mapv(|c| c * factor)),
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        match self {
            LocalValue::Scalar(c) => LocalValue::Scalar(c.conj()),
            LocalValue::Matrix(m) => LocalValue::Matrix(m.t().mapv(|c| c.conj())),
        }
    }
}

impl From<f64> for LocalValue {
    fn from(x: f64) -> Self {
        LocalValue::real(x)
    }
}

impl From<Complex64> for LocalValue {
    fn from(c: Complex64) -> Self {
        LocalValue::Scalar(c)
    }
}

impl From<Array2<Complex64>> for LocalValue {
    fn from(m: Array2<Complex64>) -> Self {
        LocalValue::Matrix(m)
    }
}

impl From<Array2<f64>> for LocalValue {
    fn from(m: Array2<f64>) -> Self {
        LocalValue::Matrix(m.mapv(|x| Complex64::new(x, 0.0)))
    }
}
