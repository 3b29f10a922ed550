//! Small dense complex linear algebra.
//!
//! Only what the Pauli basis change needs: Kronecker products, row-major
//! flattening and inversion of matrices no larger than 16x16. Inversion
//! goes through a partial-pivoting LU from `faer`.

use faer::Mat;
use faer::linalg::solvers::DenseSolveCore;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{LattopError, LattopResult};

/// Largest `|m · m⁻¹ - 1|` entry accepted from the LU inverse.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    ndarray::linalg::kron(a, b)
}

/// Flatten a matrix in row-major (C) order.
pub fn flatten(m: &Array2<Complex64>) -> Array1<Complex64> {
    m.iter().copied().collect()
}

/// Invert a square matrix.
///
/// A non-square input, or an LU inverse that does not reproduce the
/// identity, is reported as [`LattopError::SingularMatrix`].
pub fn invert(m: &Array2<Complex64>) -> LattopResult<Array2<Complex64>> {
    let (n, cols) = m.dim();
    if n != cols {
        return Err(LattopError::SingularMatrix);
    }

    let a = Mat::<Complex64>::from_fn(n, n, |i, j| m[[i, j]]);
    let lu_inv = a.partial_piv_lu().inverse();
    let inv = Array2::from_shape_fn((n, n), |(i, j)| lu_inv[(i, j)]);

    if inv.iter().any(|c| !c.is_finite()) {
        return Err(LattopError::SingularMatrix);
    }
    let residual = m.dot(&inv) - Array2::<Complex64>::eye(n);
    let worst = residual.iter().map(|c| c.norm()).fold(0.0, f64::max);
    if worst > RESIDUAL_TOLERANCE {
        return Err(LattopError::SingularMatrix);
    }
    Ok(inv)
}
