//! Pauli basis constants and the basis change into it.
//!
//! Any 2x2 matrix `M` can be written uniquely as
//!
//!   M = Σ_k c_k σ_k,   σ ∈ [I, X, Y, Z]
//!
//! and any 4x4 matrix as a combination of the 16 products `σ_a ⊗ σ_b`.
//! Stacking the row-major flattened basis matrices as the rows of `B`
//! gives `vec(M) = Bᵀ c`, so `c = (B⁻¹)ᵀ vec(M)`. The two matrices
//! `(B⁻¹)ᵀ` are built once per process.

use std::sync::LazyLock;

use lattop_ops::Pauli;
use ndarray::{Array1, Array2, array};
use num_complex::Complex64;

use crate::error::{LattopError, LattopResult};
use crate::linalg::{flatten, invert, kron};

/// Basis labels for 2x2 matrices, in coefficient order.
pub const PAULI_LABELS: [Pauli; 4] = Pauli::ALL;

/// Basis labels for 4x4 matrices: outer loop over the first factor.
pub static PAULI_LABELS_2: LazyLock<Vec<(Pauli, Pauli)>> = LazyLock::new(|| {
    Pauli::ALL
        .iter()
        .flat_map(|&a| Pauli::ALL.iter().map(move |&b| (a, b)))
        .collect()
});

/// The four single-qubit basis matrices `[I, X, Y, Z]`.
pub static PAULI_MATRICES: LazyLock<[Array2<Complex64>; 4]> =
    LazyLock::new(|| Pauli::ALL.map(pauli_matrix));

/// The 16 two-qubit basis matrices, ordered like [`PAULI_LABELS_2`].
pub static PAULI_MATRICES_2: LazyLock<Vec<Array2<Complex64>>> = LazyLock::new(|| {
    PAULI_LABELS_2
        .iter()
        .map(|&(a, b)| kron(&pauli_matrix(a), &pauli_matrix(b)))
        .collect()
});

static BASIS_CHANGE: LazyLock<LattopResult<Array2<Complex64>>> =
    LazyLock::new(|| basis_change(PAULI_MATRICES.as_slice()));

static BASIS_CHANGE_2: LazyLock<LattopResult<Array2<Complex64>>> =
    LazyLock::new(|| basis_change(&PAULI_MATRICES_2));

/// Matrix of a single Pauli operator.
pub fn pauli_matrix(p: Pauli) -> Array2<Complex64> {
    let z = Complex64::new(0.0, 0.0);
    let o = Complex64::new(1.0, 0.0);
    let i = Complex64::new(0.0, 1.0);
    match p {
        Pauli::I => array![[o, z], [z, o]],
        Pauli::X => array![[z, o], [o, z]],
        Pauli::Y => array![[z, -i], [i, z]],
        Pauli::Z => array![[o, z], [z, -o]],
    }
}

fn basis_change(basis: &[Array2<Complex64>]) -> LattopResult<Array2<Complex64>> {
    let n = basis.len();
    let mut rows = Array2::<Complex64>::zeros((n, n));
    for (k, m) in basis.iter().enumerate() {
        rows.row_mut(k).assign(&flatten(m));
    }
    Ok(invert(&rows)?.reversed_axes())
}

/// Coefficients of `m` in the Pauli basis.
///
/// A 2x2 input yields 4 coefficients ordered like [`PAULI_LABELS`]; a 4x4
/// input yields 16 ordered like [`PAULI_LABELS_2`].
pub fn to_pauli_basis(m: &Array2<Complex64>) -> LattopResult<Array1<Complex64>> {
    let change = match m.dim() {
        (2, 2) => &*BASIS_CHANGE,
        (4, 4) => &*BASIS_CHANGE_2,
        (rows, cols) => return Err(LattopError::PauliBasis { rows, cols }),
    };
    let change = change.as_ref().map_err(|_| LattopError::SingularMatrix)?;
    Ok(change.dot(&flatten(m)))
}

/// Rebuild a matrix from its Pauli-basis coefficients (4 or 16 of them).
pub fn from_pauli_basis(coeffs: &Array1<Complex64>) -> LattopResult<Array2<Complex64>> {
    let basis: &[Array2<Complex64>] = match coeffs.len() {
        4 => PAULI_MATRICES.as_slice(),
        16 => &PAULI_MATRICES_2,
        len => return Err(LattopError::PauliBasis { rows: len, cols: 1 }),
    };
    let dim = basis[0].nrows();
    Ok(basis
        .iter()
        .zip(coeffs.iter())
        .fold(Array2::zeros((dim, dim)), |acc, (p, &c)| acc + p.mapv(|x| x * c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(v: &Array1<Complex64>) -> Vec<f64> {
        v.iter()
            .map(|c| {
                assert!(c.im.abs() < 1e-12);
                c.re
            })
            .collect()
    }

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_sigma_x() {
        let c = to_pauli_basis(&pauli_matrix(Pauli::X)).unwrap();
        assert_close(&real(&c), &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sigma_y_plus_two_sigma_z() {
        let m = pauli_matrix(Pauli::Y) + pauli_matrix(Pauli::Z).mapv(|x| x * 2.0);
        let c = to_pauli_basis(&m).unwrap();
        assert_close(&real(&c), &[0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_labels_order() {
        assert_eq!(PAULI_LABELS_2.len(), 16);
        assert_eq!(PAULI_LABELS_2[0], (Pauli::I, Pauli::I));
        assert_eq!(PAULI_LABELS_2[1], (Pauli::I, Pauli::X));
        assert_eq!(PAULI_LABELS_2[4], (Pauli::X, Pauli::I));
        assert_eq!(PAULI_LABELS_2[15], (Pauli::Z, Pauli::Z));
    }

    #[test]
    fn test_two_qubit_basis_vectors() {
        for (k, m) in PAULI_MATRICES_2.iter().enumerate() {
            let c = real(&to_pauli_basis(m).unwrap());
            let mut expected = vec![0.0; 16];
            expected[k] = 1.0;
            assert_close(&c, &expected);
        }
    }

    #[test]
    fn test_basis_change_is_inverse_of_basis() {
        for (basis, change) in [
            (PAULI_MATRICES.as_slice(), &*BASIS_CHANGE),
            (PAULI_MATRICES_2.as_slice(), &*BASIS_CHANGE_2),
        ] {
            let change = change.as_ref().unwrap();
            let n = basis.len();
            assert_eq!(change.dim(), (n, n));
            let rebuilt = basis_change(basis).unwrap();
            assert!(rebuilt.iter().zip(change.iter()).all(|(a, b)| (a - b).norm() < 1e-12));
        }
    }

    #[test]
    fn test_basis_change_of_dependent_set_fails() {
        let degenerate = [
            pauli_matrix(Pauli::I),
            pauli_matrix(Pauli::X),
            pauli_matrix(Pauli::X),
            pauli_matrix(Pauli::Z),
        ];
        assert!(matches!(
            basis_change(&degenerate),
            Err(LattopError::SingularMatrix)
        ));
    }

    #[test]
    fn test_rejects_other_shapes() {
        let m = Array2::<Complex64>::zeros((3, 3));
        assert!(matches!(
            to_pauli_basis(&m),
            Err(LattopError::PauliBasis { rows: 3, cols: 3 })
        ));
        let m = Array2::<Complex64>::zeros((2, 4));
        assert!(to_pauli_basis(&m).is_err());
    }
}
