//! Pauli decomposition of local values.
//!
//! On-site values are 2x2 and expand over `{I, X, Y, Z}` on one qubit;
//! couplings are 4x4 and expand over the 16 products `σ_a ⊗ σ_b` acting on
//! the two qubits of the bond. The decomposer never symmetrizes; halving
//! and Hermitian pairing of couplings is the assembler's job.

use lattop_ops::QubitOperator;

use crate::error::{LattopError, LattopResult};
use crate::pauli::{PAULI_LABELS, PAULI_LABELS_2, to_pauli_basis};
use crate::value::LocalValue;

/// Default modulus below which Pauli coefficients are not emitted.
pub const DEFAULT_DROP_TOLERANCE: f64 = 1e-12;

/// Decompose `value` on qubits `(a, b)` into Pauli-string terms.
pub fn decompose(value: &LocalValue, a: usize, b: usize) -> LattopResult<QubitOperator> {
    decompose_with_tolerance(value, a, b, DEFAULT_DROP_TOLERANCE)
}

/// Like [`decompose`], skipping coefficients with modulus `<= tol`.
pub fn decompose_with_tolerance(
    value: &LocalValue,
    a: usize,
    b: usize,
    tol: f64,
) -> LattopResult<QubitOperator> {
    let size = if a == b { 2 } else { 4 };
    let m = match value {
        LocalValue::Matrix(m) if m.dim() == (size, size) => m,
        _ => {
            return Err(LattopError::DimensionMismatch {
                location: if a == b {
                    format!("qubit {a}")
                } else {
                    format!("qubits {a}, {b}")
                },
                expected: format!("{size}x{size} matrix"),
                got: value.shape(),
            });
        }
    };

    let coeffs = to_pauli_basis(m)?;
    let mut op = QubitOperator::zero();
    if a == b {
        for (&p, &c) in PAULI_LABELS.iter().zip(coeffs.iter()) {
            if c.norm() > tol {
                op.add_term(vec![(a, p)], c);
            }
        }
    } else {
        for (&(p1, p2), &c) in PAULI_LABELS_2.iter().zip(coeffs.iter()) {
            if c.norm() > tol {
                op.add_term(vec![(a, p1), (b, p2)], c);
            }
        }
    }
    Ok(op)
}
