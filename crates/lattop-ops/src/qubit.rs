//! Qubit operators as weighted sums of Pauli strings.
//!
//!   H = Σ_k  c_k · P_k
//!
//! Each Pauli string is stored sorted by qubit index with identity factors
//! omitted; products on the same qubit are reduced with their phase.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::symbolic::{Action, SymbolicOperator, Term};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity. Never stored inside a term.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// All four letters in basis order `[I, X, Y, Z]`.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Get the name of this Pauli operator.
    pub fn name(&self) -> &'static str {
        match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }

    /// True for the identity.
    pub fn is_identity(&self) -> bool {
        *self == Pauli::I
    }

    /// The product `self · other` as `(phase, letter)`.
    pub fn product(self, other: Pauli) -> (Complex64, Pauli) {
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match (self, other) {
            (Pauli::I, p) | (p, Pauli::I) => (one, p),
            (Pauli::X, Pauli::X) | (Pauli::Y, Pauli::Y) | (Pauli::Z, Pauli::Z) => (one, Pauli::I),
            (Pauli::X, Pauli::Y) => (i, Pauli::Z),
            (Pauli::Y, Pauli::Z) => (i, Pauli::X),
            (Pauli::Z, Pauli::X) => (i, Pauli::Y),
            (Pauli::Y, Pauli::X) => (-i, Pauli::Z),
            (Pauli::Z, Pauli::Y) => (-i, Pauli::X),
            (Pauli::X, Pauli::Z) => (-i, Pauli::Y),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Action for Pauli {
    fn adjoint(self) -> Self {
        self
    }

    fn simplify(mut term: Term<Self>) -> (Complex64, Term<Self>) {
        // Factors on different qubits commute; the stable sort keeps the
        // relative order of factors acting on the same qubit.
        term.sort_by_key(|(q, _)| *q);

        let mut phase = Complex64::new(1.0, 0.0);
        let mut out: Term<Self> = Vec::with_capacity(term.len());
        for (q, p) in term {
            match out.last_mut() {
                Some((last_q, last_p)) if *last_q == q => {
                    let (ph, r) = last_p.product(p);
                    phase *= ph;
                    *last_p = r;
                }
                _ => out.push((q, p)),
            }
        }
        out.retain(|(_, p)| !p.is_identity());
        (phase, out)
    }

    fn fmt_with_mode(self, mode: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), mode)
    }

    fn parse_action(token: &str) -> Option<(usize, Self)> {
        let mut chars = token.chars();
        let pauli = match chars.next()? {
            'I' => Pauli::I,
            'X' => Pauli::X,
            'Y' => Pauli::Y,
            'Z' => Pauli::Z,
            _ => return None,
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|q| (q, pauli))
    }
}

/// A sum of weighted Pauli strings.
pub type QubitOperator = SymbolicOperator<Pauli>;

impl SymbolicOperator<Pauli> {
    /// Single-qubit term `coeff · P_qubit`.
    pub fn pauli(qubit: usize, pauli: Pauli, coeff: impl Into<Complex64>) -> Self {
        Self::term([(qubit, pauli)], coeff)
    }

    /// The minimum number of qubits required to represent this operator.
    pub fn num_qubits(&self) -> usize {
        self.max_mode().map_or(0, |q| q + 1)
    }
}
