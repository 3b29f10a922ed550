//! Second-quantized fermionic operators.
//!
//! Terms are products of creation (`p^`) and annihilation (`p`) operators
//! kept in the order they were written. [`SymbolicOperator::normal_ordered`]
//! rewrites them with creation operators first and modes descending within
//! each group, applying `{a_p, a_q†} = δ_pq`.
//!
//! # Example
//!
//! ```rust
//! use lattop_ops::FermionOperator;
//!
//! let hop = FermionOperator::parse("0^ 1", -1.0).unwrap();
//! let h = hop.clone() + hop.hermitian_conjugated();
//! assert!(h.is_hermitian());
//! assert_eq!(h, "0^ 1".parse::<FermionOperator>().unwrap() * -1.0
//!     + "1^ 0".parse::<FermionOperator>().unwrap() * -1.0);
//! ```

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::symbolic::{Action, SymbolicOperator, Term};

/// A fermionic ladder operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ladder {
    /// Annihilation operator `a_p`, written `p`.
    Lower,
    /// Creation operator `a_p†`, written `p^`.
    Raise,
}

impl Action for Ladder {
    fn adjoint(self) -> Self {
        match self {
            Ladder::Lower => Ladder::Raise,
            Ladder::Raise => Ladder::Lower,
        }
    }

    fn simplify(term: Term<Self>) -> (Complex64, Term<Self>) {
        (Complex64::new(1.0, 0.0), term)
    }

    fn normal_order(term: Term<Self>) -> Vec<(Complex64, Term<Self>)> {
        let mut out = Vec::new();
        normal_order_into(term, Complex64::new(1.0, 0.0), &mut out);
        out
    }

    fn fmt_with_mode(self, mode: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ladder::Raise => write!(f, "{mode}^"),
            Ladder::Lower => write!(f, "{mode}"),
        }
    }

    fn parse_action(token: &str) -> Option<(usize, Self)> {
        let (digits, action) = match token.strip_suffix('^') {
            Some(digits) => (digits, Ladder::Raise),
            None => (token, Ladder::Lower),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|mode| (mode, action))
    }
}

/// Bubble `term` into normal order, pushing every resulting term onto `out`.
///
/// Each transposition flips the sign. Swapping `a_p a_p†` also spawns the
/// contracted term without the pair. A repeated operator makes the term
/// vanish.
fn normal_order_into(
    mut term: Term<Ladder>,
    mut coeff: Complex64,
    out: &mut Vec<(Complex64, Term<Ladder>)>,
) {
    for i in 1..term.len() {
        for j in (1..=i).rev() {
            let (left_mode, left) = term[j - 1];
            let (right_mode, right) = term[j];
            if left == Ladder::Lower && right == Ladder::Raise {
                term.swap(j - 1, j);
                coeff = -coeff;
                if left_mode == right_mode {
                    let mut contracted = term[..j - 1].to_vec();
                    contracted.extend_from_slice(&term[j + 1..]);
                    normal_order_into(contracted, -coeff, out);
                }
            } else if left == right {
                if left_mode == right_mode {
                    return;
                }
                if right_mode > left_mode {
                    term.swap(j - 1, j);
                    coeff = -coeff;
                }
            }
        }
    }
    out.push((coeff, term));
}

/// A sum of weighted products of fermionic ladder operators.
pub type FermionOperator = SymbolicOperator<Ladder>;

impl SymbolicOperator<Ladder> {
    /// `coeff · a_to† a_from`, written `to^ from`.
    pub fn hopping(to: usize, from: usize, coeff: impl Into<Complex64>) -> Self {
        Self::term([(to, Ladder::Raise), (from, Ladder::Lower)], coeff)
    }

    /// `coeff · n_mode = coeff · a_mode† a_mode`.
    pub fn number(mode: usize, coeff: impl Into<Complex64>) -> Self {
        Self::hopping(mode, mode, coeff)
    }

    /// Number of modes spanned (highest index + 1).
    pub fn num_modes(&self) -> usize {
        self.max_mode().map_or(0, |m| m + 1)
    }
}
