//! Generic sum-of-products operator.
//!
//! An operator is a map from ordered action sequences to complex
//! coefficients:
//!
//!   O = Σ_k  c_k · (a_{k,0} a_{k,1} … a_{k,m})
//!
//! where every action `a` is a `(mode, letter)` pair drawn from an alphabet
//! implementing [`Action`]. Addition merges identical sequences by summing
//! their coefficients; nothing else is cancelled.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Absolute tolerance used by `==` when comparing coefficients.
pub const EQ_TOLERANCE: f64 = 1e-8;

/// An ordered sequence of `(mode, action)` pairs.
pub type Term<A> = Vec<(usize, A)>;

/// A letter of an operator alphabet (ladder operators, Pauli matrices, ...).
pub trait Action: Copy + Ord + fmt::Debug {
    /// The Hermitian adjoint of a single action.
    fn adjoint(self) -> Self;

    /// Bring a raw product of actions into canonical form.
    ///
    /// Returns the phase picked up while reordering or reducing.
    fn simplify(term: Term<Self>) -> (Complex64, Term<Self>);

    /// Expand a term into a sum of terms in the alphabet's normal order.
    ///
    /// The default is the canonical form from [`simplify`](Self::simplify),
    /// which suffices for alphabets whose canonical form is already unique.
    fn normal_order(term: Term<Self>) -> Vec<(Complex64, Term<Self>)> {
        vec![Self::simplify(term)]
    }

    /// Write the action acting on `mode` in the textual term grammar.
    fn fmt_with_mode(self, mode: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Parse one whitespace-separated token of the textual term grammar.
    fn parse_action(token: &str) -> Option<(usize, Self)>;
}

/// Parse a whitespace-separated term string such as `"0^ 1"` or `"X0 Z1"`.
///
/// The empty string is the constant (identity) term.
pub fn parse_term<A: Action>(term: &str) -> OpsResult<Term<A>> {
    term.split_whitespace()
        .map(|token| {
            A::parse_action(token).ok_or_else(|| OpsError::InvalidAction {
                token: token.to_string(),
                term: term.to_string(),
            })
        })
        .collect()
}

/// Displays a term in the textual term grammar.
pub struct TermDisplay<'a, A: Action>(pub &'a [(usize, A)]);

impl<A: Action> fmt::Display for TermDisplay<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (mode, action)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            action.fmt_with_mode(*mode, f)?;
        }
        Ok(())
    }
}

/// Serialized form of a single weighted term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    /// The term in the textual grammar, e.g. `"0^ 1"`.
    pub term: String,
    /// The complex coefficient, serialized as `[re, im]`.
    pub coefficient: Complex64,
}

/// A sum of weighted action sequences over the alphabet `A`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Vec<TermRecord>", try_from = "Vec<TermRecord>")]
#[serde(bound = "A: Action")]
pub struct SymbolicOperator<A: Action> {
    terms: BTreeMap<Term<A>, Complex64>,
}

impl<A: Action> SymbolicOperator<A> {
    /// The zero operator (no terms).
    pub fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// The identity operator with coefficient 1.
    pub fn identity() -> Self {
        Self::scalar(1.0)
    }

    /// A constant (identity) term with the given coefficient.
    pub fn scalar(coeff: impl Into<Complex64>) -> Self {
        Self::term([], coeff)
    }

    /// A single weighted term.
    pub fn term(actions: impl IntoIterator<Item = (usize, A)>, coeff: impl Into<Complex64>) -> Self {
        let mut op = Self::zero();
        op.add_term(actions.into_iter().collect(), coeff.into());
        op
    }

    /// A single weighted term parsed from the textual grammar.
    pub fn parse(term: &str, coeff: impl Into<Complex64>) -> OpsResult<Self> {
        Ok(Self::term(parse_term(term)?, coeff))
    }

    /// Accumulate `coeff · actions` into this operator.
    pub fn add_term(&mut self, actions: Term<A>, coeff: Complex64) {
        let (phase, canonical) = A::simplify(actions);
        *self.terms.entry(canonical).or_default() += phase * coeff;
    }

    /// Coefficient of a canonical term, zero when absent.
    pub fn coefficient(&self, actions: &[(usize, A)]) -> Complex64 {
        self.terms.get(actions).copied().unwrap_or_default()
    }

    /// Coefficient of the constant term.
    pub fn constant_coefficient(&self) -> Complex64 {
        self.coefficient(&[])
    }

    /// Iterate over `(term, coefficient)` pairs in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&[(usize, A)], Complex64)> {
        self.terms.iter().map(|(t, c)| (t.as_slice(), *c))
    }

    /// Number of stored terms, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if no terms are stored.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Reverse every term, adjoint each action and conjugate the coefficient.
    pub fn hermitian_conjugated(&self) -> Self {
        let mut out = Self::zero();
        for (term, coeff) in &self.terms {
            let adjoint = term.iter().rev().map(|&(m, a)| (m, a.adjoint())).collect();
            out.add_term(adjoint, coeff.conj());
        }
        out
    }

    /// Drop every term whose coefficient modulus is at most `tol`.
    pub fn compress(&mut self, tol: f64) {
        self.terms.retain(|_, c| c.norm() > tol);
    }

    /// Consuming variant of [`compress`](Self::compress).
    #[must_use]
    pub fn compressed(mut self, tol: f64) -> Self {
        self.compress(tol);
        self
    }

    /// Compare coefficient-wise over the union of both supports.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.terms
            .iter()
            .all(|(t, c)| (c - other.coefficient(t)).norm() <= tol)
            && other
                .terms
                .iter()
                .filter(|(t, _)| !self.terms.contains_key(*t))
                .all(|(_, c)| c.norm() <= tol)
    }

    /// The same operator with every term rewritten in normal order.
    pub fn normal_ordered(&self) -> Self {
        let mut out = Self::zero();
        for (term, coeff) in &self.terms {
            for (phase, ordered) in A::normal_order(term.clone()) {
                *out.terms.entry(ordered).or_default() += phase * coeff;
            }
        }
        out
    }

    /// True if the operator equals its Hermitian conjugate.
    ///
    /// Both sides are normal ordered first, so `n_i n_j` and its adjoint
    /// `n_j n_i` compare equal.
    pub fn is_hermitian(&self) -> bool {
        let ordered = self.normal_ordered();
        ordered.approx_eq(
            &ordered.hermitian_conjugated().normal_ordered(),
            EQ_TOLERANCE,
        )
    }

    /// Length of the longest term with a non-negligible coefficient.
    pub fn many_body_order(&self) -> usize {
        self.terms
            .iter()
            .filter(|(_, c)| c.norm() > EQ_TOLERANCE)
            .map(|(t, _)| t.len())
            .max()
            .unwrap_or(0)
    }

    /// Highest mode index referenced, or `None` for a constant operator.
    pub fn max_mode(&self) -> Option<usize> {
        self.terms.keys().flat_map(|t| t.iter().map(|(m, _)| *m)).max()
    }

    fn scale(&mut self, factor: Complex64) {
        for c in self.terms.values_mut() {
            *c *= factor;
        }
    }

    fn product(&self, rhs: &Self) -> Self {
        let mut out = Self::zero();
        for (l, lc) in &self.terms {
            for (r, rc) in &rhs.terms {
                let mut actions = l.clone();
                actions.extend_from_slice(r);
                out.add_term(actions, lc * rc);
            }
        }
        out
    }
}

impl<A: Action> Default for SymbolicOperator<A> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<A: Action> PartialEq for SymbolicOperator<A> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EQ_TOLERANCE)
    }
}

impl<A: Action> FromStr for SymbolicOperator<A> {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 1.0)
    }
}

impl<A: Action> FromIterator<(Term<A>, Complex64)> for SymbolicOperator<A> {
    fn from_iter<T: IntoIterator<Item = (Term<A>, Complex64)>>(iter: T) -> Self {
        let mut op = Self::zero();
        for (term, coeff) in iter {
            op.add_term(term, coeff);
        }
        op
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl<A: Action> AddAssign<&SymbolicOperator<A>> for SymbolicOperator<A> {
    fn add_assign(&mut self, rhs: &SymbolicOperator<A>) {
        for (term, coeff) in &rhs.terms {
            *self.terms.entry(term.clone()).or_default() += coeff;
        }
    }
}

impl<A: Action> AddAssign for SymbolicOperator<A> {
    fn add_assign(&mut self, rhs: Self) {
        for (term, coeff) in rhs.terms {
            *self.terms.entry(term).or_default() += coeff;
        }
    }
}

impl<A: Action> Add for SymbolicOperator<A> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<A: Action> SubAssign for SymbolicOperator<A> {
    fn sub_assign(&mut self, rhs: Self) {
        *self += -rhs;
    }
}

impl<A: Action> Sub for SymbolicOperator<A> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<A: Action> Neg for SymbolicOperator<A> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.scale(Complex64::new(-1.0, 0.0));
        self
    }
}

impl<A: Action> Mul<Complex64> for SymbolicOperator<A> {
    type Output = Self;

    fn mul(mut self, rhs: Complex64) -> Self {
        self.scale(rhs);
        self
    }
}

impl<A: Action> Mul<f64> for SymbolicOperator<A> {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self.scale(Complex64::new(rhs, 0.0));
        self
    }
}

impl<A: Action> Mul<&SymbolicOperator<A>> for &SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn mul(self, rhs: &SymbolicOperator<A>) -> SymbolicOperator<A> {
        self.product(rhs)
    }
}

impl<A: Action> Mul for SymbolicOperator<A> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.product(&rhs)
    }
}

impl<A: Action> MulAssign<&SymbolicOperator<A>> for SymbolicOperator<A> {
    fn mul_assign(&mut self, rhs: &SymbolicOperator<A>) {
        *self = self.product(rhs);
    }
}

// ---------------------------------------------------------------------------
// Formatting and serialization
// ---------------------------------------------------------------------------

/// Format a coefficient: plain real part when the imaginary part vanishes.
pub fn format_coefficient(c: Complex64) -> String {
    if c.im == 0.0 {
        format!("{}", c.re)
    } else {
        format!("({}{:+}j)", c.re, c.im)
    }
}

impl<A: Action> fmt::Display for SymbolicOperator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (term, coeff)) in self.terms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} [{}]", format_coefficient(*coeff), TermDisplay(term))?;
        }
        Ok(())
    }
}

impl<A: Action> From<SymbolicOperator<A>> for Vec<TermRecord> {
    fn from(op: SymbolicOperator<A>) -> Self {
        op.terms
            .iter()
            .map(|(term, coeff)| TermRecord {
                term: TermDisplay(term).to_string(),
                coefficient: *coeff,
            })
            .collect()
    }
}

impl<A: Action> TryFrom<Vec<TermRecord>> for SymbolicOperator<A> {
    type Error = OpsError;

    fn try_from(records: Vec<TermRecord>) -> Result<Self, Self::Error> {
        let mut op = Self::zero();
        for record in records {
            op.add_term(parse_term(&record.term)?, record.coefficient);
        }
        Ok(op)
    }
}
