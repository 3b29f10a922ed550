//! Lattop Operator Algebra: symbolic fermionic and Pauli operators
//!
//! Provides the two operator families lattop emits:
//!
//! - [`FermionOperator`]: weighted products of creation/annihilation
//!   operators, e.g. `-1.0 [0^ 1]`
//! - [`QubitOperator`]: weighted Pauli strings, e.g. `0.5 [X0 Z1]`
//!
//! Both are instances of [`SymbolicOperator`], an accumulator mapping
//! ordered action sequences to complex coefficients. Operators support
//! addition, scalar and operator products, Hermitian conjugation and
//! tolerance-based equality in which zero-weight terms are ignored.
//!
//! # Quick start
//!
//! ```rust
//! use lattop_ops::{Pauli, QubitOperator};
//!
//! let h = QubitOperator::parse("X0 X1", 1.0).unwrap()
//!     + QubitOperator::parse("Z0", -0.5).unwrap();
//! assert_eq!(h.len(), 2);
//! assert_eq!(h.num_qubits(), 2);
//! assert!(h.is_hermitian());
//! assert_eq!(h.coefficient(&[(0, Pauli::Z)]).re, -0.5);
//! ```

pub mod error;
pub mod fermion;
pub mod qubit;
pub mod symbolic;

pub use error::{OpsError, OpsResult};
pub use fermion::{FermionOperator, Ladder};
pub use qubit::{Pauli, QubitOperator};
pub use symbolic::{
    Action, EQ_TOLERANCE, SymbolicOperator, Term, TermDisplay, TermRecord, format_coefficient,
    parse_term,
};
