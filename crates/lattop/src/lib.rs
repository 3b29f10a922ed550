//! Lattop: lattice Hamiltonians to fermionic and Pauli operators
//!
//! A tight-binding model is a set of sites, each with an on-site value,
//! and a set of bonds, each with a coupling value. Values are scalars or
//! dense complex matrices over the internal degrees of freedom of a site
//! (spin, orbital, …). This crate turns such a model into:
//!
//! - a [`FermionOperator`], one mode per `(site, degree)` pair, via
//!   [`build_fermion`];
//! - a [`QubitOperator`], one qubit per two-level site, via
//!   [`build_qubit`];
//!
//! and can add an on-site Hubbard interaction on top of a fermionic build
//! with [`hubbard_interaction`].
//!
//! # Quick start
//!
//! ```rust
//! use lattop::{BuildConfig, Lattice, build_fermion, hubbard_interaction};
//!
//! // Three sites in a row, hopping amplitude 1.
//! let chain = Lattice::chain(3, 0.0, 1.0);
//! let (ham, modes) = build_fermion(&chain, &BuildConfig::default()).unwrap();
//! assert_eq!(modes.len(), 3);
//! assert!(ham.is_hermitian());
//!
//! // Spinless sites carry no Hubbard term.
//! let u = hubbard_interaction(4.0, &modes).unwrap();
//! assert!(u.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`lattice`]: the [`LatticeModel`] contract and an in-memory [`Lattice`]
//! - [`value`]: scalar or matrix [`LocalValue`]s
//! - [`indexer`]: stable `(site, degree, dim) -> mode` assignment
//! - [`fermion`], [`qubit`]: per-value decomposers
//! - [`pauli`], [`linalg`]: Pauli basis projection and its linear algebra
//! - [`assemble`]: walks a model and accumulates the operator
//! - [`interaction`]: Hubbard interaction over an existing mode assignment
//! - [`config`]: YAML-loadable [`BuildConfig`]

pub mod assemble;
pub mod config;
pub mod error;
pub mod fermion;
pub mod indexer;
pub mod interaction;
pub mod lattice;
pub mod linalg;
pub mod pauli;
pub mod qubit;
pub mod value;

pub use assemble::{Basis, Operator, build, build_fermion, build_qubit};
pub use config::{BuildConfig, EdgeConvention};
pub use error::{LattopError, LattopResult};
pub use indexer::{Indexer, ModeKey};
pub use interaction::hubbard_interaction;
pub use lattice::{Edge, Lattice, LatticeModel};
pub use pauli::{from_pauli_basis, to_pauli_basis};
pub use value::{LocalValue, ValueShape};

pub use lattop_ops::{FermionOperator, Ladder, Pauli, QubitOperator};
