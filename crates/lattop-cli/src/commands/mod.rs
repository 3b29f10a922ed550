//! CLI command implementations.

pub mod common;
pub mod fermion;
pub mod pauli;
pub mod qubit;
