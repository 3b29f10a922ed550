//! Error types for the lattop core.

use thiserror::Error;

use crate::value::ValueShape;

/// Errors produced while translating a lattice model into an operator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LattopError {
    /// The lattice model does not provide what the assembler needs
    /// (an edge endpoint that is not a site, a duplicate site, a missing value).
    #[error("Lattice model capability error: {0}")]
    Capability(String),

    /// A local value's shape disagrees with the expected internal dimension.
    #[error("Dimension mismatch at {location}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Site, site pair or qubit pair the value is attached to.
        location: String,
        /// Description of the accepted shape.
        expected: String,
        /// Shape that was supplied.
        got: ValueShape,
    },

    /// A value is neither a scalar nor a well-formed rectangular matrix.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// A matrix cannot be projected onto the 2x2 or 4x4 Pauli basis.
    #[error("Cannot get Pauli coefficients of a {rows}x{cols} matrix (expected 2x2 or 4x4)")]
    PauliBasis {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// `Indexer::element` was asked for an index that was never assigned.
    #[error("Index {index} out of range for indexer with {len} elements")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of assigned indices.
        len: usize,
    },

    /// A mode key required by a term builder is absent from the indexer.
    #[error("Mode {0} has not been assigned an index")]
    UnknownMode(String),

    /// Matrix inversion met a (numerically) singular matrix.
    #[error("Matrix is singular")]
    SingularMatrix,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operator algebra error.
    #[error("Operator error: {0}")]
    Ops(#[from] lattop_ops::OpsError),
}

/// Result type for lattop operations.
pub type LattopResult<T> = Result<T, LattopError>;
