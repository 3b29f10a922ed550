//! Error types for the operator algebra crate.

use thiserror::Error;

/// Errors produced while parsing or assembling symbolic operators.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OpsError {
    /// A token in a term string is not a valid action for the alphabet.
    #[error("Invalid action '{token}' in term string '{term}'")]
    InvalidAction {
        /// The offending token.
        token: String,
        /// The full term string being parsed.
        term: String,
    },
}

/// Result type for operator algebra operations.
pub type OpsResult<T> = Result<T, OpsError>;
