//! Build configuration.
//!
//! Supports loading from YAML; every field has a default so an empty
//! document is a valid configuration.
//!
//! ```yaml
//! edges: undirected      # or: directed
//! drop_tolerance: 1.0e-12
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LattopError, LattopResult};
use crate::qubit::DEFAULT_DROP_TOLERANCE;

/// How the assembler interprets the model's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeConvention {
    /// Each edge is one undirected bond: the coupling and its Hermitian
    /// conjugate are both added (qubit couplings are halved first).
    #[default]
    Undirected,
    /// The model already lists both directions: each edge is added as-is.
    Directed,
}

impl fmt::Display for EdgeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeConvention::Undirected => write!(f, "undirected"),
            EdgeConvention::Directed => write!(f, "directed"),
        }
    }
}

/// Options for a Hamiltonian build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Edge interpretation.
    #[serde(default)]
    pub edges: EdgeConvention,

    /// Pauli coefficients with modulus at or below this are not emitted.
    #[serde(default = "default_drop_tolerance")]
    pub drop_tolerance: f64,
}

fn default_drop_tolerance() -> f64 {
    DEFAULT_DROP_TOLERANCE
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            edges: EdgeConvention::default(),
            drop_tolerance: default_drop_tolerance(),
        }
    }
}

impl BuildConfig {
    /// Parse a configuration from a YAML document.
    pub fn from_yaml_str(source: &str) -> LattopResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(source).map_err(|e| LattopError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> LattopResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| LattopError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&source)
    }

    /// Override the edge convention.
    #[must_use]
    pub fn with_edges(mut self, edges: EdgeConvention) -> Self {
        self.edges = edges;
        self
    }

    /// Override the drop tolerance.
    #[must_use]
    pub fn with_drop_tolerance(mut self, tol: f64) -> Self {
        self.drop_tolerance = tol;
        self
    }

    fn validate(&self) -> LattopResult<()> {
        if !(self.drop_tolerance >= 0.0 && self.drop_tolerance.is_finite()) {
            return Err(LattopError::Config(format!(
                "drop_tolerance must be a finite non-negative number, got {}",
                self.drop_tolerance
            )));
        }
        Ok(())
    }
}
