//! Shared helpers for CLI commands.
//!
//! Lattice files look like
//!
//! ```yaml
//! sites:
//!   - { id: 0, onsite: 0.0 }
//!   - { id: up, onsite: [[1, 0], [0, 1]] }
//! hoppings:
//!   - { head: 0, tail: up, value: [[-1, {re: 0, im: 1}]] }
//! ```
//!
//! Site ids are integers or strings. A value is a real number, a complex
//! number `{re, im}`, or a matrix given as a list of rows of those.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use lattop::{Basis, BuildConfig, Indexer, Lattice, LatticeModel, LocalValue, ModeKey};
use lattop_ops::TermRecord;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a built operator is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `coefficient [term]` line per term
    Text,
    /// JSON document with terms and the mode table
    Json,
}

/// A site identifier as written in a lattice file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteLabel {
    Index(i64),
    Name(String),
}

impl fmt::Display for SiteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteLabel::Index(i) => write!(f, "{i}"),
            SiteLabel::Name(s) => write!(f, "{s}"),
        }
    }
}

/// A single matrix element or scalar.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ElementSpec {
    Real(f64),
    Complex {
        re: f64,
        #[serde(default)]
        im: f64,
    },
}

impl From<ElementSpec> for Complex64 {
    fn from(e: ElementSpec) -> Self {
        match e {
            ElementSpec::Real(re) => Complex64::new(re, 0.0),
            ElementSpec::Complex { re, im } => Complex64::new(re, im),
        }
    }
}

/// A scalar or a matrix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Scalar(ElementSpec),
    Matrix(Vec<Vec<ElementSpec>>),
}

impl ValueSpec {
    /// Convert into a [`LocalValue`], rejecting empty or ragged matrices.
    pub fn to_local(&self) -> lattop::LattopResult<LocalValue> {
        match self {
            ValueSpec::Scalar(e) => Ok(LocalValue::Scalar((*e).into())),
            ValueSpec::Matrix(rows) => LocalValue::from_rows(
                rows.iter()
                    .map(|row| row.iter().map(|&e| e.into()).collect())
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSpec {
    pub id: SiteLabel,
    pub onsite: ValueSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoppingSpec {
    pub head: SiteLabel,
    pub tail: SiteLabel,
    pub value: ValueSpec,
}

/// Contents of a lattice file.
#[derive(Debug, Clone, Deserialize)]
pub struct LatticeSpec {
    pub sites: Vec<SiteSpec>,
    #[serde(default)]
    pub hoppings: Vec<HoppingSpec>,
}

impl LatticeSpec {
    /// Parse a lattice description from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml_ng::from_str(source).context("Invalid lattice description")
    }

    /// Load a lattice description from a YAML file.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("File not found: {path}");
        }
        let source =
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
        Self::from_yaml_str(&source).with_context(|| format!("Failed to parse {path}"))
    }

    /// Build the in-memory lattice.
    ///
    /// Sites are kept in file order. A site listed twice or a second hopping
    /// on the same bond is an error rather than a silent overwrite.
    pub fn into_lattice(self) -> Result<Lattice<SiteLabel>> {
        let mut lattice = Lattice::new();
        for site in self.sites {
            if lattice.value(&site.id, &site.id).is_some() {
                anyhow::bail!("Site {} is listed more than once", site.id);
            }
            let onsite = site
                .onsite
                .to_local()
                .with_context(|| format!("Invalid on-site value for site {}", site.id))?;
            lattice.add_site(site.id, onsite);
        }
        for hop in self.hoppings {
            if lattice.value(&hop.head, &hop.tail).is_some() && hop.head != hop.tail {
                anyhow::bail!("Bond {} - {} is listed more than once", hop.head, hop.tail);
            }
            let value = hop
                .value
                .to_local()
                .with_context(|| format!("Invalid value for hopping {} -> {}", hop.head, hop.tail))?;
            lattice
                .add_hopping(&hop.head, &hop.tail, value)
                .with_context(|| format!("Invalid hopping {} -> {}", hop.head, hop.tail))?;
        }
        Ok(lattice)
    }
}

/// Load the build configuration, falling back to defaults.
pub fn load_config(path: Option<&str>) -> Result<BuildConfig> {
    match path {
        Some(p) => {
            let config = BuildConfig::from_file(p)
                .with_context(|| format!("Failed to load config: {p}"))?;
            debug!(path = p, edges = ?config.edges, tol = config.drop_tolerance, "loaded config");
            Ok(config)
        }
        None => Ok(BuildConfig::default()),
    }
}

/// One row of the mode table in JSON output.
#[derive(Debug, Serialize)]
pub struct ModeRecord {
    pub index: usize,
    pub site: SiteLabel,
    pub degree: usize,
    pub dim: usize,
}

/// JSON output document.
#[derive(Debug, Serialize)]
pub struct Export {
    pub basis: Basis,
    pub modes: Vec<ModeRecord>,
    pub terms: Vec<TermRecord>,
}

impl Export {
    pub fn new(basis: Basis, indexer: &Indexer<ModeKey<SiteLabel>>, terms: Vec<TermRecord>) -> Self {
        let modes = indexer
            .iter()
            .map(|(index, key)| ModeRecord {
                index,
                site: key.site.clone(),
                degree: key.degree,
                dim: key.dim,
            })
            .collect();
        Self {
            basis,
            modes,
            terms,
        }
    }
}

/// Write `content` to `output`, or to stdout when no file is given.
pub fn emit(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!("  Output: {}", style(path).green());
        }
        None => println!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_values() {
        let spec = LatticeSpec::from_yaml_str(
            "sites:\n  - { id: 0, onsite: 2 }\n  - { id: b, onsite: [[3, 0], [0, 3]] }\n\
             hoppings:\n  - { head: 0, tail: b, value: [[1, {re: -1, im: 0.5}]] }\n",
        )
        .unwrap();
        let lat = spec.into_lattice().unwrap();
        let a = SiteLabel::Index(0);
        let b = SiteLabel::Name("b".into());
        assert_eq!(lat.sites(), vec![a.clone(), b.clone()]);
        assert_eq!(lat.value(&a, &a), Some(LocalValue::real(2.0)));
        let hop = lat.value(&a, &b).unwrap();
        assert_eq!(hop.as_matrix().unwrap()[[0, 1]], Complex64::new(-1.0, 0.5));
    }

    #[test]
    fn test_ragged_matrix_is_rejected() {
        let spec =
            LatticeSpec::from_yaml_str("sites:\n  - { id: 0, onsite: [[1, 0], [0]] }\n").unwrap();
        let err = spec.into_lattice().unwrap_err();
        assert!(format!("{err:#}").contains("ragged"));
    }

    #[test]
    fn test_duplicate_site_is_rejected() {
        let spec =
            LatticeSpec::from_yaml_str("sites:\n  - { id: 0, onsite: 1 }\n  - { id: 0, onsite: 2 }\n")
                .unwrap();
        assert!(spec.into_lattice().is_err());
    }

    #[test]
    fn test_hopping_to_unknown_site() {
        let spec = LatticeSpec::from_yaml_str(
            "sites:\n  - { id: 0, onsite: 1 }\nhoppings:\n  - { head: 0, tail: 1, value: 1 }\n",
        )
        .unwrap();
        assert!(spec.into_lattice().is_err());
    }

    #[test]
    fn test_site_label_display() {
        assert_eq!(SiteLabel::Index(-3).to_string(), "-3");
        assert_eq!(SiteLabel::Name("up".into()).to_string(), "up");
    }
}
