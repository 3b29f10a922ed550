//! Fermion command implementation.

use anyhow::{Context, Result};
use console::style;
use lattop::{Basis, build_fermion, hubbard_interaction};

use super::common::{Export, LatticeSpec, OutputFormat, emit, load_config};

/// Execute the fermion command.
pub fn execute(
    input: &str,
    hubbard: Option<f64>,
    format: OutputFormat,
    output: Option<&str>,
    config: Option<&str>,
) -> Result<()> {
    eprintln!(
        "{} Building fermionic Hamiltonian from {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let config = load_config(config)?;
    let lattice = LatticeSpec::from_file(input)?.into_lattice()?;
    eprintln!(
        "  Loaded: {} sites, {} bonds",
        lattice.num_sites(),
        lattice.num_edges()
    );

    let (mut ham, indexer) =
        build_fermion(&lattice, &config).context("Failed to build Hamiltonian")?;

    if let Some(u) = hubbard {
        ham += hubbard_interaction(u, &indexer).context("Failed to build Hubbard interaction")?;
        eprintln!("  Added Hubbard interaction U = {}", style(u).yellow());
    }

    let ham = ham.compressed(config.drop_tolerance);
    eprintln!(
        "{} {} modes, {} terms",
        style("✓").green().bold(),
        indexer.len(),
        ham.len()
    );

    let content = match format {
        OutputFormat::Text => ham.to_string(),
        OutputFormat::Json => {
            let export = Export::new(Basis::Fermion, &indexer, ham.into());
            serde_json::to_string_pretty(&export)?
        }
    };
    emit(&content, output)
}
