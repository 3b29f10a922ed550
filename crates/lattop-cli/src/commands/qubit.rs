//! Qubit command implementation.

use anyhow::{Context, Result};
use console::style;
use lattop::{Basis, build_qubit};

use super::common::{Export, LatticeSpec, OutputFormat, emit, load_config};

/// Execute the qubit command.
pub fn execute(
    input: &str,
    format: OutputFormat,
    output: Option<&str>,
    config: Option<&str>,
) -> Result<()> {
    eprintln!(
        "{} Building qubit Hamiltonian from {}",
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

    let (ham, indexer) = build_qubit(&lattice, &config).context("Failed to build Hamiltonian")?;
    let ham = ham.compressed(config.drop_tolerance);
    eprintln!(
        "{} {} qubits, {} terms",
        style("✓").green().bold(),
        indexer.len(),
        ham.len()
    );

    let content = match format {
        OutputFormat::Text => ham.to_string(),
        OutputFormat::Json => {
            let export = Export::new(Basis::Qubit, &indexer, ham.into());
            serde_json::to_string_pretty(&export)?
        }
    };
    emit(&content, output)
}
