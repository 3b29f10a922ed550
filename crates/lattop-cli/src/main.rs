//! lattop Command-Line Interface
//!
//! Translates lattice models described in YAML into fermionic or qubit
//! operators.
//!
//! ```text
//! lattop fermion -i hubbard.yaml --hubbard 4.0
//! lattop qubit -i heisenberg.yaml -f json -o ham.json
//! lattop pauli -m '[[0, 1], [1, 0]]'
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::OutputFormat;
use commands::{fermion, pauli, qubit};

/// lattop - lattice Hamiltonians to fermionic and Pauli operators
#[derive(Parser)]
#[command(name = "lattop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Build configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the second-quantized Hamiltonian of a lattice
    Fermion {
        /// Lattice description (YAML)
        #[arg(short, long)]
        input: String,

        /// Add an on-site Hubbard interaction of this strength
        #[arg(long)]
        hubbard: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the Pauli-string Hamiltonian of a lattice of two-level sites
    Qubit {
        /// Lattice description (YAML)
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the Pauli-basis coefficients of a 2x2 or 4x4 matrix
    Pauli {
        /// Matrix as JSON, e.g. '[[0, 1], [1, 0]]' or '[[{"re": 0, "im": 1}, ...]]'
        #[arg(short, long)]
        matrix: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Fermion {
            input,
            hubbard,
            format,
            output,
        } => fermion::execute(&input, hubbard, format, output.as_deref(), config),

        Commands::Qubit {
            input,
            format,
            output,
        } => qubit::execute(&input, format, output.as_deref(), config),

        Commands::Pauli { matrix } => pauli::execute(&matrix, config),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
