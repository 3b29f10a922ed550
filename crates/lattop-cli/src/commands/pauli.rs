//! Pauli command implementation.

use anyhow::{Context, Result};
use lattop::pauli::{PAULI_LABELS, PAULI_LABELS_2};
use lattop::to_pauli_basis;
use lattop_ops::format_coefficient;
use num_complex::Complex64;

use super::common::{ValueSpec, load_config};

/// Execute the pauli command.
pub fn execute(matrix: &str, config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let lines = decompose(matrix, config.drop_tolerance)?;
    if lines.is_empty() {
        println!("0");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Pauli-basis coefficients of a JSON matrix, one `coefficient label` line
/// per coefficient above `tol`.
fn decompose(matrix: &str, tol: f64) -> Result<Vec<String>> {
    let spec: ValueSpec = serde_json::from_str(matrix).context("Invalid matrix JSON")?;
    let value = spec.to_local()?;
    let Some(m) = value.as_matrix() else {
        anyhow::bail!("Expected a 2x2 or 4x4 matrix, got a scalar");
    };

    let labels: Vec<String> = match m.dim() {
        (2, 2) => PAULI_LABELS.iter().map(|p| p.to_string()).collect(),
        _ => PAULI_LABELS_2.iter().map(|(a, b)| format!("{a}{b}")).collect(),
    };
    let coeffs = to_pauli_basis(m)?;

    Ok(labels
        .into_iter()
        .zip(coeffs.iter())
        .filter(|(_, c)| c.norm() > tol)
        .map(|(label, &c)| format!("{} {label}", format_coefficient(snap(c, tol))))
        .collect())
}

/// Zero out real or imaginary parts at or below `tol`.
fn snap(c: Complex64, tol: f64) -> Complex64 {
    let clean = |x: f64| if x.abs() <= tol { 0.0 } else { x };
    Complex64::new(clean(c.re), clean(c.im))
}
