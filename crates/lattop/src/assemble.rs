//! Hamiltonian assembly.
//!
//! Walks a [`LatticeModel`] and accumulates the decomposition of every
//! on-site value and every bond into a single operator. The model is read
//! and validated in full before any term is produced, so a malformed model
//! never yields a partial Hamiltonian.

use std::fmt;
use std::hash::Hash;

use lattop_ops::{FermionOperator, QubitOperator};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{BuildConfig, EdgeConvention};
use crate::error::{LattopError, LattopResult};
use crate::indexer::{Indexer, ModeKey};
use crate::lattice::{Edge, LatticeModel};
use crate::value::LocalValue;
use crate::{fermion, qubit};

/// Target representation of the assembled operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Second-quantized ladder operators, one mode per site degree.
    Fermion,
    /// Pauli strings, one qubit per two-level site.
    Qubit,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Fermion => write!(f, "fermion"),
            Basis::Qubit => write!(f, "qubit"),
        }
    }
}

/// An assembled Hamiltonian in either basis.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Output of [`build_fermion`].
    Fermion(FermionOperator),
    /// Output of [`build_qubit`].
    Qubit(QubitOperator),
}

impl Operator {
    /// The basis this operator is expressed in.
    pub fn basis(&self) -> Basis {
        match self {
            Operator::Fermion(_) => Basis::Fermion,
            Operator::Qubit(_) => Basis::Qubit,
        }
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        match self {
            Operator::Fermion(op) => op.len(),
            Operator::Qubit(op) => op.len(),
        }
    }

    /// True if no terms are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the operator equals its Hermitian conjugate.
    pub fn is_hermitian(&self) -> bool {
        match self {
            Operator::Fermion(op) => op.is_hermitian(),
            Operator::Qubit(op) => op.is_hermitian(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Fermion(op) => fmt::Display::fmt(op, f),
            Operator::Qubit(op) => fmt::Display::fmt(op, f),
        }
    }
}

/// Build the Hamiltonian of `model` in the requested basis.
///
/// Returns the operator together with the indexer that maps mode (or qubit)
/// numbers back to `(site, degree, dim)` keys.
pub fn build<M: LatticeModel>(
    model: &M,
    basis: Basis,
    config: &BuildConfig,
) -> LattopResult<(Operator, Indexer<ModeKey<M::Site>>)> {
    match basis {
        Basis::Fermion => {
            build_fermion(model, config).map(|(op, ind)| (Operator::Fermion(op), ind))
        }
        Basis::Qubit => build_qubit(model, config).map(|(op, ind)| (Operator::Qubit(op), ind)),
    }
}

/// Build the second-quantized Hamiltonian of `model`.
///
/// The internal dimension of each site is read off its on-site value: a
/// scalar means one mode, an `n x n` matrix means `n` modes. Bond values
/// must then be shaped `(dim(head), dim(tail))`.
pub fn build_fermion<M: LatticeModel>(
    model: &M,
    config: &BuildConfig,
) -> LattopResult<(FermionOperator, Indexer<ModeKey<M::Site>>)> {
    let snapshot = Snapshot::take(model)?;
    debug!(
        n_sites = snapshot.onsite.len(),
        n_edges = snapshot.bonds.len(),
        edges = %config.edges,
        "Building fermionic Hamiltonian"
    );

    let mut dims: FxHashMap<M::Site, usize> = FxHashMap::default();
    for (site, value) in &snapshot.onsite {
        let n = value.site_dim().ok_or_else(|| LattopError::DimensionMismatch {
            location: format!("site {site:?}"),
            expected: "scalar or square matrix".to_string(),
            got: value.shape(),
        })?;
        dims.insert(site.clone(), n);
    }

    let mut ham = FermionOperator::zero();
    let mut indexer = Indexer::new();

    for (site, value) in &snapshot.onsite {
        let n = dims[site];
        let term = fermion::decompose_onsite(value, site, n, &mut indexer)?;
        trace!(site = ?site, dim = n, n_terms = term.len(), "On-site term");
        ham += term;
    }

    for (edge, value) in &snapshot.bonds {
        let shape = (dims[&edge.head], dims[&edge.tail]);
        let term = fermion::decompose(value, &edge.head, &edge.tail, shape, &mut indexer)?;
        trace!(head = ?edge.head, tail = ?edge.tail, n_terms = term.len(), "Bond term");
        if config.edges == EdgeConvention::Undirected {
            ham += term.hermitian_conjugated();
        }
        ham += term;
    }

    debug!(n_modes = indexer.len(), n_terms = ham.len(), "Fermionic Hamiltonian built");
    Ok((ham, indexer))
}

/// Build the spin (Pauli) Hamiltonian of `model`.
///
/// Every site is one qubit, numbered in site order. On-site values must be
/// 2x2 and bond values 4x4 with the head's factor on the left of the
/// Kronecker product. Under [`EdgeConvention::Undirected`] each bond
/// contributes `(V + V†) / 2`.
pub fn build_qubit<M: LatticeModel>(
    model: &M,
    config: &BuildConfig,
) -> LattopResult<(QubitOperator, Indexer<ModeKey<M::Site>>)> {
    let snapshot = Snapshot::take(model)?;
    debug!(
        n_sites = snapshot.onsite.len(),
        n_edges = snapshot.bonds.len(),
        edges = %config.edges,
        "Building qubit Hamiltonian"
    );

    let mut indexer = Indexer::new();
    for (site, _) in &snapshot.onsite {
        indexer.index(qubit_key(site));
    }

    let tol = config.drop_tolerance;
    let mut ham = QubitOperator::zero();

    for (site, value) in &snapshot.onsite {
        let q = indexer.index(qubit_key(site));
        let term = qubit::decompose_with_tolerance(value, q, q, tol)?;
        trace!(site = ?site, qubit = q, n_terms = term.len(), "On-site term");
        ham += term;
    }

    for (edge, value) in &snapshot.bonds {
        let qa = indexer.index(qubit_key(&edge.head));
        let qb = indexer.index(qubit_key(&edge.tail));
        let term = match config.edges {
            EdgeConvention::Undirected => {
                let half = qubit::decompose_with_tolerance(&value.scaled(0.5), qa, qb, tol)?;
                half.hermitian_conjugated() + half
            }
            EdgeConvention::Directed => qubit::decompose_with_tolerance(value, qa, qb, tol)?,
        };
        trace!(head = ?edge.head, tail = ?edge.tail, n_terms = term.len(), "Bond term");
        ham += term;
    }

    debug!(n_qubits = indexer.len(), n_terms = ham.len(), "Qubit Hamiltonian built");
    Ok((ham, indexer))
}

fn qubit_key<S: Clone>(site: &S) -> ModeKey<S> {
    ModeKey::new(site.clone(), 0, 2)
}

/// Everything the assembler needs from a model, read once and checked.
struct Snapshot<S> {
    onsite: Vec<(S, LocalValue)>,
    bonds: Vec<(Edge<S>, LocalValue)>,
}

impl<S: Clone + Eq + Hash + fmt::Debug> Snapshot<S> {
    fn take<M: LatticeModel<Site = S>>(model: &M) -> LattopResult<Self> {
        let sites = model.sites();
        let mut seen: FxHashSet<S> = FxHashSet::default();
        let mut onsite = Vec::with_capacity(sites.len());
        for site in sites {
            if !seen.insert(site.clone()) {
                return Err(LattopError::Capability(format!(
                    "site {site:?} is enumerated more than once"
                )));
            }
            let value = model.value(&site, &site).ok_or_else(|| {
                LattopError::Capability(format!("no on-site value for site {site:?}"))
            })?;
            onsite.push((site, value));
        }

        let edges = model.edges();
        let mut bonds = Vec::with_capacity(edges.len());
        for edge in edges {
            for end in [&edge.head, &edge.tail] {
                if !seen.contains(end) {
                    return Err(LattopError::Capability(format!(
                        "edge {:?} -> {:?} references unknown site {end:?}",
                        edge.head, edge.tail
                    )));
                }
            }
            if edge.head == edge.tail {
                return Err(LattopError::Capability(format!(
                    "edge from site {:?} to itself",
                    edge.head
                )));
            }
            let value = model.value(&edge.head, &edge.tail).ok_or_else(|| {
                LattopError::Capability(format!(
                    "no value for edge {:?} -> {:?}",
                    edge.head, edge.tail
                ))
            })?;
            bonds.push((edge, value));
        }

        Ok(Self { onsite, bonds })
    }
}
