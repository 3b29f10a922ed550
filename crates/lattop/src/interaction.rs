//! Interaction terms built on top of an existing mode assignment.

use std::fmt;
use std::hash::Hash;

use lattop_ops::{FermionOperator, Ladder};
use num_complex::Complex64;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{LattopError, LattopResult};
use crate::indexer::{Indexer, ModeKey};

/// On-site Hubbard interaction over the modes known to `indexer`.
///
/// For every site and every pair of internal degrees `s1 < s2` this adds
/// `U · n_{s1} n_{s2}`, written as `ix1^ ix1 ix2^ ix2`. Sites are visited in
/// the order their first mode was indexed. Single-mode sites contribute
/// nothing.
pub fn hubbard_interaction<S>(
    u: impl Into<Complex64>,
    indexer: &Indexer<ModeKey<S>>,
) -> LattopResult<FermionOperator>
where
    S: Clone + Eq + Hash + fmt::Debug,
{
    let u = u.into();

    let mut seen: FxHashSet<(&S, usize)> = FxHashSet::default();
    let mut sites = Vec::new();
    for key in indexer.elements() {
        if seen.insert((&key.site, key.dim)) {
            sites.push((&key.site, key.dim));
        }
    }

    let mut int_ham = FermionOperator::zero();
    for (site, dim) in sites {
        for s1 in 0..dim {
            for s2 in s1 + 1..dim {
                let ix1 = mode_index(indexer, site, s1, dim)?;
                let ix2 = mode_index(indexer, site, s2, dim)?;
                int_ham.add_term(
                    vec![
                        (ix1, Ladder::Raise),
                        (ix1, Ladder::Lower),
                        (ix2, Ladder::Raise),
                        (ix2, Ladder::Lower),
                    ],
                    u,
                );
            }
        }
    }

    debug!(n_terms = int_ham.len(), "Hubbard interaction built");
    Ok(int_ham)
}

fn mode_index<S>(
    indexer: &Indexer<ModeKey<S>>,
    site: &S,
    degree: usize,
    dim: usize,
) -> LattopResult<usize>
where
    S: Clone + Eq + Hash + fmt::Debug,
{
    let key = ModeKey::new(site.clone(), degree, dim);
    indexer
        .get(&key)
        .ok_or_else(|| LattopError::UnknownMode(key.to_string()))
}
