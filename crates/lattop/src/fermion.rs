//! Fermionic decomposition of local values.
//!
//! A value `V` attached to the site pair `(a, b)` becomes
//!
//!   Σ_{s1, s2}  V[s1, s2] · c†_{a,s1} c_{b,s2}
//!
//! with mode indices resolved through an [`Indexer`] keyed by
//! `(site, degree, dim)`.

use std::fmt;
use std::hash::Hash;

use lattop_ops::{FermionOperator, Ladder};

use crate::error::{LattopError, LattopResult};
use crate::indexer::{Indexer, ModeKey};
use crate::value::LocalValue;

/// Decompose `value` on `(site_a, site_b)` into mode-pair terms.
///
/// `dims` holds the internal dimensions of the two sites. A scalar is only
/// accepted when both are 1; a matrix must have exactly `dims` as its shape.
pub fn decompose<S>(
    value: &LocalValue,
    site_a: &S,
    site_b: &S,
    dims: (usize, usize),
    indexer: &mut Indexer<ModeKey<S>>,
) -> LattopResult<FermionOperator>
where
    S: Clone + Eq + Hash + fmt::Debug,
{
    let (n_a, n_b) = dims;
    match value {
        LocalValue::Scalar(c) if dims == (1, 1) => {
            let ix1 = indexer.index(ModeKey::new(site_a.clone(), 0, 1));
            let ix2 = indexer.index(ModeKey::new(site_b.clone(), 0, 1));
            Ok(FermionOperator::hopping(ix1, ix2, *c))
        }
        LocalValue::Matrix(m) if m.dim() == dims => {
            let mut op = FermionOperator::zero();
            for s1 in 0..n_a {
                for s2 in 0..n_b {
                    let ix1 = indexer.index(ModeKey::new(site_a.clone(), s1, n_a));
                    let ix2 = indexer.index(ModeKey::new(site_b.clone(), s2, n_b));
                    op.add_term(vec![(ix1, Ladder::Raise), (ix2, Ladder::Lower)], m[[s1, s2]]);
                }
            }
            Ok(op)
        }
        _ => Err(LattopError::DimensionMismatch {
            location: location(site_a, site_b),
            expected: if dims == (1, 1) {
                "scalar or 1x1 matrix".to_string()
            } else {
                format!("{n_a}x{n_b} matrix")
            },
            got: value.shape(),
        }),
    }
}

/// Decompose an on-site value of a site with `n` internal degrees.
pub fn decompose_onsite<S>(
    value: &LocalValue,
    site: &S,
    n: usize,
    indexer: &mut Indexer<ModeKey<S>>,
) -> LattopResult<FermionOperator>
where
    S: Clone + Eq + Hash + fmt::Debug,
{
    decompose(value, site, site, (n, n), indexer)
}

fn location<S: PartialEq + fmt::Debug>(a: &S, b: &S) -> String {
    if a == b {
        format!("site {a:?}")
    } else {
        format!("bond {a:?} -> {b:?}")
    }
}
