//! The lattice model seen by the assembler.
//!
//! [`LatticeModel`] is the contract a tight-binding system must satisfy to
//! be translated: an ordered list of sites, a list of bonds with a head and
//! a tail, and a deterministic `(site, site) -> value` lookup. [`Lattice`]
//! is a small in-memory implementation over a petgraph undirected graph.

use std::fmt;
use std::hash::Hash;

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;

use crate::error::{LattopError, LattopResult};
use crate::value::LocalValue;

/// A bond between two sites.
///
/// The value attached to an edge is the `head -> tail` coupling, i.e. the
/// matrix element `value(head, tail)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<S> {
    /// Row site of the coupling matrix.
    pub head: S,
    /// Column site of the coupling matrix.
    pub tail: S,
}

impl<S> Edge<S> {
    /// Create a new edge.
    pub fn new(head: S, tail: S) -> Self {
        Self { head, tail }
    }
}

/// A tight-binding system that can be translated into an operator.
///
/// Implementations must enumerate sites and edges in a stable order and
/// list every undirected bond exactly once.
pub trait LatticeModel {
    /// Opaque site identifier.
    type Site: Clone + Eq + Hash + fmt::Debug;

    /// All sites, in the model's native order.
    fn sites(&self) -> Vec<Self::Site>;

    /// All bonds, in the model's native order.
    fn edges(&self) -> Vec<Edge<Self::Site>>;

    /// On-site value when `i == j`, coupling value otherwise.
    ///
    /// Returns `None` when the model has no value for the pair.
    fn value(&self, i: &Self::Site, j: &Self::Site) -> Option<LocalValue>;
}

/// In-memory lattice backed by an undirected graph.
///
/// Nodes carry the on-site value; edges carry the coupling in the direction
/// it was inserted. Querying a bond against its stored direction returns
/// the conjugate transpose.
#[derive(Debug, Clone)]
pub struct Lattice<S> {
    graph: UnGraph<(S, LocalValue), LocalValue>,
    nodes: FxHashMap<S, NodeIndex>,
}

impl<S: Clone + Eq + Hash + fmt::Debug> Lattice<S> {
    /// Create an empty lattice.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            nodes: FxHashMap::default(),
        }
    }

    /// Add a site, or replace the on-site value of an existing one.
    pub fn add_site(&mut self, site: S, onsite: impl Into<LocalValue>) -> &mut Self {
        let onsite = onsite.into();
        match self.nodes.get(&site) {
            Some(&node) => self.graph[node].1 = onsite,
            None => {
                let node = self.graph.add_node((site.clone(), onsite));
                self.nodes.insert(site, node);
            }
        }
        self
    }

    /// Add the `head -> tail` coupling, replacing any existing bond between
    /// the two sites.
    pub fn add_hopping(
        &mut self,
        head: &S,
        tail: &S,
        value: impl Into<LocalValue>,
    ) -> LattopResult<&mut Self> {
        if head == tail {
            return Err(LattopError::Capability(format!(
                "hopping from site {head:?} to itself; use add_site for on-site values"
            )));
        }
        let h = self.node(head)?;
        let t = self.node(tail)?;
        let value = value.into();
        match self.graph.find_edge(h, t) {
            Some(edge) => {
                let stored_head = self.graph.edge_endpoints(edge).map(|(a, _)| a);
                self.graph[edge] = if stored_head == Some(h) {
                    value
                } else {
                    value.adjoint()
                };
            }
            None => {
                self.graph.add_edge(h, t, value);
            }
        }
        Ok(self)
    }

    /// Number of sites.
    pub fn num_sites(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of bonds.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    fn node(&self, site: &S) -> LattopResult<NodeIndex> {
        self.nodes
            .get(site)
            .copied()
            .ok_or_else(|| LattopError::Capability(format!("unknown site {site:?}")))
    }
}

impl Lattice<usize> {
    /// Open chain `0 - 1 - … - (len-1)` with uniform on-site and hopping values.
    pub fn chain(len: usize, onsite: impl Into<LocalValue>, hopping: impl Into<LocalValue>) -> Self {
        let onsite = onsite.into();
        let hopping = hopping.into();
        let mut lat = Self::new();
        for x in 0..len {
            lat.add_site(x, onsite.clone());
        }
        for x in 1..len {
            let h = lat.nodes[&(x - 1)];
            let t = lat.nodes[&x];
            lat.graph.add_edge(h, t, hopping.clone());
        }
        lat
    }
}

impl Lattice<(usize, usize)> {
    /// Open `lx x ly` square lattice with nearest-neighbour hopping.
    ///
    /// Sites are enumerated with `x` as the outer loop.
    pub fn square(
        lx: usize,
        ly: usize,
        onsite: impl Into<LocalValue>,
        hopping: impl Into<LocalValue>,
    ) -> Self {
        let onsite = onsite.into();
        let hopping = hopping.into();
        let mut lat = Self::new();
        for x in 0..lx {
            for y in 0..ly {
                lat.add_site((x, y), onsite.clone());
            }
        }
        for x in 0..lx {
            for y in 0..ly {
                let here = lat.nodes[&(x, y)];
                if x + 1 < lx {
                    let right = lat.nodes[&(x + 1, y)];
                    lat.graph.add_edge(here, right, hopping.clone());
                }
                if y + 1 < ly {
                    let up = lat.nodes[&(x, y + 1)];
                    lat.graph.add_edge(here, up, hopping.clone());
                }
            }
        }
        lat
    }
}

impl<S: Clone + Eq + Hash + fmt::Debug> Default for Lattice<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Eq + Hash + fmt::Debug> LatticeModel for Lattice<S> {
    type Site = S;

    fn sites(&self) -> Vec<S> {
        self.graph.node_weights().map(|(s, _)| s.clone()).collect()
    }

    fn edges(&self) -> Vec<Edge<S>> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(h, t)| Edge::new(self.graph[h].0.clone(), self.graph[t].0.clone()))
            .collect()
    }

    fn value(&self, i: &S, j: &S) -> Option<LocalValue> {
        let a = *self.nodes.get(i)?;
        if i == j {
            return Some(self.graph[a].1.clone());
        }
        let b = *self.nodes.get(j)?;
        let edge = self.graph.find_edge(a, b)?;
        let (head, _) = self.graph.edge_endpoints(edge)?;
        let value = &self.graph[edge];
        Some(if head == a { value.clone() } else { value.adjoint() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_chain_structure() {
        let lat = Lattice::chain(4, 1.0, -1.0);
        assert_eq!(lat.sites(), vec![0, 1, 2, 3]);
        assert_eq!(lat.num_edges(), 3);
        assert_eq!(lat.edges()[0], Edge::new(0, 1));
        assert_eq!(lat.value(&2, &2), Some(LocalValue::real(1.0)));
        assert_eq!(lat.value(&0, &2), None);
    }

    #[test]
    fn test_square_structure() {
        let lat = Lattice::square(2, 3, 0.0, -1.0);
        assert_eq!(lat.num_sites(), 6);
        // 2 * (3 - 1) vertical + (2 - 1) * 3 horizontal
        assert_eq!(lat.num_edges(), 7);
        assert_eq!(lat.sites()[1], (0, 1));
    }

    #[test]
    fn test_reverse_lookup_is_adjoint() {
        let mut lat = Lattice::new();
        lat.add_site("a", 2.0).add_site("b", LocalValue::identity(2));
        lat.add_hopping(&"a", &"b", array![[1.0, -1.0]]).unwrap();
        let forward = lat.value(&"a", &"b").unwrap();
        let backward = lat.value(&"b", &"a").unwrap();
        assert_eq!(backward, forward.adjoint());
        assert_eq!(lat.edges(), vec![Edge::new("a", "b")]);
    }

    #[test]
    fn test_replacing_hopping_in_reverse_direction() {
        let mut lat = Lattice::new();
        lat.add_site(0, 0.0).add_site(1, 0.0);
        lat.add_hopping(&0, &1, LocalValue::Scalar(num_complex::Complex64::new(0.0, 1.0)))
            .unwrap();
        lat.add_hopping(&1, &0, LocalValue::Scalar(num_complex::Complex64::new(0.0, 2.0)))
            .unwrap();
        assert_eq!(lat.num_edges(), 1);
        assert_eq!(
            lat.value(&1, &0),
            Some(LocalValue::Scalar(num_complex::Complex64::new(0.0, 2.0)))
        );
    }

    #[test]
    fn test_hopping_requires_known_sites() {
        let mut lat = Lattice::new();
        lat.add_site(0, 1.0);
        assert!(matches!(
            lat.add_hopping(&0, &7, 1.0),
            Err(LattopError::Capability(_))
        ));
        assert!(lat.add_hopping(&0, &0, 1.0).is_err());
    }
}
