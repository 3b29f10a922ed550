//! Stable assignment of integer mode indices to composite keys.
//!
//! The operator algebra addresses modes by flat integers, while the lattice
//! addresses them by `(site, internal degree)`. An [`Indexer`] hands out
//! `0, 1, 2, …` in order of first appearance and remembers the mapping so
//! that the same key always resolves to the same integer.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{LattopError, LattopResult};

/// A fermionic mode (or qubit) as seen by the lattice.
///
/// `dim` is the number of internal degrees on `site`; it is part of the key
/// so that sites with different local dimensions can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModeKey<S> {
    /// Site identifier from the lattice model.
    pub site: S,
    /// Internal degree on that site, `0..dim`.
    pub degree: usize,
    /// Number of internal degrees on that site.
    pub dim: usize,
}

impl<S> ModeKey<S> {
    /// Create a new key.
    pub fn new(site: S, degree: usize, dim: usize) -> Self {
        Self { site, degree, dim }
    }
}

impl<S: fmt::Debug> fmt::Display for ModeKey<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {}/{})", self.site, self.degree, self.dim)
    }
}

/// Bijection between keys and `0..len`, in insertion order.
#[derive(Debug, Clone)]
pub struct Indexer<K> {
    elements: Vec<K>,
    index_by_element: FxHashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> Indexer<K> {
    /// Create an empty indexer.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            index_by_element: FxHashMap::default(),
        }
    }

    /// Return the index of `key`, assigning the next free one on first sight.
    pub fn index(&mut self, key: K) -> usize {
        if let Some(&ix) = self.index_by_element.get(&key) {
            return ix;
        }
        let ix = self.elements.len();
        self.elements.push(key.clone());
        self.index_by_element.insert(key, ix);
        ix
    }

    /// Return the index of `key` without assigning one.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.index_by_element.get(key).copied()
    }

    /// True if `key` has been assigned an index.
    pub fn contains(&self, key: &K) -> bool {
        self.index_by_element.contains_key(key)
    }

    /// Return the key that was assigned index `ix`.
    pub fn element(&self, ix: usize) -> LattopResult<&K> {
        self.elements.get(ix).ok_or(LattopError::IndexOutOfRange {
            index: ix,
            len: self.elements.len(),
        })
    }

    /// All keys, in assignment order.
    pub fn elements(&self) -> &[K] {
        &self.elements
    }

    /// Iterate over `(index, key)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &K)> {
        self.elements.iter().enumerate()
    }

    /// Number of assigned indices.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if nothing has been indexed yet.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K: Clone + Eq + Hash> Default for Indexer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for Indexer<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut indexer = Self::new();
        for key in iter {
            indexer.index(key);
        }
        indexer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let mut ind = Indexer::new();
        assert_eq!(ind.index("a"), 0);
        assert_eq!(ind.index("b"), 1);
        assert_eq!(ind.index("a"), 0);
        assert_eq!(*ind.element(0).unwrap(), "a");
        assert_eq!(ind.index("b"), 1);
        assert_eq!(ind.len(), 2);
    }

    #[test]
    fn test_element_out_of_range() {
        let ind: Indexer<u8> = [3, 1].into_iter().collect();
        assert!(matches!(
            ind.element(2),
            Err(LattopError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_dimension_disambiguates_keys() {
        let mut ind = Indexer::new();
        let a = ind.index(ModeKey::new(0, 0, 1));
        let b = ind.index(ModeKey::new(0, 0, 2));
        assert_ne!(a, b);
        assert_eq!(ind.get(&ModeKey::new(0, 0, 2)), Some(1));
        assert_eq!(ind.get(&ModeKey::new(0, 1, 2)), None);
    }

    #[test]
    fn test_mode_key_display() {
        assert_eq!(ModeKey::new("a", 1, 2).to_string(), "(\"a\", 1/2)");
    }
}
