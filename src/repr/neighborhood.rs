use std::collections::{BTreeSet, btree_set};

use fxhash::FxHashMap;

use crate::element::Element;

/// The outgoing (or incoming) edges of a single node, grouped by the node at the other end.
///
/// Each neighbor maps to the ordered set of keys of all parallel edges leading to it.
/// A neighbor is only stored while at least one such edge exists.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyedNeighborhood<E: Element> {
    keys: FxHashMap<E, BTreeSet<E>>,
    num_edges: usize,
}

impl<E: Element> Default for KeyedNeighborhood<E> {
    fn default() -> Self {
        Self {
            keys: FxHashMap::default(),
            num_edges: 0,
        }
    }
}

impl<E: Element> KeyedNeighborhood<E> {
    /// Returns the number of distinct neighbors
    pub fn num_of_neighbors(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of edges, parallel edges counted individually
    pub fn num_of_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns an iterator over all neighbors in arbitrary order
    pub fn neighbors(&self) -> impl Iterator<Item = &E> + '_ {
        self.keys.keys()
    }

    /// Returns *true* if at least one edge leads to `v`
    pub fn has_neighbor(&self, v: &E) -> bool {
        self.keys.contains_key(v)
    }

    /// Returns the keys of all edges leading to `v`, if there are any
    pub fn keys_to(&self, v: &E) -> Option<&BTreeSet<E>> {
        self.keys.get(v)
    }

    /// Returns an iterator over the keys of all edges leading to `v` in ascending order
    pub fn iter_keys_to(&self, v: &E) -> btree_set::Iter<'_, E> {
        match self.keys.get(v) {
            Some(keys) => keys.iter(),
            None => btree_set::Iter::default(),
        }
    }

    /// Returns *true* if the edge to `v` labelled `k` exists
    pub fn has_edge(&self, v: &E, k: &E) -> bool {
        self.keys.get(v).is_some_and(|keys| keys.contains(k))
    }

    /// Tries to add the edge to `v` labelled `k`.
    /// Returns *true* if the edge was not present before.
    pub fn try_add(&mut self, v: E, k: E) -> bool {
        let added = self.keys.entry(v).or_default().insert(k);
        self.num_edges += added as usize;
        added
    }

    /// Tries to remove the edge to `v` labelled `k`.
    /// Returns *true* if the edge was present before.
    pub fn try_remove(&mut self, v: &E, k: &E) -> bool {
        let Some(keys) = self.keys.get_mut(v) else {
            return false;
        };

        if !keys.remove(k) {
            return false;
        }

        if keys.is_empty() {
            self.keys.remove(v);
        }
        self.num_edges -= 1;
        true
    }

    /// Removes all edges to `v` and returns their keys
    pub fn take_neighbor(&mut self, v: &E) -> Option<BTreeSet<E>> {
        let keys = self.keys.remove(v)?;
        self.num_edges -= keys.len();
        Some(keys)
    }

    /// Removes all edges and returns them grouped by neighbor
    pub fn drain(&mut self) -> impl Iterator<Item = (E, BTreeSet<E>)> + '_ {
        self.num_edges = 0;
        self.keys.drain()
    }
}
