/*!
# Paths

A [`Path`] alternates nodes and [`EdgeGroup`]s: `n0 -g1-> n1 -g2-> ... -> nk`.
All parallel edges between two consecutive nodes are merged into one group, so a path stands for
every walk that picks one key per hop.

Paths are immutable once built; [`PathBuilder`] is the mutable counterpart used by the searches.
A [`MarkedPath`] additionally remembers which of its keys and nodes are *special*.
*/

use std::{
    borrow::Borrow,
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt,
    hash::{Hash, Hasher},
};

use fxhash::FxHashSet;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::{
    element::Element,
    error::{GraphError, Result},
};

/// The keys of all parallel edges used for one hop of a [`Path`]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeGroup<E> {
    /// A hop with exactly one edge
    Single(E),
    /// A hop with at least two parallel edges; keys are sorted and distinct
    Parallel(SmallVec<[E; 4]>),
}

impl<E: Element> EdgeGroup<E> {
    /// Creates a group from the given keys. Duplicates are ignored.
    ///
    /// Fails with [`GraphError::EmptyEdgeGroup`] if `keys` is empty.
    pub fn new(keys: impl IntoIterator<Item = E>) -> Result<Self> {
        let mut keys: SmallVec<[E; 4]> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        if keys.len() > 1 {
            return Ok(Self::Parallel(keys));
        }
        keys.pop().map(Self::Single).ok_or(GraphError::EmptyEdgeGroup)
    }

    /// Returns the keys of the group in ascending order
    pub fn keys(&self) -> &[E] {
        match self {
            Self::Single(key) => std::slice::from_ref(key),
            Self::Parallel(keys) => keys,
        }
    }

    pub fn contains(&self, key: &E) -> bool {
        self.keys().binary_search(key).is_ok()
    }

    /// Returns the number of parallel edges in the group
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Always *false*: a group holds at least one key
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel(_))
    }
}

impl<E: fmt::Debug> fmt::Debug for EdgeGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(key) => write!(f, "{key:?}"),
            Self::Parallel(keys) => write!(f, "{{{}}}", keys.iter().map(|k| format!("{k:?}")).join(",")),
        }
    }
}

/// An alternating sequence of nodes and edge groups with at least one node.
///
/// Paths are compared, ordered and hashed structurally.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path<E> {
    nodes: Vec<E>,
    groups: Vec<EdgeGroup<E>>,
}

impl<E: Element> Path<E> {
    /// Returns the nodes of the path in order
    pub fn nodes(&self) -> &[E] {
        &self.nodes
    }

    /// Returns the edge groups of the path in order
    pub fn groups(&self) -> &[EdgeGroup<E>] {
        &self.groups
    }

    /// Returns the length of the path in nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always *false*: a path holds at least one node
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the number of hops, i.e. `len() - 1`
    pub fn hops(&self) -> usize {
        self.groups.len()
    }

    pub fn first_node(&self) -> &E {
        &self.nodes[0]
    }

    pub fn last_node(&self) -> &E {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Returns an iterator over all keys of all groups, hop by hop
    pub fn keys(&self) -> impl Iterator<Item = &E> + '_ {
        self.groups.iter().flat_map(|group| group.keys())
    }

    /// Returns *true* if any group of the path contains `key`
    pub fn contains_key(&self, key: &E) -> bool {
        self.groups.iter().any(|group| group.contains(key))
    }

    /// Returns an iterator over `(from, group, to)` for every hop
    pub fn steps(&self) -> impl Iterator<Item = (&E, &EdgeGroup<E>, &E)> + '_ {
        self.nodes
            .iter()
            .tuple_windows()
            .zip(&self.groups)
            .map(|((from, to), group)| (from, group, to))
    }
}

impl<E: Element> fmt::Debug for Path<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.first_node())?;
        for (_, group, to) in self.steps() {
            write!(f, " -{group:?}-> {to:?}")?;
        }
        Ok(())
    }
}

impl<E: Element> fmt::Display for Path<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Mutable path under construction
#[derive(Clone, Debug)]
pub struct PathBuilder<E> {
    nodes: Vec<E>,
    groups: Vec<EdgeGroup<E>>,
}

impl<E: Element> PathBuilder<E> {
    /// Starts a path at `start`
    pub fn new(start: E) -> Self {
        Self {
            nodes: vec![start],
            groups: Vec::new(),
        }
    }

    /// Appends a hop via the edges labelled `keys` to `node`.
    ///
    /// Fails with [`GraphError::EmptyEdgeGroup`] if `keys` is empty.
    pub fn push_hop(&mut self, keys: impl IntoIterator<Item = E>, node: E) -> Result<&mut Self> {
        self.groups.push(EdgeGroup::new(keys)?);
        self.nodes.push(node);
        Ok(self)
    }

    /// Removes the last hop and returns it. The start node is never removed.
    pub fn pop(&mut self) -> Option<(EdgeGroup<E>, E)> {
        let group = self.groups.pop()?;
        let node = self.nodes.pop()?;
        Some((group, node))
    }

    pub fn last_node(&self) -> &E {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Returns *true* if `node` is already on the path
    pub fn contains_node(&self, node: &E) -> bool {
        self.nodes.contains(node)
    }

    /// Returns the number of hops pushed so far
    pub fn hops(&self) -> usize {
        self.groups.len()
    }

    /// Returns a snapshot of the current path
    pub fn to_path(&self) -> Path<E> {
        Path {
            nodes: self.nodes.clone(),
            groups: self.groups.clone(),
        }
    }

    /// Consumes the builder and returns the path
    pub fn finish(self) -> Path<E> {
        Path {
            nodes: self.nodes,
            groups: self.groups,
        }
    }
}

/// A [`Path`] annotated with the special keys and special nodes found on it.
///
/// Equality, ordering and hashing only consider the path, so a set of marked paths
/// can be queried with plain paths.
#[derive(Clone, Debug)]
pub struct MarkedPath<E: Element> {
    path: Path<E>,
    special_keys: Option<BTreeSet<E>>,
    /// special key -> size of the parallel group it was found in
    parallel_special_keys: Option<BTreeMap<E, usize>>,
    special_nodes: Option<BTreeSet<E>>,
}

impl<E: Element> MarkedPath<E> {
    /// Marks the keys of `path` contained in `special_keys` and the nodes contained in `special_nodes`.
    ///
    /// Fails with [`GraphError::NothingToMark`] if both sets are omitted.
    pub fn new(
        path: Path<E>,
        special_keys: Option<&FxHashSet<E>>,
        special_nodes: Option<&FxHashSet<E>>,
    ) -> Result<Self> {
        if special_keys.is_none() && special_nodes.is_none() {
            return Err(GraphError::NothingToMark);
        }
        Ok(Self::mark(path, special_keys, special_nodes))
    }

    /// Marks the special keys of `path`
    pub fn with_special_keys(path: Path<E>, special_keys: &FxHashSet<E>) -> Self {
        Self::mark(path, Some(special_keys), None)
    }

    /// Marks the special nodes of `path`
    pub fn with_special_nodes(path: Path<E>, special_nodes: &FxHashSet<E>) -> Self {
        Self::mark(path, None, Some(special_nodes))
    }

    fn mark(
        path: Path<E>,
        special_keys: Option<&FxHashSet<E>>,
        special_nodes: Option<&FxHashSet<E>>,
    ) -> Self {
        let (special_keys, parallel_special_keys) = match special_keys {
            Some(special) => {
                let mut found = BTreeSet::new();
                let mut parallel = BTreeMap::new();
                for group in path.groups() {
                    for key in group.keys().iter().filter(|k| special.contains(*k)) {
                        found.insert(key.clone());
                        if group.is_parallel() {
                            parallel.insert(key.clone(), group.len());
                        }
                    }
                }
                (Some(found), Some(parallel))
            }
            None => (None, None),
        };

        let special_nodes = special_nodes.map(|special| {
            path.nodes()
                .iter()
                .filter(|u| special.contains(*u))
                .cloned()
                .collect()
        });

        Self {
            path,
            special_keys,
            parallel_special_keys,
            special_nodes,
        }
    }

    pub fn path(&self) -> &Path<E> {
        &self.path
    }

    pub fn into_path(self) -> Path<E> {
        self.path
    }

    /// Returns the special keys on the path, or `None` if no special keys were given
    pub fn special_keys(&self) -> Option<&BTreeSet<E>> {
        self.special_keys.as_ref()
    }

    /// Returns the special keys that were found in a parallel group, together with the size of that group
    pub fn parallel_special_keys(&self) -> Option<&BTreeMap<E, usize>> {
        self.parallel_special_keys.as_ref()
    }

    /// Returns the special nodes on the path, or `None` if no special nodes were given
    pub fn special_nodes(&self) -> Option<&BTreeSet<E>> {
        self.special_nodes.as_ref()
    }

    pub fn has_special_key(&self) -> bool {
        self.special_keys.as_ref().is_some_and(|keys| !keys.is_empty())
    }

    pub fn has_special_node(&self) -> bool {
        self.special_nodes.as_ref().is_some_and(|nodes| !nodes.is_empty())
    }
}

impl<E: Element> PartialEq for MarkedPath<E> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<E: Element> Eq for MarkedPath<E> {}

impl<E: Element> PartialOrd for MarkedPath<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Element> Ord for MarkedPath<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl<E: Element> Hash for MarkedPath<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl<E: Element> Borrow<Path<E>> for MarkedPath<E> {
    fn borrow(&self) -> &Path<E> {
        &self.path
    }
}

impl<E: Element> fmt::Display for MarkedPath<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}
