/*!
# Keyed Multigraphs

[`MultiGraph`] is the single graph representation of this crate: nodes and edge keys are [`Element`]s,
and two nodes may be joined by any number of parallel edges as long as their keys differ.

## Design
- Every node owns a [`KeyedNeighborhood`] of outgoing edges. Directed graphs additionally store
  an incoming neighborhood per node, so predecessors are as cheap as successors.
- Undirected graphs store an edge in the neighborhoods of both endpoints; a loop is stored once.
- The orientation is a type parameter ([`Directed`] / [`Undirected`]), so the same code serves both.
*/

use std::{fmt, marker::PhantomData};

use fxhash::{FxBuildHasher, FxHashMap};
use itertools::Itertools;

use super::*;

/// A graph over [`Element`]s with keyed parallel edges.
///
/// # Type parameters
/// - `E`: the element type of nodes and edge keys.
/// - `D`: the orientation of edges, [`Directed`] by default.
#[derive(Clone)]
pub struct MultiGraph<E: Element, D: Direction = Directed> {
    out_nbs: FxHashMap<E, KeyedNeighborhood<E>>,
    /// Only maintained for directed graphs
    in_nbs: FxHashMap<E, KeyedNeighborhood<E>>,
    num_edges: usize,
    _direction: PhantomData<D>,
}

/// Multigraph whose edges have an orientation
pub type DirectedMultiGraph<E> = MultiGraph<E, Directed>;

/// Multigraph whose edges have no orientation
pub type UndirectedMultiGraph<E> = MultiGraph<E, Undirected>;

impl<E: Element, D: Direction> Default for MultiGraph<E, D> {
    fn default() -> Self {
        Self {
            out_nbs: FxHashMap::default(),
            in_nbs: FxHashMap::default(),
            num_edges: 0,
            _direction: PhantomData,
        }
    }
}

impl<E: Element, D: Direction> GraphType for MultiGraph<E, D> {
    type Dir = D;
    type Elem = E;
}

impl<E: Element, D: Direction> GraphNodeOrder for MultiGraph<E, D> {
    fn number_of_nodes(&self) -> usize {
        self.out_nbs.len()
    }

    fn nodes(&self) -> impl Iterator<Item = &E> + '_ {
        self.out_nbs.keys()
    }

    fn has_node(&self, u: &E) -> bool {
        self.out_nbs.contains_key(u)
    }
}

impl<E: Element, D: Direction> GraphEdgeOrder for MultiGraph<E, D> {
    fn number_of_edges(&self) -> usize {
        self.num_edges
    }
}

impl<E: Element, D: Direction> AdjacencyList for MultiGraph<E, D> {
    fn successors_of(&self, u: &E) -> impl Iterator<Item = &E> + '_ {
        self.out_nbs.get(u).into_iter().flat_map(|nbs| nbs.neighbors())
    }

    fn predecessors_of(&self, u: &E) -> impl Iterator<Item = &E> + '_ {
        let nbs = if D::DIRECTED {
            self.in_nbs.get(u)
        } else {
            self.out_nbs.get(u)
        };
        nbs.into_iter().flat_map(|nbs| nbs.neighbors())
    }

    fn keys_between(&self, u: &E, v: &E) -> impl Iterator<Item = &E> + '_ {
        self.out_nbs
            .get(u)
            .and_then(|nbs| nbs.keys_to(v))
            .into_iter()
            .flatten()
    }

    fn out_degree_of(&self, u: &E) -> usize {
        self.out_nbs.get(u).map_or(0, |nbs| nbs.num_of_edges())
    }

    fn in_degree_of(&self, u: &E) -> usize {
        if D::DIRECTED {
            self.in_nbs.get(u).map_or(0, |nbs| nbs.num_of_edges())
        } else {
            self.out_degree_of(u)
        }
    }

    fn is_isolated(&self, u: &E) -> bool {
        self.out_nbs
            .get(u)
            .is_none_or(|nbs| nbs.num_of_neighbors() == 0)
            && self
                .in_nbs
                .get(u)
                .is_none_or(|nbs| nbs.num_of_neighbors() == 0)
    }
}

impl<E: Element, D: Direction> AdjacencyTest for MultiGraph<E, D> {
    fn has_edge(&self, u: &E, v: &E, k: &E) -> bool {
        self.out_nbs.get(u).is_some_and(|nbs| nbs.has_edge(v, k))
    }

    fn has_any_edge(&self, u: &E, v: &E) -> bool {
        self.out_nbs.get(u).is_some_and(|nbs| nbs.has_neighbor(v))
    }
}

impl<E: Element, D: Direction> GraphNew for MultiGraph<E, D> {
    fn new() -> Self {
        Self::default()
    }

    fn with_capacity(n: usize) -> Self {
        let in_capacity = if D::DIRECTED { n } else { 0 };
        Self {
            out_nbs: FxHashMap::with_capacity_and_hasher(n, FxBuildHasher::default()),
            in_nbs: FxHashMap::with_capacity_and_hasher(in_capacity, FxBuildHasher::default()),
            ..Self::default()
        }
    }
}

impl<E: Element, D: Direction> GraphNodeEditing for MultiGraph<E, D> {
    fn add_node(&mut self, u: E) -> bool {
        if self.out_nbs.contains_key(&u) {
            return false;
        }

        if D::DIRECTED {
            self.in_nbs.insert(u.clone(), KeyedNeighborhood::default());
        }
        self.out_nbs.insert(u, KeyedNeighborhood::default());
        true
    }

    fn remove_node(&mut self, u: &E) -> bool {
        let Some(mut out) = self.out_nbs.remove(u) else {
            return false;
        };

        let mut removed = 0;
        for (v, keys) in out.drain() {
            removed += keys.len();
            if v == *u {
                continue;
            }

            let back = if D::DIRECTED {
                self.in_nbs.get_mut(&v)
            } else {
                self.out_nbs.get_mut(&v)
            };
            if let Some(nbs) = back {
                nbs.take_neighbor(u);
            }
        }

        if let Some(mut inc) = self.in_nbs.remove(u) {
            for (v, keys) in inc.drain() {
                // loops were already counted with the outgoing edges
                if v == *u {
                    continue;
                }

                removed += keys.len();
                if let Some(nbs) = self.out_nbs.get_mut(&v) {
                    nbs.take_neighbor(u);
                }
            }
        }

        self.num_edges -= removed;
        true
    }
}

impl<E: Element, D: Direction> GraphEdgeEditing for MultiGraph<E, D> {
    fn add_edge(&mut self, u: E, v: E, k: E) -> bool {
        self.add_node(u.clone());
        self.add_node(v.clone());

        let added = self
            .out_nbs
            .entry(u.clone())
            .or_default()
            .try_add(v.clone(), k.clone());
        if !added {
            return false;
        }

        if D::DIRECTED {
            self.in_nbs.entry(v).or_default().try_add(u, k);
        } else if u != v {
            self.out_nbs.entry(v).or_default().try_add(u, k);
        }

        self.num_edges += 1;
        true
    }

    fn remove_edge(&mut self, u: &E, v: &E, k: &E) -> bool {
        let removed = self
            .out_nbs
            .get_mut(u)
            .is_some_and(|nbs| nbs.try_remove(v, k));
        if !removed {
            return false;
        }

        let back = if D::DIRECTED {
            self.in_nbs.get_mut(v)
        } else if u != v {
            self.out_nbs.get_mut(v)
        } else {
            None
        };
        if let Some(nbs) = back {
            nbs.try_remove(u, k);
        }

        self.num_edges -= 1;
        true
    }
}

impl<E: Element, D: Direction> MultiGraph<E, D> {
    /// Renames node `old` to `new`, keeping all incident edges.
    /// If `new` already exists, both nodes are merged.
    /// Does nothing if `old` is not a node.
    ///
    /// Fails if `new` is not of the same kind as `old` (see [`Element::same_kind`]).
    pub fn replace_node(&mut self, old: &E, new: E) -> Result<()> {
        if !old.same_kind(&new) {
            return Err(GraphError::kind_mismatch(old, &new));
        }

        if !self.has_node(old) || *old == new {
            return Ok(());
        }

        let rename = |x: E| if x == *old { new.clone() } else { x };
        let incident = self
            .edges_from(old)
            .chain(self.edges_into(old))
            .map(|Edge(u, v, k)| Edge(rename(u), rename(v), k))
            .collect_vec();

        self.remove_node(old);
        self.add_node(new.clone());
        self.add_edges(incident);

        Ok(())
    }

    /// Replaces the key of `edge` by `new_key`.
    /// If `both_directions` is set, the reverse edge *(v,u)* with the same key is rekeyed as well.
    /// Edges that do not exist are ignored.
    ///
    /// Fails if `new_key` is not of the same kind as the old key (see [`Element::same_kind`]).
    pub fn replace_key(&mut self, edge: &Edge<E>, new_key: E, both_directions: bool) -> Result<()> {
        let Edge(u, v, k) = edge;
        if !k.same_kind(&new_key) {
            return Err(GraphError::kind_mismatch(k, &new_key));
        }

        if self.remove_edge(u, v, k) {
            self.add_edge(u.clone(), v.clone(), new_key.clone());
        }
        if both_directions && D::DIRECTED && self.remove_edge(v, u, k) {
            self.add_edge(v.clone(), u.clone(), new_key);
        }

        Ok(())
    }

    /// Returns the set of all nodes in ascending order
    pub fn ordered_nodes(&self) -> Vec<E> {
        self.nodes().cloned().sorted_unstable().collect()
    }
}

impl<E: Element> MultiGraph<E, Directed> {
    /// Returns the undirected version of the graph with the same nodes.
    ///
    /// An edge *(u,v,k)* only becomes an undirected edge if *(v,u,k)* exists as well,
    /// unless `keep_unidirectional` is set, in which case every edge is kept.
    pub fn to_undirected(&self, keep_unidirectional: bool) -> MultiGraph<E, Undirected> {
        let mut undirected = MultiGraph::with_capacity(self.number_of_nodes());
        undirected.add_nodes(self.nodes().cloned());
        undirected.add_edges(
            self.edges()
                .filter(|Edge(u, v, k)| keep_unidirectional || self.has_edge(v, u, k)),
        );
        undirected
    }
}

impl<E: Element> MultiGraph<E, Undirected> {
    /// Returns the directed version of the graph: every edge *{u,v}* becomes *(u,v)* and *(v,u)*
    pub fn to_directed(&self) -> MultiGraph<E, Directed> {
        let mut directed = MultiGraph::with_capacity(self.number_of_nodes());
        directed.add_nodes(self.nodes().cloned());
        for Edge(u, v, k) in self.edges() {
            directed.add_reversible_edge(u, v, k);
        }
        directed
    }
}

/// Two graphs are equal if they have the same nodes and the same edges (including keys)
impl<E: Element, D: Direction> PartialEq for MultiGraph<E, D> {
    fn eq(&self, other: &Self) -> bool {
        self.number_of_nodes() == other.number_of_nodes()
            && self.number_of_edges() == other.number_of_edges()
            && self.nodes().all(|u| other.has_node(u))
            && self
                .edges()
                .all(|Edge(u, v, k)| other.has_edge(&u, &v, &k))
    }
}

impl<E: Element, D: Direction> Eq for MultiGraph<E, D> {}

impl<E: Element, D: Direction> fmt::Debug for MultiGraph<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiGraph")
            .field("directed", &D::DIRECTED)
            .field("nodes", &self.ordered_nodes())
            .field("edges", &self.ordered_edges())
            .finish()
    }
}

test_graph_ops!(
    test_directed_multigraph,
    Directed,
    (GraphNodeEditing, AdjacencyList, GraphEdgeEditing)
);

test_graph_ops!(
    test_undirected_multigraph,
    Undirected,
    (GraphNodeEditing, AdjacencyList, GraphEdgeEditing)
);
