use std::fmt::Debug;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;

use crate::{edge::Edge, element::Element, utils::Membership};

/// Orientation of the edges of a graph
pub trait Direction: Debug + Clone + Copy + Default + PartialEq + Eq + 'static {
    /// *true* if `Edge(u, v, k)` and `Edge(v, u, k)` are distinct edges
    const DIRECTED: bool;
}

/// Marker for graphs whose edges have an orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Directed;

/// Marker for graphs whose edges have no orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

impl Direction for Directed {
    const DIRECTED: bool = true;
}

impl Direction for Undirected {
    const DIRECTED: bool = false;
}

/// Ties a graph to its element type and edge orientation
pub trait GraphType {
    type Dir: Direction;
    type Elem: Element;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        Self::Dir::DIRECTED
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder: GraphType {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> usize;

    /// Returns an iterator over V in arbitrary order
    fn nodes(&self) -> impl Iterator<Item = &Self::Elem> + '_;

    /// Returns *true* if `u` is a node of the graph
    fn has_node(&self, u: &Self::Elem) -> bool;

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder: GraphType {
    /// Returns the number of edges of the graph, parallel edges counted individually
    fn number_of_edges(&self) -> usize;

    /// Returns *true* if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + GraphEdgeOrder + Sized {
    /// Returns an iterator over the successors of `u`. Empty if `u` is not a node.
    ///
    /// For undirected graphs, these are all neighbors.
    fn successors_of(&self, u: &Self::Elem) -> impl Iterator<Item = &Self::Elem> + '_;

    /// Returns an iterator over the predecessors of `u`. Empty if `u` is not a node.
    ///
    /// For undirected graphs, this is equivalent to [`AdjacencyList::successors_of`].
    fn predecessors_of(&self, u: &Self::Elem) -> impl Iterator<Item = &Self::Elem> + '_;

    /// Returns an iterator over the keys of all direct edges *(u,v)*.
    /// Never considers multi-hop connections.
    fn keys_between(&self, u: &Self::Elem, v: &Self::Elem)
    -> impl Iterator<Item = &Self::Elem> + '_;

    /// Returns successors and predecessors of `u`; may contain duplicates
    fn neighbors_of(&self, u: &Self::Elem) -> impl Iterator<Item = &Self::Elem> + '_ {
        self.successors_of(u).chain(self.predecessors_of(u))
    }

    /// Returns the number of outgoing edges of `u`
    fn out_degree_of(&self, u: &Self::Elem) -> usize {
        self.successors_of(u)
            .map(|v| self.keys_between(u, v).count())
            .sum()
    }

    /// Returns the number of incoming edges of `u`
    fn in_degree_of(&self, u: &Self::Elem) -> usize {
        self.predecessors_of(u)
            .map(|v| self.keys_between(v, u).count())
            .sum()
    }

    /// Returns *true* if no edge starts or ends at `u`
    fn is_isolated(&self, u: &Self::Elem) -> bool {
        self.neighbors_of(u).next().is_none()
    }

    /// Returns an iterator over all nodes without any incident edge
    fn isolated_nodes(&self) -> impl Iterator<Item = &Self::Elem> + '_ {
        self.nodes().filter(|u| self.is_isolated(u))
    }

    /// Returns an iterator over all direct edges *(u,v)*
    fn edges_between(
        &self,
        u: &Self::Elem,
        v: &Self::Elem,
    ) -> impl Iterator<Item = Edge<Self::Elem>> + '_ {
        let (u, v) = (u.clone(), v.clone());
        self.keys_between(&u, &v)
            .map(|k| Edge(u.clone(), v.clone(), k.clone()))
            .collect_vec()
            .into_iter()
    }

    /// Returns an iterator over all outgoing edges of `u`
    fn edges_from(&self, u: &Self::Elem) -> impl Iterator<Item = Edge<Self::Elem>> + '_ {
        self.successors_of(u)
            .flat_map(|v| self.edges_between(u, v))
            .collect_vec()
            .into_iter()
    }

    /// Returns an iterator over all incoming edges of `u`
    fn edges_into(&self, u: &Self::Elem) -> impl Iterator<Item = Edge<Self::Elem>> + '_ {
        self.predecessors_of(u)
            .flat_map(|v| self.edges_between(v, u))
            .collect_vec()
            .into_iter()
    }

    /// Returns an iterator over all edges in the graph.
    /// For undirected graphs, each edge is reported once in its normalized form.
    fn edges(&self) -> impl Iterator<Item = Edge<Self::Elem>> + '_ {
        self.nodes().flat_map(move |u| {
            self.successors_of(u)
                .filter(move |v| Self::Dir::DIRECTED || u <= *v)
                .flat_map(move |v| {
                    self.keys_between(u, v)
                        .map(move |k| Edge(u.clone(), v.clone(), k.clone()))
                })
        })
    }

    /// Returns all edges in sorted order
    fn ordered_edges(&self) -> Vec<Edge<Self::Elem>> {
        let mut edges = self.edges().collect_vec();
        edges.sort_unstable();
        edges
    }

    /// Returns the set of all keys labelling at least one edge
    fn edge_keys(&self) -> FxHashSet<Self::Elem> {
        self.edges().map(|Edge(_, _, k)| k).collect()
    }

    /// Returns all edges grouped by their key
    fn edges_for_key(&self) -> FxHashMap<Self::Elem, Vec<Edge<Self::Elem>>> {
        let mut groups: FxHashMap<Self::Elem, Vec<Edge<Self::Elem>>> = FxHashMap::default();
        for edge in self.edges() {
            groups.entry(edge.2.clone()).or_default().push(edge);
        }
        groups
    }

    /// Returns all edges with no reverse edge carrying the same key.
    /// Always empty for undirected graphs.
    fn unidirectional_edges(&self) -> FxHashSet<Edge<Self::Elem>>
    where
        Self: AdjacencyTest,
    {
        if !Self::Dir::DIRECTED {
            return FxHashSet::default();
        }
        self.edges()
            .filter(|Edge(u, v, k)| !self.has_edge(v, u, k))
            .collect()
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphType {
    /// Returns *true* if the edge *(u,v)* labelled `k` exists in the graph.
    fn has_edge(&self, u: &Self::Elem, v: &Self::Elem, k: &Self::Elem) -> bool;

    /// Returns *true* if any edge *(u,v)* exists in the graph.
    fn has_any_edge(&self, u: &Self::Elem, v: &Self::Elem) -> bool;

    /// Returns *true* if a self-loop *(u,u)* exists.
    fn has_self_loop(&self, u: &Self::Elem) -> bool {
        self.has_any_edge(u, u)
    }

    /// Returns *true* if *(u,v,k)* as well as *(v,u,k)* exist.
    /// Note that for undirected graphs this is equivalent to [`AdjacencyTest::has_edge`].
    fn has_bidirected_edge(&self, u: &Self::Elem, v: &Self::Elem, k: &Self::Elem) -> bool {
        self.has_edge(u, v, k) && self.has_edge(v, u, k)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph
    fn new() -> Self;

    /// Creates an empty graph with room for `n` nodes
    fn with_capacity(n: usize) -> Self;
}

/// Provides functions to insert/delete nodes
pub trait GraphNodeEditing: GraphType {
    /// Adds `u` to the graph.
    /// Returns *true* exactly if the node was not present previously.
    fn add_node(&mut self, u: Self::Elem) -> bool;

    /// Adds all nodes in the collection
    fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Self::Elem>) {
        for u in nodes {
            self.add_node(u);
        }
    }

    /// Removes `u` and all of its incident edges.
    /// Returns *true* exactly if the node was present previously.
    fn remove_node(&mut self, u: &Self::Elem) -> bool;

    /// Removes all nodes in the collection; absent nodes are ignored
    fn remove_nodes<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Self::Elem>)
    where
        Self::Elem: 'a,
    {
        for u in nodes {
            self.remove_node(u);
        }
    }

    /// Removes all nodes without incident edges
    fn remove_isolated_nodes(&mut self)
    where
        Self: AdjacencyList,
    {
        let isolated = self.isolated_nodes().cloned().collect_vec();
        self.remove_nodes(&isolated);
    }
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNew + GraphType {
    /// Adds the edge *(u,v)* labelled `k`, creating missing endpoints.
    /// Returns *true* exactly if the edge was not present previously.
    fn add_edge(&mut self, u: Self::Elem, v: Self::Elem, k: Self::Elem) -> bool;

    /// Adds the edges *(u,v)* and *(v,u)*, both labelled `k`
    fn add_reversible_edge(&mut self, u: Self::Elem, v: Self::Elem, k: Self::Elem) {
        self.add_edge(v.clone(), u.clone(), k.clone());
        self.add_edge(u, v, k);
    }

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge<Self::Elem>>>) {
        for Edge(u, v, k) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v, k);
        }
    }

    /// Removes the edge *(u,v)* labelled `k`, i.e. the edge FROM u TO v.
    /// Returns *true* if the edge was removed and *false* if it did not exist.
    /// Nodes are never removed.
    fn remove_edge(&mut self, u: &Self::Elem, v: &Self::Elem, k: &Self::Elem) -> bool;

    /// Removes *(u,v,k)* as well as *(v,u,k)*.
    /// Returns the number of removed edges.
    fn remove_edge_both_directions(
        &mut self,
        u: &Self::Elem,
        v: &Self::Elem,
        k: &Self::Elem,
    ) -> usize {
        self.remove_edge(u, v, k) as usize + self.remove_edge(v, u, k) as usize
    }

    /// Removes all edges in the collection; absent edges are ignored.
    /// Returns the edges that were actually removed.
    fn remove_edges<'a>(
        &mut self,
        edges: impl IntoIterator<Item = &'a Edge<Self::Elem>>,
    ) -> Vec<Edge<Self::Elem>>
    where
        Self::Elem: 'a,
    {
        edges
            .into_iter()
            .filter(|Edge(u, v, k)| self.remove_edge(u, v, k))
            .cloned()
            .collect()
    }

    /// Removes every edge labelled by a key in `keys`
    fn remove_edges_by_keys<S>(&mut self, keys: &S) -> Vec<Edge<Self::Elem>>
    where
        Self: AdjacencyList,
        S: Membership<Self::Elem> + ?Sized,
    {
        let doomed = self
            .edges()
            .filter(|Edge(_, _, k)| keys.contains(k))
            .collect_vec();
        self.remove_edges(&doomed)
    }
}

/// A super trait for creating a graph from scratch from a set of edges
pub trait GraphFromScratch: GraphType {
    /// Create a graph from an iterator over edges
    fn from_edges(edges: impl IntoIterator<Item = impl Into<Edge<Self::Elem>>>) -> Self;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges(edges: impl IntoIterator<Item = impl Into<Edge<Self::Elem>>>) -> Self {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }
}
