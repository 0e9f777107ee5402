/*!
# Set Algebra on Graphs

Graphs over the same element type can be combined node- and edge-wise without any remapping:
- [`SetAlgebra::difference`] removes the edges (and optionally the nodes) of another graph,
- [`SetAlgebra::intersection`] keeps what is present in *all* graphs,
- [`SetAlgebra::union`] keeps what is present in *any* graph,
- [`MajorityIntersection`] keeps what is present in at least a given percentage of graphs.

The `*_counted` variants additionally report in how many of the input graphs every node, edge and
key occurred (see [`Occurrences`]).
*/

use itertools::Itertools;
use tracing::debug;

use super::*;

/// Number of input graphs that contained each node, edge and key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrences<E: Element> {
    pub nodes: ElementMap<E, usize>,
    pub edges: ElementMap<Edge<E>, usize>,
    pub keys: ElementMap<E, usize>,
}

impl<E: Element> Default for Occurrences<E> {
    fn default() -> Self {
        Self {
            nodes: ElementMap::default(),
            edges: ElementMap::default(),
            keys: ElementMap::default(),
        }
    }
}

impl<E: Element> Occurrences<E> {
    /// Counts the occurrences over all `graphs`
    pub fn count<G>(graphs: &[&G]) -> Self
    where
        G: AdjacencyList<Elem = E>,
    {
        let mut occurrences = Self::default();
        for graph in graphs {
            for u in graph.nodes() {
                *occurrences.nodes.entry(u.clone()).or_default() += 1;
            }
            for edge in graph.edges() {
                *occurrences.edges.entry(edge).or_default() += 1;
            }
            for key in graph.edge_keys() {
                *occurrences.keys.entry(key).or_default() += 1;
            }
        }
        occurrences
    }

    pub fn node_count(&self, u: &E) -> usize {
        self.nodes.get(u).copied().unwrap_or(0)
    }

    pub fn edge_count(&self, edge: &Edge<E>) -> usize {
        self.edges.get(edge).copied().unwrap_or(0)
    }

    pub fn key_count(&self, key: &E) -> usize {
        self.keys.get(key).copied().unwrap_or(0)
    }
}

/// Node- and edge-wise set operations between graphs of the same type
pub trait SetAlgebra: Subgraph + Clone {
    /// Returns a copy of `self` without the edges of `other`.
    /// With `also_subtract_nodes`, the nodes of `other` are removed as well, together with all
    /// their edges, even those that only exist in `self`.
    fn difference(&self, other: &Self, also_subtract_nodes: bool) -> Self {
        let mut result = self.clone();
        result.remove_edges(&other.edges().collect_vec());
        if also_subtract_nodes {
            result.remove_nodes(other.nodes());
        }
        result
    }

    /// Returns the nodes and edges present in `self` and in all `others`
    fn intersection<'a>(&self, others: impl IntoIterator<Item = &'a Self>) -> Self
    where
        Self: 'a,
    {
        self.intersection_counted(others).0
    }

    /// Like [`SetAlgebra::intersection`], also returning the [`Occurrences`] over all inputs
    fn intersection_counted<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
    ) -> (Self, Occurrences<Self::Elem>)
    where
        Self: 'a,
    {
        let graphs = inputs(self, others);
        let required = graphs.len();
        combine(&graphs, required)
    }

    /// Returns the nodes and edges present in `self` or in any of `others`
    fn union<'a>(&self, others: impl IntoIterator<Item = &'a Self>) -> Self
    where
        Self: 'a,
    {
        self.union_counted(others).0
    }

    /// Like [`SetAlgebra::union`], also returning the [`Occurrences`] over all inputs
    fn union_counted<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
    ) -> (Self, Occurrences<Self::Elem>)
    where
        Self: 'a,
    {
        combine(&inputs(self, others), 1)
    }

    /// Returns the nodes and edges present in at least `percentage` percent of `self` and `others`.
    /// See [`MajorityIntersection`] for details.
    fn majority_intersection<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
        percentage: f64,
    ) -> Result<Self>
    where
        Self: 'a,
    {
        MajorityIntersection::new()
            .percentage(percentage)
            .run(self, others)
    }

    /// Like [`SetAlgebra::majority_intersection`], also returning the [`Occurrences`] over all inputs
    fn majority_intersection_counted<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Self>,
        percentage: f64,
    ) -> Result<(Self, Occurrences<Self::Elem>)>
    where
        Self: 'a,
    {
        MajorityIntersection::new()
            .percentage(percentage)
            .run_counted(self, others)
    }
}

impl<G: Subgraph + Clone> SetAlgebra for G {}

fn inputs<'g, 'a: 'g, G: 'a>(first: &'g G, others: impl IntoIterator<Item = &'a G>) -> Vec<&'g G> {
    let mut graphs = vec![first];
    for other in others {
        graphs.push(other);
    }
    graphs
}

/// Builds the graph of all nodes and edges contained in at least `required` of `graphs`
fn combine<G>(graphs: &[&G], required: usize) -> (G, Occurrences<G::Elem>)
where
    G: AdjacencyList + GraphNodeEditing + GraphEdgeEditing,
{
    let occurrences = Occurrences::count(graphs);

    let mut result = G::with_capacity(occurrences.nodes.len());
    result.add_nodes(
        occurrences
            .nodes
            .iter()
            .filter(|(_, count)| **count >= required)
            .map(|(u, _)| u.clone()),
    );
    result.add_edges(
        occurrences
            .edges
            .iter()
            .filter(|(_, count)| **count >= required)
            .map(|(edge, _)| edge.clone()),
    );

    (result, occurrences)
}

/// Majority-intersection of several graphs.
///
/// With *n* input graphs and a percentage *p*, a node or edge is kept if it occurs in at least
/// `ceil(p / 100 * n)` graphs. If that effectively requires all graphs, this is an
/// [intersection](SetAlgebra::intersection); for two graphs and `p <= 50` it is a
/// [union](SetAlgebra::union).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorityIntersection {
    percentage: f64,
}

impl Default for MajorityIntersection {
    fn default() -> Self {
        Self { percentage: 51.0 }
    }
}

impl MajorityIntersection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the percentage of graphs an item has to occur in; must lie in `(0, 100]`
    pub fn set_percentage(&mut self, percentage: f64) {
        self.percentage = percentage;
    }

    /// Chainable version of [`MajorityIntersection::set_percentage`]
    pub fn percentage(mut self, percentage: f64) -> Self {
        self.set_percentage(percentage);
        self
    }

    /// Returns the number of graphs out of `num_graphs` an item has to occur in
    ///
    /// Fails with [`GraphError::InvalidMajorityPercentage`] if the percentage is not in `(0, 100]`.
    pub fn required_occurrences(&self, num_graphs: usize) -> Result<usize> {
        if !(self.percentage > 0.0 && self.percentage <= 100.0) {
            return Err(GraphError::InvalidMajorityPercentage(self.percentage));
        }
        Ok(((self.percentage / 100.0) * num_graphs as f64).ceil() as usize)
    }

    /// Computes the majority-intersection of `graph` and `others`
    pub fn run<'a, G>(&self, graph: &G, others: impl IntoIterator<Item = &'a G>) -> Result<G>
    where
        G: SetAlgebra + 'a,
    {
        Ok(self.run_counted(graph, others)?.0)
    }

    /// Like [`MajorityIntersection::run`], also returning the [`Occurrences`] over all inputs
    pub fn run_counted<'a, G>(
        &self,
        graph: &G,
        others: impl IntoIterator<Item = &'a G>,
    ) -> Result<(G, Occurrences<G::Elem>)>
    where
        G: SetAlgebra + 'a,
    {
        let others = others.into_iter().collect_vec();
        let num_graphs = others.len() + 1;
        let required = self.required_occurrences(num_graphs)?;

        if required >= num_graphs {
            debug!(
                percentage = self.percentage,
                num_graphs, "majority intersection degenerates to intersection"
            );
            return Ok(graph.intersection_counted(others));
        }

        if others.len() == 1 && self.percentage <= 50.0 {
            debug!(
                percentage = self.percentage,
                num_graphs, "majority intersection degenerates to union"
            );
            return Ok(graph.union_counted(others));
        }

        Ok(combine(&inputs(graph, others), required))
    }
}
