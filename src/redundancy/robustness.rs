/*!
# Robustness

A key is *robust* if the graph does not break when all edges labelled with it disappear:
for each such edge *(s, t, k)*, `t` must still be reachable from `s` in the graph without `k`.
The shortest of these detours are the *redundant paths* of the edge.

Keys are removed one at a time from a single working copy of the graph and restored right after,
so at most one key is missing at any point.
*/

use tracing::{debug, trace};

use super::*;

/// Robustness of every key of a graph
#[derive(Debug, Clone)]
pub struct Robustness<E: Element> {
    side: SidePaths<E>,
    redundant_edge_path_counts: ElementMap<Edge<E>, usize>,
    non_redundant_edges: ElementSet<Edge<E>>,
}

impl<E: Element> Robustness<E> {
    /// Computes the robustness of all keys of `graph`; see [`RedundancyAnalysis`] for options
    pub fn new<G>(graph: &G) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        RedundancyAnalysis::new().robustness(graph)
    }

    /// Computes the robustness of all keys, editing `graph` in place and restoring it per key
    pub(super) fn compute<G>(mut graph: G) -> Self
    where
        G: AdjacencyList<Elem = E> + GraphEdgeEditing,
    {
        let mut side = SidePaths::default();
        let mut redundant_edge_path_counts = ElementMap::default();
        let mut non_redundant_edges = ElementSet::default();

        let edges_for_key = graph.edges_for_key();
        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            keys = edges_for_key.len(),
            "computing robustness"
        );

        for (key, edges) in edges_for_key {
            let mut key_paths = ElementSet::default();
            let mut redundant_edges = 0;
            {
                let pruned = graph.without_edges(&edges);
                for edge in &edges {
                    let paths = pruned.shortest_paths_between(edge.source(), edge.target());
                    if paths.is_empty() {
                        non_redundant_edges.insert(edge.clone());
                    } else {
                        redundant_edges += 1;
                        redundant_edge_path_counts.insert(edge.clone(), paths.len());
                        key_paths.extend(paths);
                    }
                }
            }

            let class = side.classes.classify(key.clone(), redundant_edges, edges.len());
            trace!(?key, edges = edges.len(), redundant_edges, ?class, "robustness of key");
            side.record(&key, key_paths);
        }

        let result = Self {
            side,
            redundant_edge_path_counts,
            non_redundant_edges,
        };
        debug!(
            redundant = result.sum_redundant_keys(),
            partially_redundant = result.sum_partially_redundant_keys(),
            breaking = result.sum_breaking_keys(),
            paths = result.sum_paths(),
            "robustness computed"
        );
        result
    }

    pub fn key_classes(&self) -> &KeyClasses<E> {
        &self.side.classes
    }

    pub fn sum_keys(&self) -> usize {
        self.key_classes().num_keys()
    }

    pub fn sum_redundant_keys(&self) -> usize {
        self.key_classes().count(Coverage::Full)
    }

    pub fn sum_partially_redundant_keys(&self) -> usize {
        self.key_classes().count(Coverage::Partial)
    }

    pub fn sum_breaking_keys(&self) -> usize {
        self.key_classes().breaking().len()
    }

    pub fn sum_edges(&self) -> usize {
        self.sum_redundant_edges() + self.sum_breaking_edges()
    }

    pub fn sum_redundant_edges(&self) -> usize {
        self.redundant_edge_path_counts.len()
    }

    pub fn sum_breaking_edges(&self) -> usize {
        self.non_redundant_edges.len()
    }

    /// Number of distinct redundant paths over all keys
    pub fn sum_paths(&self) -> usize {
        self.side.paths().len()
    }

    /// Keys all of whose edges have redundant paths
    pub fn fully_redundant_keys(&self) -> &ElementSet<E> {
        self.key_classes().fully_redundant()
    }

    /// Keys some but not all of whose edges have redundant paths
    pub fn partially_redundant_keys(&self) -> &ElementSet<E> {
        self.key_classes().partially_redundant()
    }

    /// Keys none of whose edges has a redundant path
    pub fn breaking_keys(&self) -> &ElementSet<E> {
        self.key_classes().breaking()
    }

    pub fn redundant_edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.redundant_edge_path_counts.keys()
    }

    /// Number of redundant paths of every edge that has at least one
    pub fn redundant_edge_path_counts(&self) -> &ElementMap<Edge<E>, usize> {
        &self.redundant_edge_path_counts
    }

    pub fn non_redundant_edges(&self) -> &ElementSet<Edge<E>> {
        &self.non_redundant_edges
    }

    pub fn redundant_keys_ratio(&self) -> f64 {
        self.key_classes().ratio(Coverage::Full)
    }

    pub fn partially_redundant_keys_ratio(&self) -> f64 {
        self.key_classes().ratio(Coverage::Partial)
    }

    pub fn breaking_keys_ratio(&self) -> f64 {
        self.key_classes().breaking_ratio()
    }

    pub fn redundant_edges_ratio(&self) -> f64 {
        ratio(self.sum_redundant_edges(), self.sum_edges())
    }

    pub fn breaking_edges_ratio(&self) -> f64 {
        ratio(self.sum_breaking_edges(), self.sum_edges())
    }

    /// Returns the redundant paths of each of `keys`, deduplicated over all edges of a key.
    /// Keys without redundant paths map to an empty set.
    pub fn key_paths<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a E>,
    ) -> ElementMap<E, ElementSet<Path<E>>> {
        keys.into_iter()
            .map(|key| (key.clone(), self.side.paths_of_key(key).cloned().collect()))
            .collect()
    }

    /// Number of distinct redundant paths of every key redundant under `coverage`
    pub fn key_path_counts(&self, coverage: Coverage) -> ElementMap<E, usize> {
        self.key_classes()
            .redundant(coverage)
            .into_iter()
            .map(|key| {
                let count = self.side.paths_of_key(&key).count();
                (key, count)
            })
            .collect()
    }
}

impl<E: Element> RedundancyMetrics<E> for Robustness<E> {
    fn classes(&self, _side: Side) -> &KeyClasses<E> {
        &self.side.classes
    }

    fn paths(&self, _side: Side) -> &ElementSet<Path<E>> {
        self.side.paths()
    }

    fn paths_of_key(&self, key: &E, _side: Side) -> Vec<&Path<E>> {
        self.side.paths_of_key(key).collect()
    }
}
