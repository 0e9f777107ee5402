/*!
# Flexibility

A weaker notion than [robustness](super::Robustness): after removing all edges of a key, an edge
*(s, t, k)* is
- *source-flexible* if `s` still has an outgoing edge,
- *target-flexible* if `t` still has an incoming edge,
- *flexible* if both hold, not necessarily along the same detour.

Only direct neighbors are considered, i.e. every alternative path has exactly one hop.
*/

use tracing::{debug, trace};

use super::*;

/// Flexibility of every key of a graph, for both sides and their combination
#[derive(Debug, Clone)]
pub struct Flexibility<E: Element> {
    combined: KeyClasses<E>,
    target: SidePaths<E>,
    source: SidePaths<E>,
    paths: ElementSet<Path<E>>,
    sum_edges: usize,
}

impl<E: Element> Flexibility<E> {
    /// Computes the flexibility of all keys of `graph`; see [`RedundancyAnalysis`] for options
    pub fn new<G>(graph: &G) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        RedundancyAnalysis::new().flexibility(graph)
    }

    /// Computes the flexibility of all keys, editing `graph` in place and restoring it per key
    pub(super) fn compute<G>(mut graph: G) -> Self
    where
        G: AdjacencyList<Elem = E> + GraphEdgeEditing,
    {
        let mut combined = KeyClasses::default();
        let mut target = SidePaths::default();
        let mut source = SidePaths::default();
        let mut sum_edges = 0;

        let edges_for_key = graph.edges_for_key();
        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            keys = edges_for_key.len(),
            "computing flexibility"
        );

        for (key, edges) in edges_for_key {
            // edges of one key often share endpoints; query each endpoint once
            let mut outgoing: ElementMap<E, ElementSet<Path<E>>> = ElementMap::default();
            let mut incoming: ElementMap<E, ElementSet<Path<E>>> = ElementMap::default();
            let (mut redundant, mut target_redundant, mut source_redundant) = (0, 0, 0);
            {
                let pruned = graph.without_edges(&edges);
                for Edge(s, t, _) in &edges {
                    let has_outgoing = !outgoing
                        .entry(s.clone())
                        .or_insert_with(|| pruned.shortest_paths_from(s))
                        .is_empty();
                    let has_incoming = !incoming
                        .entry(t.clone())
                        .or_insert_with(|| pruned.shortest_paths_into(t))
                        .is_empty();

                    source_redundant += has_outgoing as usize;
                    target_redundant += has_incoming as usize;
                    redundant += (has_outgoing && has_incoming) as usize;
                }
            }

            let class = combined.classify(key.clone(), redundant, edges.len());
            let target_class = target
                .classes
                .classify(key.clone(), target_redundant, edges.len());
            let source_class = source
                .classes
                .classify(key.clone(), source_redundant, edges.len());
            trace!(
                ?key,
                edges = edges.len(),
                ?class,
                ?target_class,
                ?source_class,
                "flexibility of key"
            );

            target.record(&key, incoming.into_values().flatten().collect());
            source.record(&key, outgoing.into_values().flatten().collect());
            sum_edges += edges.len();
        }

        let paths = target.paths().union(source.paths()).cloned().collect();
        let result = Self {
            combined,
            target,
            source,
            paths,
            sum_edges,
        };
        debug!(
            redundant = result.combined.count(Coverage::Full),
            target_redundant = result.target.classes.count(Coverage::Full),
            source_redundant = result.source.classes.count(Coverage::Full),
            paths = result.sum_paths(),
            "flexibility computed"
        );
        result
    }

    pub fn sum_keys(&self) -> usize {
        self.combined.num_keys()
    }

    pub fn sum_edges(&self) -> usize {
        self.sum_edges
    }

    /// Number of distinct alternative paths over both sides
    pub fn sum_paths(&self) -> usize {
        self.paths.len()
    }

    /// Keys all of whose edges are flexible on `side`
    pub fn redundant_keys_on(&self, side: Side) -> &ElementSet<E> {
        self.classes(side).fully_redundant()
    }

    /// Keys some but not all of whose edges are flexible on `side`
    pub fn partially_redundant_keys_on(&self, side: Side) -> &ElementSet<E> {
        self.classes(side).partially_redundant()
    }

    /// Keys none of whose edges is flexible on `side`
    pub fn breaking_keys_on(&self, side: Side) -> &ElementSet<E> {
        self.classes(side).breaking()
    }

    /// Paths leaving the sources of removed edges
    pub fn source_paths(&self) -> &ElementSet<Path<E>> {
        self.source.paths()
    }

    /// Paths entering the targets of removed edges
    pub fn target_paths(&self) -> &ElementSet<Path<E>> {
        self.target.paths()
    }

    /// Returns the alternative paths on `side` of each of `keys`.
    /// Keys without such paths map to an empty set.
    pub fn key_paths<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a E>,
        side: Side,
    ) -> ElementMap<E, ElementSet<Path<E>>> {
        keys.into_iter()
            .map(|key| {
                let paths = self.paths_of_key(key, side).into_iter().cloned().collect();
                (key.clone(), paths)
            })
            .collect()
    }
}

impl<E: Element> RedundancyMetrics<E> for Flexibility<E> {
    fn classes(&self, side: Side) -> &KeyClasses<E> {
        match side {
            Side::Combined => &self.combined,
            Side::Target => &self.target.classes,
            Side::Source => &self.source.classes,
        }
    }

    fn paths(&self, side: Side) -> &ElementSet<Path<E>> {
        match side {
            Side::Combined => &self.paths,
            Side::Target => self.target.paths(),
            Side::Source => self.source.paths(),
        }
    }

    fn paths_of_key(&self, key: &E, side: Side) -> Vec<&Path<E>> {
        let target = matches!(side, Side::Combined | Side::Target)
            .then(|| self.target.paths_of_key(key))
            .into_iter()
            .flatten();
        let source = matches!(side, Side::Combined | Side::Source)
            .then(|| self.source.paths_of_key(key))
            .into_iter()
            .flatten();
        target.chain(source).collect()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        repr::DirectedMultiGraph,
        testing::{detour_graph, random_multigraph},
    };

    #[test]
    fn one_sided_flexibility() {
        // removing `k` leaves A with another successor, but B without predecessor
        let g = DirectedMultiGraph::from_edges([("A", "B", "k"), ("A", "C", "x")]);
        let flexibility = Flexibility::new(&g);

        assert!(flexibility.redundant_keys_on(Side::Source).contains("k"));
        assert!(flexibility.breaking_keys_on(Side::Target).contains("k"));
        assert!(flexibility.breaking_keys_on(Side::Combined).contains("k"));

        let paths = flexibility.key_paths([&"k"], Side::Source);
        assert_eq!(
            paths[&"k"].iter().map(|p| p.to_string()).collect_vec(),
            vec![r#""A" -"x"-> "C""#]
        );
        assert!(flexibility.key_paths([&"k"], Side::Target)[&"k"].is_empty());
        assert_eq!(flexibility.source_paths().len(), 2);
        assert!(flexibility.target_paths().is_empty());
    }

    #[test]
    fn detour_graph_sides() {
        let g = detour_graph();
        let flexibility = Flexibility::new(&g);

        assert_eq!(flexibility.sum_keys(), 5);
        assert_eq!(flexibility.sum_edges(), 5);
        assert_eq!(
            flexibility.redundant_keys_on(Side::Combined),
            &ElementSet::from_iter(["x", "y"])
        );
        assert_eq!(
            flexibility.redundant_keys_on(Side::Target),
            &ElementSet::from_iter(["x", "y", "z", "v"])
        );
        assert_eq!(
            flexibility.redundant_keys_on(Side::Source),
            &ElementSet::from_iter(["x", "y", "u"])
        );
        assert_eq!(flexibility.redundancy_ratio(RedundancyType::TargetFlexibility), 0.8);
    }

    #[test]
    fn partial_flexibility() {
        // `k` leaves A as well as B; only A keeps another way out
        let g = DirectedMultiGraph::from_edges([("A", "C", "k"), ("B", "D", "k"), ("A", "E", "x")]);
        let flexibility = Flexibility::new(&g);

        assert!(flexibility.partially_redundant_keys_on(Side::Source).contains("k"));
        assert!(flexibility.breaking_keys_on(Side::Target).contains("k"));
        assert!(flexibility.breaking_keys_on(Side::Combined).contains("k"));
    }

    #[test]
    fn combined_is_intersection_of_sides() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..20 {
            let g = random_multigraph(rng, 12, 6, 30, false);
            let flexibility = Flexibility::new(&g);
            let robustness = Robustness::new(&g);

            let combined = flexibility.redundant_keys(RedundancyType::Flexibility);
            let target = flexibility.redundant_keys(RedundancyType::TargetFlexibility);
            let source = flexibility.redundant_keys(RedundancyType::SourceFlexibility);
            assert_eq!(combined, target.intersection(&source).cloned().collect());

            assert!(robustness.fully_redundant_keys().is_subset(&combined));
            assert!(
                robustness
                    .redundant_keys(RedundancyType::RobustnessBoth)
                    .is_subset(&flexibility.redundant_keys(RedundancyType::FlexibilityBoth))
            );
        }
    }
}
