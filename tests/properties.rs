//! Property tests for graph editing, path finding, set algebra and the redundancy analysis.

use proptest::prelude::*;

use lgraphs::{algo::*, prelude::*, redundancy::*, utils::ElementSet};

const NODES: u32 = 8;
const KEYS: u32 = 6;

type Graph = DirectedMultiGraph<u32>;

fn build_graph(edges: &[(u32, u32, u32)]) -> Graph {
    let mut graph = Graph::new();
    graph.add_nodes(0..NODES);
    graph.add_edges(edges.iter().copied());
    graph
}

// Small node and key ranges make parallel edges, shared keys and detours frequent.
fn edge_strategy() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
    prop::collection::vec((0..NODES, 0..NODES, 0..KEYS), 0..24)
}

fn special_strategy() -> impl Strategy<Value = ElementSet<u32>> {
    prop::collection::hash_set(0..KEYS, 0..3).prop_map(|keys| keys.into_iter().collect())
}

proptest! {
    #[test]
    fn removing_and_restoring_a_key_round_trips(edges in edge_strategy(), key in 0..KEYS) {
        let mut graph = build_graph(&edges);
        let before = graph.clone();

        let removed = graph.remove_edges_by_keys(&ElementSet::from_iter([key]));
        prop_assert!(removed.iter().all(|edge| *edge.key() == key));
        prop_assert!(!graph.edge_keys().contains(&key));
        prop_assert_eq!(graph.number_of_nodes(), before.number_of_nodes());

        graph.add_edges(removed);
        prop_assert_eq!(&graph, &before);

        let edges_of_key = graph.edges_for_key().remove(&key).unwrap_or_default();
        {
            let pruned = graph.without_edges(&edges_of_key);
            prop_assert!(!pruned.edge_keys().contains(&key));
        }
        prop_assert_eq!(&graph, &before);
    }
}

proptest! {
    #[test]
    fn shortest_paths_are_minimal_and_valid(edges in edge_strategy()) {
        let graph = build_graph(&edges);

        for u in 0..NODES {
            for v in (0..NODES).filter(|&v| v != u) {
                let paths = graph.shortest_paths_between(&u, &v);
                match graph.hop_distance(&u, &v) {
                    None => prop_assert!(paths.is_empty()),
                    Some(distance) => {
                        prop_assert!(!paths.is_empty());
                        for path in &paths {
                            prop_assert_eq!(path.hops(), distance);
                            prop_assert_eq!(*path.first_node(), u);
                            prop_assert_eq!(*path.last_node(), v);
                            for (a, group, b) in path.steps() {
                                prop_assert!(group.keys().iter().all(|k| graph.has_edge(a, b, k)));
                                prop_assert_eq!(group.len(), graph.keys_between(a, b).count());
                            }
                        }
                    }
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn key_classes_partition_all_keys(edges in edge_strategy()) {
        let graph = build_graph(&edges);
        let redundancy = Redundancy::new(&graph);
        let keys = graph.edge_keys();

        for ty in RedundancyType::ALL {
            let classes = redundancy.metrics(ty.calculator()).classes(ty.side());
            let full = classes.fully_redundant();
            let partial = classes.partially_redundant();
            let breaking = classes.breaking();

            prop_assert!(full.is_disjoint(partial));
            prop_assert!(full.is_disjoint(breaking));
            prop_assert!(partial.is_disjoint(breaking));
            prop_assert_eq!(full.len() + partial.len() + breaking.len(), keys.len());
            prop_assert!(classes.keys().all(|k| keys.contains(k)));

            if !keys.is_empty() {
                let sum = classes.ratio(Coverage::Full)
                    + classes.ratio(Coverage::Partial)
                    + classes.breaking_ratio();
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn flexibility_is_both_sides_and_implied_by_robustness(edges in edge_strategy()) {
        let graph = build_graph(&edges);
        let redundancy = Redundancy::new(&graph);

        let flexible = redundancy.redundant_keys(RedundancyType::Flexibility);
        let target = redundancy.redundant_keys(RedundancyType::TargetFlexibility);
        let source = redundancy.redundant_keys(RedundancyType::SourceFlexibility);
        prop_assert_eq!(&flexible, &target.intersection(&source).copied().collect());

        let robust = redundancy.redundant_keys(RedundancyType::Robustness);
        prop_assert!(robust.is_subset(&flexible));
        prop_assert!(
            redundancy
                .redundant_keys(RedundancyType::RobustnessBoth)
                .is_subset(&redundancy.redundant_keys(RedundancyType::FlexibilityBoth))
        );
    }
}

proptest! {
    #[test]
    fn majority_intersection_degenerates(
        a in edge_strategy(),
        b in edge_strategy(),
        c in edge_strategy(),
        percentage in 1u32..=50,
    ) {
        let (a, b, c) = (build_graph(&a), build_graph(&b), build_graph(&c));

        let all = a.majority_intersection([&b, &c], 100.0).unwrap();
        prop_assert_eq!(all, a.intersection([&b, &c]));

        let any = a.majority_intersection([&b], percentage as f64).unwrap();
        prop_assert_eq!(any, a.union([&b]));
    }
}

proptest! {
    #[test]
    fn contributed_keys_are_redundant(edges in edge_strategy(), special in special_strategy()) {
        let graph = build_graph(&edges);
        let redundancy = Redundancy::new(&graph);
        let contribution = RedundancyContribution::new(&redundancy, &special);

        for ty in RedundancyType::ALL {
            let redundant = redundancy.redundant_keys(ty);
            let for_key = contribution.contributing_special_for_key(ty);
            prop_assert!(for_key.keys().all(|k| redundant.contains(k)));
            prop_assert!(for_key.values().flatten().all(|s| special.contains(s)));
            prop_assert!(
                contribution
                    .contributed_keys_for_special(ty)
                    .keys()
                    .all(|s| special.contains(s))
            );
            prop_assert!(contribution.contributed_paths(ty).iter().all(|p| p.has_special_key()));
        }
    }

    #[test]
    fn changes_partition_redundant_common_keys(a in edge_strategy(), b in edge_strategy()) {
        let comparison = Comparison::new(&build_graph(&a), &build_graph(&b));

        for ty in RedundancyType::ALL {
            let lost = comparison.redundancy_keys(ty, Change::Lost);
            let conserved = comparison.redundancy_keys(ty, Change::Conserved);
            let added = comparison.redundancy_keys(ty, Change::Added);

            prop_assert!(lost.is_disjoint(&conserved));
            prop_assert!(lost.is_disjoint(&added));
            prop_assert!(conserved.is_disjoint(&added));

            let in_a = comparison.redundancy_a().redundant_keys(ty);
            let in_b = comparison.redundancy_b().redundant_keys(ty);
            let redundant_common: ElementSet<u32> = comparison
                .common_keys()
                .iter()
                .filter(|k| in_a.contains(*k) || in_b.contains(*k))
                .copied()
                .collect();
            let changed: ElementSet<u32> =
                lost.iter().chain(&conserved).chain(&added).copied().collect();
            prop_assert_eq!(changed, redundant_common);

            let ratios: f64 = Change::ALL
                .iter()
                .map(|&change| comparison.redundancy_ratio(ty, change))
                .sum();
            prop_assert!(ratios <= 1.0 + 1e-9);
        }
    }
}
