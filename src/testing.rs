/// Every graph representation should agree with a plain edge set under random editing.
/// Nodes and keys are drawn from small ranges so that parallel edges and loops are frequent.
macro_rules! test_graph_ops {
    ($env:ident, $dir:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{edge::Edge, ops::*, repr::*, testing::test_graph_ops};
            use fxhash::FxHashSet;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            type Graph = MultiGraph<u32, $dir>;

            /// Creates a list of at most `m_ub` random edges for nodes `0..n` and keys `0..k`
            fn random_edges<R: Rng>(rng: &mut R, n: u32, k: u32, m_ub: usize) -> Vec<Edge<u32>> {
                let mut edges = (0..m_ub)
                    .map(|_| {
                        let edge = Edge(
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..k),
                        );
                        if <$dir as Direction>::DIRECTED {
                            edge
                        } else {
                            edge.normalized()
                        }
                    })
                    .collect_vec();
                edges.sort_unstable();
                edges.dedup();
                edges
            }

            $(
                test_graph_ops!($dir: $trait);
            )*
        }
    };
    ($dir:ident: GraphNodeEditing) => {
        #[test]
        fn test_graph_node_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let edges = random_edges(rng, n, 3, 3 * n as usize);
                    let mut graph = Graph::from_edges(edges.clone());
                    let mut remaining: FxHashSet<Edge<u32>> = edges.into_iter().collect();

                    for u in 0..n {
                        let present = graph.has_node(&u);
                        assert_eq!(graph.remove_node(&u), present);
                        assert!(!graph.remove_node(&u));

                        remaining.retain(|Edge(a, b, _)| *a != u && *b != u);
                        assert_eq!(graph.number_of_edges(), remaining.len());
                    }

                    assert!(graph.is_empty());
                    assert!(graph.add_node(0));
                    assert!(!graph.add_node(0));
                    assert!(graph.is_isolated(&0));
                }
            }
        }
    };
    ($dir:ident: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 10, 20] {
                for m_ub in [n as usize, 3 * n as usize, 10 * n as usize] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, 3, m_ub);
                        let graph = Graph::from_edges(edges.clone());

                        assert_eq!(graph.number_of_edges(), edges.len());
                        assert_eq!(graph.ordered_edges(), edges);

                        for u in graph.nodes() {
                            let out_degree = edges
                                .iter()
                                .filter(|Edge(a, b, _)| a == u || (!<$dir as Direction>::DIRECTED && b == u))
                                .count();
                            let in_degree = edges
                                .iter()
                                .filter(|Edge(a, b, _)| b == u || (!<$dir as Direction>::DIRECTED && a == u))
                                .count();

                            assert_eq!(graph.out_degree_of(u), out_degree);
                            assert_eq!(graph.in_degree_of(u), in_degree);
                            assert_eq!(graph.edges_from(u).count(), graph.out_degree_of(u));
                            assert_eq!(graph.edges_into(u).count(), graph.in_degree_of(u));

                            for v in graph.successors_of(u) {
                                assert!(graph.predecessors_of(v).contains(u));
                            }
                        }
                    }
                }
            }
        }
    };
    ($dir:ident: GraphEdgeEditing) => {
        #[test]
        fn test_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 10, 20] {
                for _ in 0..10 {
                    let edges = random_edges(rng, n, 3, 5 * n as usize);
                    let mut graph = Graph::new();
                    for Edge(u, v, k) in edges.iter().cloned() {
                        assert!(graph.add_edge(u, v, k));
                    }

                    let mut present: FxHashSet<Edge<u32>> = edges.iter().cloned().collect();
                    let mut m = graph.number_of_edges();
                    for _ in 0..(3 * m) {
                        let edge = Edge(
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..3),
                        );
                        let canonical = if <$dir as Direction>::DIRECTED {
                            edge.clone()
                        } else {
                            edge.normalized()
                        };

                        let Edge(u, v, k) = &edge;
                        if present.remove(&canonical) {
                            assert!(graph.remove_edge(u, v, k));
                            m -= 1;
                        } else {
                            assert!(!graph.remove_edge(u, v, k));
                        }
                        assert_eq!(graph.number_of_edges(), m);
                        assert!(!graph.has_edge(u, v, k));
                    }

                    let nodes_before = graph.number_of_nodes();
                    let removed = graph.remove_edges_by_keys(&FxHashSet::from_iter([0u32, 1, 2]));
                    assert_eq!(removed.len(), m);
                    assert!(graph.has_no_edges());
                    assert_eq!(graph.number_of_nodes(), nodes_before);
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;

#[cfg(test)]
pub(crate) use helpers::*;

#[cfg(test)]
mod helpers {
    use rand::Rng;

    use crate::{ops::*, repr::DirectedMultiGraph};

    /// Creates a random directed multigraph with nodes in `0..n`, keys in `0..k`
    /// and at most `m_ub` edges. With `bidirected`, every edge is inserted in both directions.
    pub(crate) fn random_multigraph<R: Rng>(
        rng: &mut R,
        n: u32,
        k: u32,
        m_ub: usize,
        bidirected: bool,
    ) -> DirectedMultiGraph<u32> {
        let mut graph = DirectedMultiGraph::new();
        graph.add_nodes(0..n);
        for _ in 0..m_ub {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            let key = rng.random_range(0..k);
            if bidirected {
                graph.add_reversible_edge(u, v, key);
            } else {
                graph.add_edge(u, v, key);
            }
        }
        graph
    }

    /// The graph used to illustrate robustness:
    /// `A -> B` via `x` and `y`, `B -> C` via `z`, and a detour `A -> D -> C` via `u` and `v`.
    pub(crate) fn detour_graph() -> DirectedMultiGraph<&'static str> {
        DirectedMultiGraph::from_edges([
            ("A", "B", "x"),
            ("A", "B", "y"),
            ("B", "C", "z"),
            ("A", "D", "u"),
            ("D", "C", "v"),
        ])
    }
}
