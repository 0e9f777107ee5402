/*!
# Shortest Paths

All shortest paths between two nodes, measured in hops. Parallel edges never multiply the number of
paths: every hop of a [`Path`] carries the group of all keys connecting its two nodes.

If only one endpoint is given, the search degenerates to the direct neighbors of that endpoint.
These are trivially the shortest paths to *some* node, and exactly what flexibility asks for.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;

use super::*;

/// Builds the path visiting `nodes` in order, grouping all keys between consecutive nodes.
/// Returns `None` if `nodes` is empty or two consecutive nodes are not adjacent.
pub(super) fn path_along<'a, G>(
    graph: &G,
    mut nodes: impl Iterator<Item = &'a G::Elem>,
) -> Option<Path<G::Elem>>
where
    G: AdjacencyList,
{
    let mut last = nodes.next()?;
    let mut builder = PathBuilder::new(last.clone());
    for node in nodes {
        builder
            .push_hop(graph.keys_between(last, node).cloned(), node.clone())
            .ok()?;
        last = node;
    }
    Some(builder.finish())
}

/// Returns all length-1 paths leaving `u` (or entering `u` for [`Reach::Incoming`]).
/// Loops at `u` are included.
pub(super) fn direct_hops<G>(graph: &G, u: &G::Elem, reach: Reach) -> ElementSet<Path<G::Elem>>
where
    G: AdjacencyList,
{
    match reach {
        Reach::Outgoing => graph
            .successors_of(u)
            .filter_map(|v| path_along(graph, [u, v].into_iter()))
            .collect(),
        Reach::Incoming => graph
            .predecessors_of(u)
            .filter_map(|v| path_along(graph, [v, u].into_iter()))
            .collect(),
        Reach::Weak => {
            let mut paths = direct_hops(graph, u, Reach::Outgoing);
            paths.extend(direct_hops(graph, u, Reach::Incoming));
            paths
        }
    }
}

pub trait ShortestPaths: AdjacencyList {
    /// Returns all shortest paths from `from` to `to`.
    ///
    /// - If both endpoints are given, every path of minimum hop count is returned.
    /// - If `to` is omitted, the paths to all direct successors of `from` are returned.
    ///   Symmetrically, if `from` is omitted, the paths from all direct predecessors of `to`.
    ///   No path longer than one hop is considered in these cases.
    /// - Absent endpoints, unreachable targets and `from == to` yield an empty set.
    ///
    /// Fails with [`GraphError::MissingEndpoints`] if both endpoints are omitted.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let g = DirectedMultiGraph::from_edges([("A", "B", "x"), ("A", "B", "y"), ("B", "C", "z")]);
    ///
    /// let paths = g.shortest_paths(Some(&"A"), Some(&"C")).unwrap();
    /// assert_eq!(paths.len(), 1);
    /// assert_eq!(paths.iter().next().unwrap().hops(), 2);
    /// ```
    fn shortest_paths(
        &self,
        from: Option<&Self::Elem>,
        to: Option<&Self::Elem>,
    ) -> Result<ElementSet<Path<Self::Elem>>> {
        match (from, to) {
            (None, None) => Err(GraphError::MissingEndpoints),
            (Some(from), None) => Ok(self.shortest_paths_from(from)),
            (None, Some(to)) => Ok(self.shortest_paths_into(to)),
            (Some(from), Some(to)) => Ok(self.shortest_paths_between(from, to)),
        }
    }

    /// Returns all minimum-hop paths from `from` to `to`
    fn shortest_paths_between(
        &self,
        from: &Self::Elem,
        to: &Self::Elem,
    ) -> ElementSet<Path<Self::Elem>> {
        all_shortest_paths(self, from, to)
    }

    /// Returns the single-hop paths from `from` to each of its direct successors
    fn shortest_paths_from(&self, from: &Self::Elem) -> ElementSet<Path<Self::Elem>> {
        direct_hops(self, from, Reach::Outgoing)
    }

    /// Returns the single-hop paths into `to` from each of its direct predecessors
    fn shortest_paths_into(&self, to: &Self::Elem) -> ElementSet<Path<Self::Elem>> {
        direct_hops(self, to, Reach::Incoming)
    }

    /// Returns the number of hops of a shortest path from `from` to `to`, or `None` if `to` is
    /// unreachable. A node reaches itself with zero hops.
    fn hop_distance(&self, from: &Self::Elem, to: &Self::Elem) -> Option<usize> {
        if !self.has_node(from) {
            return None;
        }

        let mut distances: FxHashMap<&Self::Elem, usize> = FxHashMap::default();
        let mut queue = VecDeque::from([(from, 0)]);
        distances.insert(from, 0);

        while let Some((u, du)) = queue.pop_front() {
            if u == to {
                return Some(du);
            }
            for v in self.successors_of(u) {
                if !distances.contains_key(v) {
                    distances.insert(v, du + 1);
                    queue.push_back((v, du + 1));
                }
            }
        }
        None
    }
}

impl<G: AdjacencyList> ShortestPaths for G {}

fn all_shortest_paths<G>(graph: &G, from: &G::Elem, to: &G::Elem) -> ElementSet<Path<G::Elem>>
where
    G: AdjacencyList,
{
    let mut paths = ElementSet::default();
    if from == to || !graph.has_node(from) || !graph.has_node(to) {
        return paths;
    }

    // layered BFS recording every predecessor on a shortest path
    let mut distances: FxHashMap<&G::Elem, usize> = FxHashMap::default();
    let mut predecessors: FxHashMap<&G::Elem, Vec<&G::Elem>> = FxHashMap::default();
    let mut queue = VecDeque::from([(from, 0)]);
    distances.insert(from, 0);

    while let Some((u, du)) = queue.pop_front() {
        if distances.get(to).is_some_and(|&dt| du >= dt) {
            break;
        }

        for v in graph.successors_of(u) {
            match distances.get(v) {
                None => {
                    distances.insert(v, du + 1);
                    predecessors.entry(v).or_default().push(u);
                    queue.push_back((v, du + 1));
                }
                Some(&dv) if dv == du + 1 => predecessors.entry(v).or_default().push(u),
                Some(_) => {}
            }
        }
    }

    if !distances.contains_key(to) {
        return paths;
    }

    // walk the predecessor DAG back from `to`; every walk ends in `from`
    let mut stack: Vec<Vec<&G::Elem>> = vec![vec![to]];
    while let Some(reversed) = stack.pop() {
        let Some(&last) = reversed.last() else {
            continue;
        };

        if last == from {
            paths.extend(path_along(graph, reversed.iter().rev().copied()));
            continue;
        }

        for &p in predecessors.get(last).into_iter().flatten() {
            let mut longer = reversed.clone();
            longer.push(p);
            stack.push(longer);
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        repr::{DirectedMultiGraph, UndirectedMultiGraph},
        testing::{detour_graph, random_multigraph},
    };

    #[test]
    fn endpoint_contract() {
        let g = detour_graph();

        assert_eq!(
            g.shortest_paths(None, None).unwrap_err(),
            GraphError::MissingEndpoints
        );
        assert!(g.shortest_paths(Some(&"A"), Some(&"A")).unwrap().is_empty());
        assert!(g.shortest_paths(Some(&"A"), Some(&"Q")).unwrap().is_empty());
        assert!(g.shortest_paths(Some(&"C"), Some(&"A")).unwrap().is_empty());
        assert!(g.shortest_paths(Some(&"Q"), None).unwrap().is_empty());

        let outgoing = g.shortest_paths(Some(&"A"), None).unwrap();
        assert_eq!(
            outgoing.iter().map(|p| p.to_string()).sorted().collect_vec(),
            vec![r#""A" -"u"-> "D""#, r#""A" -{"x","y"}-> "B""#]
        );

        let incoming = g.shortest_paths(None, Some(&"C")).unwrap();
        assert_eq!(incoming.len(), 2);
        assert!(incoming.iter().all(|p| p.hops() == 1 && p.last_node() == &"C"));
    }

    #[test]
    fn all_shortest_paths_merge_parallel_edges() {
        let g = detour_graph();

        let paths = g.shortest_paths(Some(&"A"), Some(&"C")).unwrap();
        assert_eq!(
            paths.iter().map(|p| p.to_string()).sorted().collect_vec(),
            vec![
                r#""A" -"u"-> "D" -"v"-> "C""#,
                r#""A" -{"x","y"}-> "B" -"z"-> "C""#,
            ]
        );
    }

    #[test]
    fn undirected_and_loops() {
        let g = UndirectedMultiGraph::from_edges([(1u32, 2, 0), (2, 3, 0), (3, 3, 1)]);
        assert_eq!(g.shortest_paths(Some(&3), Some(&1)).unwrap().len(), 1);

        let from_three = g.shortest_paths(Some(&3), None).unwrap();
        assert_eq!(from_three.len(), 2);
        assert!(from_three.iter().any(|p| p.nodes() == [3, 3]));
    }

    #[test]
    fn paths_are_minimal() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for _ in 0..10 {
            let g: DirectedMultiGraph<u32> = random_multigraph(rng, 15, 3, 35, false);
            for u in 0..15u32 {
                for v in 0..15u32 {
                    let paths = g.shortest_paths(Some(&u), Some(&v)).unwrap();
                    match g.hop_distance(&u, &v) {
                        Some(d) if u != v => {
                            assert!(!paths.is_empty());
                            assert!(paths.iter().all(|p| p.hops() == d));
                            assert!(paths.iter().all(|p| p.first_node() == &u && p.last_node() == &v));
                            for p in &paths {
                                for (a, group, b) in p.steps() {
                                    assert_eq!(group.keys(), g.keys_between(a, b).cloned().collect_vec());
                                }
                            }
                        }
                        _ => assert!(paths.is_empty()),
                    }
                }
            }
        }
    }
}
