/*!
Graph traversal.

[`Search`] walks every node reachable from a start node exactly once. Whether it is a breadth-first
or depth-first walk is decided by its [`Frontier`], and which edges it may follow by its [`Reach`].
The [`Traversal`] trait exposes the common walks directly on graphs.

Searches borrow the graph and yield references to its nodes.
*/

use std::collections::VecDeque;

use super::*;

/// Which edges a traversal may follow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reach {
    /// From source to target
    #[default]
    Outgoing,
    /// From target to source
    Incoming,
    /// In both directions (weak connectivity)
    Weak,
}

/// Nodes discovered but not yet expanded.
///
/// A queue gives a breadth-first walk, a stack a depth-first one.
pub trait Frontier<T>: Default {
    fn put(&mut self, item: T);

    fn take(&mut self) -> Option<T>;

    fn pending(&self) -> usize;
}

impl<T> Frontier<T> for VecDeque<T> {
    fn put(&mut self, item: T) {
        self.push_back(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn pending(&self) -> usize {
        self.len()
    }
}

impl<T> Frontier<T> for Vec<T> {
    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }

    fn pending(&self) -> usize {
        self.len()
    }
}

/// Iterator over the nodes reachable from a start node, the start node first.
pub struct Search<'a, G, F>
where
    G: AdjacencyList,
    F: Frontier<&'a G::Elem>,
{
    graph: &'a G,
    seen: ElementSet<&'a G::Elem>,
    frontier: F,
    reach: Reach,
}

/// Breadth-first [`Search`]
pub type BFS<'a, G> = Search<'a, G, VecDeque<&'a <G as GraphType>::Elem>>;

/// Depth-first [`Search`]
pub type DFS<'a, G> = Search<'a, G, Vec<&'a <G as GraphType>::Elem>>;

impl<'a, G, F> Search<'a, G, F>
where
    G: AdjacencyList,
    F: Frontier<&'a G::Elem>,
{
    /// Starts a search at `start`. A `start` outside the graph is yielded alone.
    pub fn new(graph: &'a G, start: &'a G::Elem) -> Self {
        let mut search = Self::unstarted(graph);
        search.discover(start);
        search
    }

    /// A search that yields nothing until [`Search::try_restart_at_unvisited`] is called.
    pub fn unstarted(graph: &'a G) -> Self {
        let mut seen = ElementSet::default();
        seen.reserve(graph.number_of_nodes());
        Self {
            graph,
            seen,
            frontier: F::default(),
            reach: Reach::default(),
        }
    }

    pub fn set_reach(&mut self, reach: Reach) {
        self.reach = reach;
    }

    /// Chainable [`Search::set_reach`]; call before the first `next`.
    pub fn reach(mut self, reach: Reach) -> Self {
        self.set_reach(reach);
        self
    }

    /// Continues at the first node (in graph order) not seen so far.
    /// Returns `false` if every node has been seen. Only valid once the search is exhausted.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        debug_assert_eq!(self.frontier.pending(), 0);
        let graph = self.graph;
        match graph.nodes().find(|u| !self.seen.contains(u)) {
            Some(u) => {
                self.discover(u);
                true
            }
            None => false,
        }
    }

    fn discover(&mut self, u: &'a G::Elem) {
        if self.seen.insert(u) {
            self.frontier.put(u);
        }
    }
}

impl<'a, G, F> Iterator for Search<'a, G, F>
where
    G: AdjacencyList,
    F: Frontier<&'a G::Elem>,
{
    type Item = &'a G::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.frontier.take()?;
        let graph = self.graph;

        if self.reach != Reach::Incoming {
            for v in graph.successors_of(u) {
                self.discover(v);
            }
        }
        if self.reach != Reach::Outgoing {
            for v in graph.predecessors_of(u) {
                self.discover(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.frontier.pending();
        let unseen = self.graph.number_of_nodes().saturating_sub(self.seen.len());
        (pending, Some(pending + unseen))
    }
}

/// Traversals as methods on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Nodes reachable from `start` along outgoing edges, in breadth-first order.
    ///
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let g = DirectedMultiGraph::from_edges([(0u32, 1, 7), (1, 2, 7)]);
    ///
    /// let order: Vec<_> = g.bfs(&0).copied().collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    fn bfs<'a>(&'a self, start: &'a Self::Elem) -> BFS<'a, Self> {
        BFS::new(self, start)
    }

    /// Nodes reachable from `start` along outgoing edges, in depth-first order.
    fn dfs<'a>(&'a self, start: &'a Self::Elem) -> DFS<'a, Self> {
        DFS::new(self, start)
    }

    /// Nodes connected to `start` when edge directions are ignored.
    fn weak_bfs<'a>(&'a self, start: &'a Self::Elem) -> BFS<'a, Self> {
        BFS::new(self, start).reach(Reach::Weak)
    }

    /// The nodes reachable from `start`, `start` included.
    fn reachable_from(&self, start: &Self::Elem) -> ElementSet<Self::Elem> {
        self.bfs(start).cloned().collect()
    }
}

impl<G: AdjacencyList + Sized> Traversal for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{repr::DirectedMultiGraph, testing::random_multigraph};

    #[test]
    fn breadth_first_layers() {
        let g = DirectedMultiGraph::from_edges([(0u32, 1, 0), (0, 2, 0), (1, 3, 0), (2, 3, 1), (4, 0, 0)]);

        let order = g.bfs(&0).copied().collect_vec();
        assert_eq!(order[0], 0);
        assert_eq!(order[1..3].iter().copied().sorted().collect_vec(), vec![1, 2]);
        assert_eq!(order[3], 3);
        assert_eq!(order.len(), 4);

        assert_eq!(g.bfs(&3).copied().collect_vec(), vec![3]);
        assert_eq!(
            g.bfs(&3).reach(Reach::Incoming).copied().sorted().collect_vec(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(g.weak_bfs(&3).count(), 5);
        assert_eq!(g.bfs(&99).copied().collect_vec(), vec![99]);
    }

    #[test]
    fn restart_covers_every_node() {
        let g = DirectedMultiGraph::from_edges([(0u32, 1, 0), (2, 3, 0), (4, 4, 1)]);
        let mut search = BFS::unstarted(&g).reach(Reach::Weak);
        assert_eq!(search.next(), None);

        let mut rounds = 0;
        let mut seen = Vec::new();
        while search.try_restart_at_unvisited() {
            rounds += 1;
            seen.extend(search.by_ref().copied());
        }
        assert_eq!(rounds, 3);
        assert_eq!(seen.into_iter().sorted().collect_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn bfs_and_dfs_visit_the_same_nodes() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for _ in 0..20 {
            let g = random_multigraph(rng, 30, 4, 60, false);
            for u in 0..30u32 {
                let bfs = g.bfs(&u).copied().sorted().collect_vec();
                let dfs = g.dfs(&u).copied().sorted().collect_vec();
                assert_eq!(bfs, dfs);
                assert_eq!(bfs.len(), g.reachable_from(&u).len());
            }
        }
    }
}
