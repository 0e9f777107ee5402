use std::cmp::Reverse;

use itertools::Itertools;

use super::*;

/// Connected components; for directed graphs, connectivity is weak
pub trait Connectivity: AdjacencyList + Traversal + Sized {
    /// Returns an iterator over the node sets of all connected components
    fn components(&self) -> ConnectedComponents<'_, Self> {
        ConnectedComponents::new(self)
    }

    /// Returns the nodes of the largest connected component; empty if the graph is empty.
    /// Ties are broken in favor of the component with the smallest node.
    fn largest_component_nodes(&self) -> ElementSet<Self::Elem> {
        self.components()
            .map(|cc| {
                let min = cc.iter().min().cloned();
                (cc, min)
            })
            .max_by_key(|(cc, min)| (cc.len(), Reverse(min.clone())))
            .map(|(cc, _)| cc.into_iter().collect())
            .unwrap_or_default()
    }

    /// Returns the subgraph induced by the largest connected component
    fn largest_component(&self) -> Self
    where
        Self: Subgraph,
    {
        self.subgraph_by_nodes(&self.largest_component_nodes())
    }

    /// Removes every connected component with at most `max_size` nodes
    fn remove_small_components(&mut self, max_size: usize)
    where
        Self: GraphNodeEditing,
    {
        let doomed = self
            .components()
            .filter(|cc| cc.len() <= max_size)
            .flatten()
            .collect_vec();
        self.remove_nodes(&doomed);
    }
}

impl<G> Connectivity for G where G: AdjacencyList + Sized {}

/// Iterator over the (weakly) connected components of a graph.
/// Each component is emitted as a vector of nodes in BFS order.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    bfs: BFS<'a, G>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: BFS::unstarted(graph).reach(Reach::Weak),
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<G::Elem>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cc = self.bfs.by_ref().cloned().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !self.bfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

impl<G> std::iter::FusedIterator for ConnectedComponents<'_, G> where G: AdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{DirectedMultiGraph, UndirectedMultiGraph};

    #[test]
    fn weak_components() {
        let mut g = DirectedMultiGraph::from_edges([(1u32, 2, 0), (3, 2, 0), (4, 5, 1), (6, 6, 2)]);
        g.add_node(7);

        let components = g
            .components()
            .map(|cc| cc.into_iter().sorted().collect_vec())
            .sorted()
            .collect_vec();
        assert_eq!(
            components,
            vec![vec![1, 2, 3], vec![4, 5], vec![6], vec![7]]
        );

        assert_eq!(
            g.largest_component_nodes(),
            ElementSet::from_iter([1, 2, 3])
        );
        let largest = g.largest_component();
        assert_eq!(largest.number_of_nodes(), 3);
        assert_eq!(largest.number_of_edges(), 2);

        g.remove_small_components(1);
        assert_eq!(g.ordered_nodes(), vec![1, 2, 3, 4, 5]);
        g.remove_small_components(2);
        assert_eq!(g.ordered_nodes(), vec![1, 2, 3]);
    }

    #[test]
    fn ties_and_empty_graphs() {
        let g = UndirectedMultiGraph::from_edges([(5u32, 6, 0), (1, 2, 0)]);
        assert_eq!(g.largest_component_nodes(), ElementSet::from_iter([1, 2]));

        let empty = UndirectedMultiGraph::<u32>::new();
        assert_eq!(empty.components().count(), 0);
        assert!(empty.largest_component_nodes().is_empty());
        assert!(empty.largest_component().is_empty());
    }
}
