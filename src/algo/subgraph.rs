/*!
# Subgraph Algorithms

Provides a trait for extracting subgraphs from graphs, either induced by a set of nodes
or spanned by a set of edges. Subgraphs are independent copies: editing them never affects the
graph they were taken from.
*/

use super::*;

/// A trait for creating different kinds of subgraphs from a graph.
pub trait Subgraph:
    AdjacencyList + AdjacencyTest + GraphNew + GraphNodeEditing + GraphEdgeEditing
{
    /// Creates the subgraph induced by `nodes`: all given nodes that exist in the graph,
    /// and all edges between them. Nodes not in the graph are ignored.
    fn subgraph_by_nodes<S>(&self, nodes: &S) -> Self
    where
        S: Membership<Self::Elem> + ?Sized,
    {
        let mut sub = Self::with_capacity(nodes.len());
        sub.add_nodes(self.nodes().filter(|u| nodes.contains(u)).cloned());
        sub.add_edges(
            self.edges()
                .filter(|Edge(u, v, _)| nodes.contains(u) && nodes.contains(v)),
        );
        sub
    }

    /// Creates the subgraph spanned by `edges`: all given edges that exist in the graph
    /// and their endpoints. Edges not in the graph are ignored.
    fn subgraph_by_edges<'a>(&self, edges: impl IntoIterator<Item = &'a Edge<Self::Elem>>) -> Self {
        let mut sub = Self::new();
        sub.add_edges(
            edges
                .into_iter()
                .filter(|Edge(u, v, k)| self.has_edge(u, v, k))
                .cloned(),
        );
        sub
    }
}

impl<G> Subgraph for G where
    G: AdjacencyList + AdjacencyTest + GraphNew + GraphNodeEditing + GraphEdgeEditing
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{DirectedMultiGraph, UndirectedMultiGraph};

    #[test]
    fn induced_by_nodes() {
        let g = DirectedMultiGraph::from_edges([(1u32, 2, 7), (1, 2, 8), (2, 3, 7), (3, 1, 9)]);

        let sub = g.subgraph_by_nodes(&ElementSet::from_iter([1, 2, 4]));
        assert_eq!(sub.ordered_nodes(), vec![1, 2]);
        assert_eq!(sub.ordered_edges(), vec![Edge(1, 2, 7), Edge(1, 2, 8)]);

        assert!(g.subgraph_by_nodes(&ElementSet::<u32>::default()).is_empty());
    }

    #[test]
    fn spanned_by_edges() {
        let g = UndirectedMultiGraph::from_edges([(1u32, 2, 7), (2, 3, 7), (3, 4, 9)]);

        let sub = g.subgraph_by_edges(&[Edge(2, 1, 7), Edge(4, 3, 9), Edge(1, 4, 9)]);
        assert_eq!(sub.ordered_nodes(), vec![1, 2, 3, 4]);
        assert_eq!(sub.ordered_edges(), vec![Edge(1, 2, 7), Edge(3, 4, 9)]);
        assert!(!sub.has_any_edge(&2, &3));
    }
}
