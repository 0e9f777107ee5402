/*!
# Scoped Edge Removal

Robustness and flexibility ask the same question over and over: *which paths survive if these edges
are gone?* Instead of cloning the graph for every question, [`EdgeRemoval`] removes the edges in place
and puts them back once the guard goes out of scope, no matter how the scope is left.

```
use lgraphs::prelude::*;

let mut graph = DirectedMultiGraph::from_edges([(1u32, 2, 10), (2, 3, 11)]);
{
    let pruned = graph.without_edges(&[Edge(1, 2, 10)]);
    assert_eq!(pruned.number_of_edges(), 1);
}
assert_eq!(graph.number_of_edges(), 2);
```
*/

use std::ops::Deref;

use crate::{edge::Edge, ops::*};

/// Guard holding a graph with some of its edges removed.
/// Dereferences to the pruned graph and restores the removed edges on drop.
pub struct EdgeRemoval<'a, G>
where
    G: GraphEdgeEditing,
{
    graph: &'a mut G,
    removed: Vec<Edge<G::Elem>>,
}

impl<'a, G> EdgeRemoval<'a, G>
where
    G: GraphEdgeEditing,
{
    /// Removes `edges` from `graph`. Edges that do not exist are ignored and will not be restored.
    pub fn new<'b>(graph: &'a mut G, edges: impl IntoIterator<Item = &'b Edge<G::Elem>>) -> Self {
        let removed = graph.remove_edges(edges);
        Self { graph, removed }
    }

    /// Returns the edges that were actually removed
    pub fn removed_edges(&self) -> &[Edge<G::Elem>] {
        &self.removed
    }

    /// Restores the removed edges now
    pub fn restore(self) {}
}

impl<G> Deref for EdgeRemoval<'_, G>
where
    G: GraphEdgeEditing,
{
    type Target = G;

    fn deref(&self) -> &G {
        self.graph
    }
}

impl<G> Drop for EdgeRemoval<'_, G>
where
    G: GraphEdgeEditing,
{
    fn drop(&mut self) {
        while let Some(Edge(u, v, k)) = self.removed.pop() {
            self.graph.add_edge(u, v, k);
        }
    }
}

/// Creates [`EdgeRemoval`] guards
pub trait ScopedEdgeRemoval: GraphEdgeEditing + Sized {
    /// Removes `edges` until the returned guard is dropped
    fn without_edges<'b>(
        &mut self,
        edges: impl IntoIterator<Item = &'b Edge<Self::Elem>>,
    ) -> EdgeRemoval<'_, Self> {
        EdgeRemoval::new(self, edges)
    }
}

impl<G: GraphEdgeEditing> ScopedEdgeRemoval for G {}
