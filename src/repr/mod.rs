/*!
# Graph Representations

Storage of keyed multigraphs. All algorithms of this crate are written against the traits in
[`crate::ops`], so [`MultiGraph`] is the only place that knows how adjacency is laid out.

## Provided Representations

- [`DirectedMultiGraph`]: outgoing and incoming neighborhoods per node.
- [`UndirectedMultiGraph`]: one neighborhood per node holding every incident edge.
*/

use crate::{
    edge::Edge,
    element::Element,
    error::{GraphError, Result},
    ops::*,
    testing::test_graph_ops,
};

mod multigraph;
mod neighborhood;

pub use multigraph::*;
pub use neighborhood::*;
