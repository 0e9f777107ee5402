/*!
# Graph Algorithms

This module provides the **graph algorithms** the redundancy analysis is built from.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use lgraphs::algo::*;
```
and gain access to traversal, connectivity, subgraphs, set algebra as well as shortest and simple paths.
Most algorithms are implemented as traits on the graph itself; those with options additionally
come as configurable structs (e.g. [`SimplePathSearch`], [`MajorityIntersection`]).
*/

mod connectivity;
mod set_algebra;
mod shortest_paths;
mod simple_paths;
mod subgraph;
mod traversal;

use crate::{
    edge::Edge,
    element::Element,
    error::{GraphError, Result},
    ops::*,
    path::*,
    utils::*,
};

pub use connectivity::*;
pub use set_algebra::*;
pub use shortest_paths::*;
pub use simple_paths::*;
pub use subgraph::*;
pub use traversal::*;
