/*!
`lgraphs` is a library for **l**abelled multi**graphs** and the analysis of their redundancy:
how well a graph copes with the loss of all edges that carry a given key.

# Representation

Nodes and edge keys are both *elements*: opaque, hashable and ordered values such as `u32`, `&'static str`
or your own enum (see [`element::Element`]). An **edge** is the tuple-struct `Edge(source, target, key)`.
Any number of edges with distinct keys may connect the same two nodes, so a graph is a *multigraph*.

### Directed vs Undirected

We support both **directed** and **undirected** graphs:

- In an **undirected** graph, `Edge(u, v, k)` is treated as equivalent to `Edge(v, u, k)` (we normalize edges when reporting them).
- In a **directed** graph, the edge has orientation, so `Edge(u, v, k)` and `Edge(v, u, k)` are distinct.

See the [`repr`] module for [`DirectedMultiGraph`](crate::repr::DirectedMultiGraph) and
[`UndirectedMultiGraph`](crate::repr::UndirectedMultiGraph).

# Redundancy

A key is **robust** if every edge carrying it can be bypassed by another path once the key is gone.
It is **flexible** if the endpoints of each of its edges keep a direct neighbor on the respective side.
Keys are classified as fully redundant, partially redundant or breaking, and the alternative paths are
reported alongside. On top of that, redundancy can be attributed to *special* keys, and two graphs can
be compared key by key. See [`redundancy`].

# Design

Configurable algorithms are structs altered with the *Builder* / *Setter* pattern before running them
(e.g. [`redundancy::RedundancyAnalysis`], [`algo::MajorityIntersection`]).
Commonly used functionality is also implemented via traits on the graph itself, making it usable without
configuring anything beforehand.

Calculators never clone a graph per key: they remove the edges of one key at a time from a working copy
and restore them right after (see [`removal`]).

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes elements, edges, paths, basic graph operations, and the graph representations,
- [`algo`] includes algorithm traits implemented on graphs itself such as BFS (`graph.bfs(&start)`), connected components, set algebra as well as shortest and simple paths,
- [`redundancy`] includes robustness, flexibility, contribution and comparison analysis,
- [`utils`] includes the set and map aliases all results are reported in.

In most use-cases, `use lgraphs::{prelude::*, algo::*, redundancy::*};` suffices for your needs.

```
use lgraphs::{prelude::*, redundancy::*};

let g = DirectedMultiGraph::from_edges([("A", "B", "k1"), ("A", "C", "k2"), ("C", "B", "k3")]);
let robustness = Robustness::new(&g);

assert!(robustness.fully_redundant_keys().contains("k1"));
assert_eq!(robustness.breaking_keys().len(), 2);
```
*/

pub mod algo;
pub mod edge;
pub mod element;
pub mod error;
pub mod ops;
pub mod path;
pub mod redundancy;
pub mod removal;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

pub use error::{GraphError, Result};

/// `lgraphs::prelude` includes definitions for elements, edges and paths, all basic graph operation traits,
/// scoped edge removal as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, element::*, ops::*, path::*, removal::*, repr::*};
}
