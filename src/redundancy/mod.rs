/*!
# Redundancy Analysis

Measures how well a graph copes with the loss of a key, i.e. of all edges labelled with it.

- [`Robustness`] asks whether source and target of every edge of the key stay connected,
- [`Flexibility`] only asks whether they keep some direct neighbor,
- [`Redundancy`] bundles both and answers queries by [`RedundancyType`],
- [`RedundancyContribution`] attributes redundancy to a set of special keys,
- [`Comparison`] and [`ContributionComparison`] contrast two graphs.

Everything is configured through [`RedundancyAnalysis`]:
```rust
use lgraphs::{prelude::*, redundancy::*};

let g = DirectedMultiGraph::from_edges([("A", "B", "x"), ("A", "B", "y"), ("B", "C", "z")]);
let redundancy = RedundancyAnalysis::new().only_largest_component(true).redundancy(&g);

assert_eq!(redundancy.redundancy_ratio(RedundancyType::Robustness), 2.0 / 3.0);
assert_eq!(redundancy.redundancy_ratio(RedundancyType::SourceFlexibility), 2.0 / 3.0);
```
*/

mod comparison;
mod contribution;
mod facade;
mod flexibility;
mod robustness;
mod types;

use crate::{
    algo::*,
    edge::Edge,
    element::Element,
    error::{GraphError, Result},
    ops::*,
    path::*,
    removal::*,
    utils::*,
};

pub use comparison::*;
pub use contribution::*;
pub use facade::*;
pub use flexibility::*;
pub use robustness::*;
pub use types::*;
