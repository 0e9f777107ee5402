/*!
# Utilities

Provides [`Membership`] for filters that only test whether a node or key is contained, and [`SetMap`]
for the `key -> set of values` maps that redundancy attribution is built from.

You probably only need the [`ElementSet`] / [`ElementMap`] aliases from this module.
*/

use fxhash::{FxHashMap, FxHashSet};

pub mod set;
pub mod set_map;

pub use set::Membership;
pub use set_map::SetMap;

/// Default set of elements (or of anything derived from them, such as paths)
pub type ElementSet<T> = FxHashSet<T>;

/// Default map keyed by elements
pub type ElementMap<K, V> = FxHashMap<K, V>;

/// Returns `numerator / denominator`, or `0.0` if the denominator is zero.
///
/// All ratios reported by the redundancy calculators follow this convention.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_empty_denominator() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }
}
