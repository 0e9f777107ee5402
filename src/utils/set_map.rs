//! # Maps of Sets
//!
//! Redundancy attribution produces many `key -> set of values` relations (key to contributing special keys,
//! special key to contributed keys, key to paths, ...). [`SetMap`] bundles the few operations needed on them.

use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

/// A map from keys to sets of values
pub trait SetMap<K, V> {
    /// Adds `value` to the set stored at `key`, creating it if needed.
    /// Returns *true* if the value was not present before.
    fn insert_into(&mut self, key: K, value: V) -> bool;

    /// Adds all `values` to the set stored at `key`, creating it if needed.
    fn extend_into<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>;

    /// Unites `other` into `self`: sets stored under the same key are merged.
    fn merge(&mut self, other: &Self);

    /// Returns the inverse relation `value -> set of keys`
    fn inverted(&self) -> FxHashMap<V, FxHashSet<K>>;

    /// Returns the map restricted to `keys`, dropping entries with an empty set
    fn restricted_to(&self, keys: &FxHashSet<K>) -> Self;
}

impl<K, V> SetMap<K, V> for FxHashMap<K, FxHashSet<V>>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    fn insert_into(&mut self, key: K, value: V) -> bool {
        self.entry(key).or_default().insert(value)
    }

    fn extend_into<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        self.entry(key).or_default().extend(values);
    }

    fn merge(&mut self, other: &Self) {
        for (key, values) in other {
            self.extend_into(key.clone(), values.iter().cloned());
        }
    }

    fn inverted(&self) -> FxHashMap<V, FxHashSet<K>> {
        let mut inverse: FxHashMap<V, FxHashSet<K>> = FxHashMap::default();
        for (key, values) in self {
            for value in values {
                inverse.insert_into(value.clone(), key.clone());
            }
        }
        inverse
    }

    fn restricted_to(&self, keys: &FxHashSet<K>) -> Self {
        self.iter()
            .filter(|(key, values)| keys.contains(*key) && !values.is_empty())
            .map(|(key, values)| (key.clone(), values.clone()))
            .collect()
    }
}
