/*!
# Membership

Read-only membership tests, so that filters over nodes or keys accept whatever collection the caller
already holds (`FxHashSet`, `BTreeSet`, or a plain slice) without copying it into a set first.
*/

use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
};

/// A collection that can answer whether it holds an element.
pub trait Membership<T> {
    fn contains(&self, value: &T) -> bool;

    /// Number of (distinct) elements held; used as a capacity hint only.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Eq + Hash, S: BuildHasher> Membership<T> for HashSet<T, S> {
    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T: Ord> Membership<T> for BTreeSet<T> {
    fn contains(&self, value: &T) -> bool {
        BTreeSet::contains(self, value)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

/// Linear scan; fine for the handful of keys usually passed by hand.
impl<T: PartialEq> Membership<T> for [T] {
    fn contains(&self, value: &T) -> bool {
        <[T]>::contains(self, value)
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: PartialEq, const N: usize> Membership<T> for [T; N] {
    fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }

    fn len(&self) -> usize {
        N
    }
}
