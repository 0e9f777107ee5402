/*!
# Element Representation

Nodes and edge keys of a [`MultiGraph`](crate::repr::MultiGraph) share one opaque value type, the *element*.
Elements are compared and hashed by value: two equal elements are interchangeable, no matter where they were created.

In contrast to graphs over `0..n`, elements carry their own identity (an EC number, a compound id, ...),
so graphs built independently from one another can be combined with set algebra without any remapping.
*/

use std::{fmt::Debug, hash::Hash};

/// A value usable as node and as edge key.
///
/// Elements are owned values that must be cheap-ish to clone, since paths and result sets own copies of them.
/// `Ord` is required so that parallel edge groups of a [`Path`](crate::path::Path) have a canonical order.
pub trait Element: Clone + Eq + Hash + Ord + Debug + 'static {
    /// Returns *true* if `other` is of the same kind as `self` and may therefore replace it
    /// in [`MultiGraph::replace_node`](crate::repr::MultiGraph::replace_node) or
    /// [`MultiGraph::replace_key`](crate::repr::MultiGraph::replace_key).
    ///
    /// Element types that mix several kinds of values in one enum (e.g. substances and enzymes)
    /// should override this. The default accepts every replacement.
    fn same_kind(&self, _other: &Self) -> bool {
        true
    }
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {}
        )*
    };
}

impl_element!(
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    char,
    bool,
    String,
    &'static str,
);

impl<A: Element, B: Element> Element for (A, B) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Metabolite {
        Substance(&'static str),
        Enzyme(&'static str),
    }

    impl Element for Metabolite {
        fn same_kind(&self, other: &Self) -> bool {
            std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }

    #[test]
    fn default_kind_accepts_everything() {
        assert!(1u32.same_kind(&2));
        assert!("a".same_kind(&"b"));
        assert!((1u8, 'x').same_kind(&(2u8, 'y')));
    }

    #[test]
    fn overridden_kind() {
        let glucose = Metabolite::Substance("C00031");
        let pyruvate = Metabolite::Substance("C00022");
        let hexokinase = Metabolite::Enzyme("2.7.1.1");

        assert!(glucose.same_kind(&pyruvate));
        assert!(!glucose.same_kind(&hexokinase));
    }
}
