use std::fmt::{Debug, Display};

use crate::element::Element;

/// An edge is defined by its source, its target and the key labelling it.
/// Whether `Edge(u, v, k)` and `Edge(v, u, k)` are the same edge is up to the graph it lives in.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<E>(pub E, pub E, pub E);

impl<E: Debug> Display for Edge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?},{:?})", self.0, self.1, self.2)
    }
}

impl<E: Debug> Debug for Edge<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl<E: Element> Edge<E> {
    /// Creates a new edge from `source` to `target` labelled `key`
    pub fn new(source: E, target: E, key: E) -> Self {
        Edge(source, target, key)
    }

    pub fn source(&self) -> &E {
        &self.0
    }

    pub fn target(&self) -> &E {
        &self.1
    }

    pub fn key(&self) -> &E {
        &self.2
    }

    /// Returns the endpoints `(source, target)` as a pair of clones
    pub fn endpoints(&self) -> (E, E) {
        (self.0.clone(), self.1.clone())
    }

    /// Normalizes the edge such that the smaller endpoint comes first
    pub fn normalized(&self) -> Self {
        if self.is_normalized() {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Returns true if the smaller endpoint comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints, keeping the key
    pub fn reverse(&self) -> Self {
        Edge(self.1.clone(), self.0.clone(), self.2.clone())
    }

    /// Returns the same edge with `key` replaced
    pub fn with_key(&self, key: E) -> Self {
        Edge(self.0.clone(), self.1.clone(), key)
    }
}

impl<E> From<(E, E, E)> for Edge<E> {
    fn from(value: (E, E, E)) -> Self {
        Edge(value.0, value.1, value.2)
    }
}

impl<E: Clone> From<&(E, E, E)> for Edge<E> {
    fn from(value: &(E, E, E)) -> Self {
        Edge(value.0.clone(), value.1.clone(), value.2.clone())
    }
}

impl<E: Clone> From<&Edge<E>> for Edge<E> {
    fn from(value: &Edge<E>) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_and_reverse() {
        let e = Edge::new("b", "a", "k");
        assert!(!e.is_normalized());
        assert_eq!(e.normalized(), Edge("a", "b", "k"));
        assert_eq!(e.reverse().reverse(), e);
        assert!(Edge(1, 1, 7).is_loop());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Edge(1, 2, 3)), "(1,2,3)");
        assert_eq!(format!("{:?}", Edge("s", "t", "k")), "(\"s\",\"t\",\"k\")");
    }
}
