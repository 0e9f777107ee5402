/*!
# Comparison

Compares the redundancy of two graphs *A* and *B* on the keys they have in common.
Under a given [`RedundancyType`], a common key that is redundant in at least one graph has
- [`Change::Lost`] its redundancy if it is redundant in A only,
- [`Change::Conserved`] it if it is redundant in both,
- [`Change::Added`] it if it is redundant in B only.

[`ContributionComparison`] additionally attributes these changes to special keys of either graph.
*/

use std::hash::Hash;

use itertools::Itertools;
use tracing::debug;

use super::*;

/// How the redundancy of a key changes from graph A to graph B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Lost,
    Conserved,
    Added,
}

impl Change {
    pub const ALL: [Change; 3] = [Self::Lost, Self::Conserved, Self::Added];

    /// Returns the change of a key redundant in A and/or B; `None` if it is redundant in neither
    pub fn classify(in_a: bool, in_b: bool) -> Option<Self> {
        match (in_a, in_b) {
            (true, false) => Some(Self::Lost),
            (true, true) => Some(Self::Conserved),
            (false, true) => Some(Self::Added),
            (false, false) => None,
        }
    }

    /// Returns *true* if the change is reported from the results of graph A
    pub fn involves_a(self) -> bool {
        self != Self::Added
    }

    /// Returns *true* if the change is reported from the results of graph B
    pub fn involves_b(self) -> bool {
        self != Self::Lost
    }
}

/// Paths split by the graph(s) they were found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSplit<P: Eq + Hash> {
    pub only_a: ElementSet<P>,
    pub both: ElementSet<P>,
    pub only_b: ElementSet<P>,
}

impl<P: Eq + Hash> Default for PathSplit<P> {
    fn default() -> Self {
        Self {
            only_a: ElementSet::default(),
            both: ElementSet::default(),
            only_b: ElementSet::default(),
        }
    }
}

impl<P: Clone + Eq + Hash> PathSplit<P> {
    /// Splits the paths of A and B into those only in A, those in both, and those only in B
    pub fn new(a: &ElementSet<P>, b: &ElementSet<P>) -> Self {
        Self {
            only_a: a.difference(b).cloned().collect(),
            both: a.intersection(b).cloned().collect(),
            only_b: b.difference(a).cloned().collect(),
        }
    }

    /// Splits the paths of a key under `change`: lost keys only report paths of A,
    /// added keys only paths of B, and conserved keys are split.
    pub fn for_change(change: Change, a: Option<&ElementSet<P>>, b: Option<&ElementSet<P>>) -> Self {
        let a = a.filter(|_| change.involves_a());
        let b = b.filter(|_| change.involves_b());
        match (a, b) {
            (Some(a), Some(b)) => Self::new(a, b),
            (a, b) => Self {
                only_a: a.cloned().unwrap_or_default(),
                both: ElementSet::default(),
                only_b: b.cloned().unwrap_or_default(),
            },
        }
    }

    /// Returns the part matching `change`: lost is A∖B, conserved is A∩B, added is B∖A
    pub fn into_part(self, change: Change) -> ElementSet<P> {
        match change {
            Change::Lost => self.only_a,
            Change::Conserved => self.both,
            Change::Added => self.only_b,
        }
    }

    pub fn len(&self) -> usize {
        self.only_a.len() + self.both.len() + self.only_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Redundancy of two graphs, compared on their common keys.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, redundancy::*};
///
/// let a = DirectedMultiGraph::from_edges([("A", "B", "k"), ("A", "C", "x")]);
/// let b = DirectedMultiGraph::from_edges([("A", "B", "k"), ("A", "C", "x"), ("C", "B", "y")]);
/// let comparison = Comparison::new(&a, &b);
///
/// let added = comparison.redundancy_keys(RedundancyType::Robustness, Change::Added);
/// assert!(added.contains("k"));
/// assert_eq!(comparison.redundancy_ratio(RedundancyType::Robustness, Change::Added), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Comparison<E: Element> {
    a: Redundancy<E>,
    b: Redundancy<E>,
    common_keys: ElementSet<E>,
}

impl<E: Element> Comparison<E> {
    /// Compares `graph_a` with `graph_b` using default options; see [`RedundancyAnalysis::compare`]
    pub fn new<G>(graph_a: &G, graph_b: &G) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        RedundancyAnalysis::new().compare(graph_a, graph_b)
    }

    pub(super) fn from_parts(a: Redundancy<E>, b: Redundancy<E>, common_keys: ElementSet<E>) -> Self {
        debug!(common_keys = common_keys.len(), "comparing redundancy");
        Self { a, b, common_keys }
    }

    pub fn redundancy_a(&self) -> &Redundancy<E> {
        &self.a
    }

    pub fn redundancy_b(&self) -> &Redundancy<E> {
        &self.b
    }

    /// Keys present in both graphs
    pub fn common_keys(&self) -> &ElementSet<E> {
        &self.common_keys
    }

    /// Common keys whose redundancy under `ty` underwent `change`
    pub fn redundancy_keys(&self, ty: RedundancyType, change: Change) -> ElementSet<E> {
        let in_a = self.a.redundant_keys(ty);
        let in_b = self.b.redundant_keys(ty);
        self.common_keys
            .iter()
            .filter(|key| Change::classify(in_a.contains(*key), in_b.contains(*key)) == Some(change))
            .cloned()
            .collect()
    }

    /// Share of common keys whose redundancy under `ty` underwent `change`; `0.0` without common keys
    pub fn redundancy_ratio(&self, ty: RedundancyType, change: Change) -> f64 {
        ratio(self.redundancy_keys(ty, change).len(), self.common_keys.len())
    }

    /// Alternative paths of every key whose redundancy underwent `change`.
    /// Lost keys only carry paths of A, added keys only paths of B.
    pub fn redundancy_paths_for_key(
        &self,
        ty: RedundancyType,
        change: Change,
    ) -> ElementMap<E, PathSplit<Path<E>>> {
        let paths_a = change
            .involves_a()
            .then(|| self.a.redundancy_paths_for_key(ty))
            .unwrap_or_default();
        let paths_b = change
            .involves_b()
            .then(|| self.b.redundancy_paths_for_key(ty))
            .unwrap_or_default();

        self.redundancy_keys(ty, change)
            .into_iter()
            .map(|key| {
                let split = PathSplit::for_change(change, paths_a.get(&key), paths_b.get(&key));
                (key, split)
            })
            .collect()
    }

    /// Alternative paths of A and B compared as wholes: lost is A∖B, conserved is A∩B, added is B∖A
    pub fn redundancy_paths(&self, ty: RedundancyType, change: Change) -> ElementSet<Path<E>> {
        PathSplit::new(&self.a.redundancy_paths(ty), &self.b.redundancy_paths(ty)).into_part(change)
    }
}

/// Attribution of the changes of a [`Comparison`] to special keys of A and B
#[derive(Debug, Clone)]
pub struct ContributionComparison<'a, E: Element> {
    comparison: &'a Comparison<E>,
    a: RedundancyContribution<E>,
    b: RedundancyContribution<E>,
}

impl<'a, E: Element> ContributionComparison<'a, E> {
    /// The special keys of both graphs may differ
    pub fn new(
        comparison: &'a Comparison<E>,
        special_keys_a: &ElementSet<E>,
        special_keys_b: &ElementSet<E>,
    ) -> Self {
        Self {
            comparison,
            a: RedundancyContribution::new(comparison.redundancy_a(), special_keys_a),
            b: RedundancyContribution::new(comparison.redundancy_b(), special_keys_b),
        }
    }

    pub fn comparison(&self) -> &'a Comparison<E> {
        self.comparison
    }

    pub fn contribution_a(&self) -> &RedundancyContribution<E> {
        &self.a
    }

    pub fn contribution_b(&self) -> &RedundancyContribution<E> {
        &self.b
    }

    /// Share of keys with `change` that have a special key on one of their paths.
    /// For conserved keys, a special key in A or in B suffices.
    pub fn key_contribution_ratio(&self, ty: RedundancyType, change: Change) -> f64 {
        let keys = self.comparison.redundancy_keys(ty, change);
        let special_a = change
            .involves_a()
            .then(|| self.a.contributing_special_for_key(ty))
            .unwrap_or_default();
        let special_b = change
            .involves_b()
            .then(|| self.b.contributing_special_for_key(ty))
            .unwrap_or_default();

        let contributed = keys
            .iter()
            .filter(|key| special_a.contains_key(*key) || special_b.contains_key(*key))
            .count();
        ratio(contributed, keys.len())
    }

    /// special key -> keys with `change` that it lies on a path of
    pub fn contributed_keys_for_special(
        &self,
        ty: RedundancyType,
        change: Change,
    ) -> ElementMap<E, ElementSet<E>> {
        let keys = self.comparison.redundancy_keys(ty, change);
        let mut result = ElementMap::default();

        let sides = [(change.involves_a(), &self.a), (change.involves_b(), &self.b)];
        for (_, contribution) in sides.into_iter().filter(|(involved, _)| *involved) {
            for (special, contributed) in contribution.contributed_keys_for_special(ty) {
                let overlap = contributed.intersection(&keys).cloned().collect_vec();
                if !overlap.is_empty() {
                    result.extend_into(special, overlap);
                }
            }
        }
        result
    }

    /// Marked paths of A and B compared as wholes: lost is A∖B, conserved is A∩B, added is B∖A
    pub fn contributed_paths(&self, ty: RedundancyType, change: Change) -> ElementSet<MarkedPath<E>> {
        PathSplit::new(&self.a.contributed_paths(ty), &self.b.contributed_paths(ty)).into_part(change)
    }

    /// Marked paths of every key with `change`; keys without any are left out
    pub fn contributed_paths_for_key(
        &self,
        ty: RedundancyType,
        change: Change,
    ) -> ElementMap<E, PathSplit<MarkedPath<E>>> {
        let paths_a = change
            .involves_a()
            .then(|| self.a.contributed_paths_for_key(ty))
            .unwrap_or_default();
        let paths_b = change
            .involves_b()
            .then(|| self.b.contributed_paths_for_key(ty))
            .unwrap_or_default();

        self.comparison
            .redundancy_keys(ty, change)
            .into_iter()
            .filter_map(|key| {
                let split = PathSplit::for_change(change, paths_a.get(&key), paths_b.get(&key));
                (!split.is_empty()).then_some((key, split))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{
        repr::DirectedMultiGraph,
        testing::{detour_graph, random_multigraph},
    };

    fn without_detour() -> DirectedMultiGraph<&'static str> {
        DirectedMultiGraph::from_edges([("A", "B", "k"), ("A", "C", "x")])
    }

    fn with_detour() -> DirectedMultiGraph<&'static str> {
        DirectedMultiGraph::from_edges([("A", "B", "k"), ("A", "C", "x"), ("C", "B", "y")])
    }

    #[test]
    fn change_classification() {
        assert_eq!(Change::classify(true, false), Some(Change::Lost));
        assert_eq!(Change::classify(true, true), Some(Change::Conserved));
        assert_eq!(Change::classify(false, true), Some(Change::Added));
        assert_eq!(Change::classify(false, false), None);
        assert!(Change::Conserved.involves_a() && Change::Conserved.involves_b());
        assert!(!Change::Lost.involves_b());
        assert!(!Change::Added.involves_a());
    }

    #[test]
    fn detour_adds_redundancy() {
        let comparison = Comparison::new(&without_detour(), &with_detour());
        let ty = RedundancyType::Robustness;

        assert_eq!(comparison.common_keys(), &ElementSet::from_iter(["k", "x"]));
        assert_eq!(
            comparison.redundancy_keys(ty, Change::Added),
            ElementSet::from_iter(["k"])
        );
        assert_eq!(comparison.redundancy_ratio(ty, Change::Added), 0.5);
        assert_eq!(comparison.redundancy_ratio(ty, Change::Lost), 0.0);
        assert!(comparison.redundancy_keys(ty, Change::Conserved).is_empty());

        let for_key = comparison.redundancy_paths_for_key(ty, Change::Added);
        let split = &for_key[&"k"];
        assert!(split.only_a.is_empty() && split.both.is_empty());
        assert_eq!(
            split.only_b.iter().map(|p| p.to_string()).collect_vec(),
            vec![r#""A" -"x"-> "C" -"y"-> "B""#]
        );
        assert_eq!(comparison.redundancy_paths(ty, Change::Added).len(), 1);
        assert!(comparison.redundancy_paths(ty, Change::Lost).is_empty());
    }

    #[test]
    fn removing_detour_loses_redundancy() {
        let comparison = Comparison::new(&with_detour(), &without_detour());
        let ty = RedundancyType::Robustness;

        assert_eq!(comparison.redundancy_keys(ty, Change::Lost), ElementSet::from_iter(["k"]));
        let for_key = comparison.redundancy_paths_for_key(ty, Change::Lost);
        assert_eq!(for_key[&"k"].only_a.len(), 1);
        assert!(for_key[&"k"].only_b.is_empty());
    }

    #[test]
    fn identical_graphs_conserve_everything() {
        let g = detour_graph();
        let comparison = Comparison::new(&g, &g);

        for ty in RedundancyType::ALL {
            assert!(comparison.redundancy_keys(ty, Change::Lost).is_empty());
            assert!(comparison.redundancy_keys(ty, Change::Added).is_empty());
            assert_eq!(
                comparison.redundancy_keys(ty, Change::Conserved),
                comparison.redundancy_a().redundant_keys(ty)
            );
            for split in comparison
                .redundancy_paths_for_key(ty, Change::Conserved)
                .into_values()
            {
                assert!(split.only_a.is_empty() && split.only_b.is_empty());
            }
        }
        assert_eq!(
            comparison.redundancy_ratio(RedundancyType::Robustness, Change::Conserved),
            0.4
        );
    }

    #[test]
    fn changes_partition_redundant_common_keys() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for _ in 0..10 {
            let a = random_multigraph(rng, 10, 8, 25, false);
            let b = random_multigraph(rng, 10, 8, 25, false);
            let comparison = Comparison::new(&a, &b);

            for ty in RedundancyType::ALL {
                let changes = Change::ALL.map(|change| comparison.redundancy_keys(ty, change));
                let total: usize = changes.iter().map(|keys| keys.len()).sum();
                let union: ElementSet<u32> = changes.iter().flatten().copied().collect();
                assert_eq!(total, union.len());

                let redundant_common: ElementSet<u32> = comparison
                    .common_keys()
                    .iter()
                    .filter(|k| {
                        comparison.redundancy_a().redundant_keys(ty).contains(*k)
                            || comparison.redundancy_b().redundant_keys(ty).contains(*k)
                    })
                    .copied()
                    .collect();
                assert_eq!(union, redundant_common);
            }
        }
    }

    #[test]
    fn contribution_of_changes() {
        let comparison = Comparison::new(&without_detour(), &with_detour());
        let special = ElementSet::from_iter(["y"]);
        let contribution = ContributionComparison::new(&comparison, &special, &special);
        let ty = RedundancyType::Robustness;

        assert_eq!(contribution.key_contribution_ratio(ty, Change::Added), 1.0);
        assert_eq!(contribution.key_contribution_ratio(ty, Change::Lost), 0.0);
        assert_eq!(
            contribution.contributed_keys_for_special(ty, Change::Added),
            ElementMap::from_iter([("y", ElementSet::from_iter(["k"]))])
        );
        assert!(contribution.contributed_keys_for_special(ty, Change::Lost).is_empty());
        assert_eq!(contribution.contributed_paths(ty, Change::Added).len(), 1);

        let for_key = contribution.contributed_paths_for_key(ty, Change::Added);
        assert_eq!(for_key[&"k"].only_b.len(), 1);
        assert!(contribution.contributed_paths_for_key(ty, Change::Conserved).is_empty());
    }

    #[test]
    fn path_splits_compare_by_content() {
        let a = ElementSet::from_iter([1u32, 2, 3]);
        let b = ElementSet::from_iter([3u32, 4]);

        let split = PathSplit::new(&a, &b);
        assert_eq!(
            split,
            PathSplit {
                only_a: ElementSet::from_iter([1, 2]),
                both: ElementSet::from_iter([3]),
                only_b: ElementSet::from_iter([4]),
            }
        );
        assert_ne!(split, PathSplit::default());
        assert_eq!(
            PathSplit::new(&a, &a),
            PathSplit {
                both: a.clone(),
                ..Default::default()
            }
        );

        let g = detour_graph();
        let comparison = Comparison::new(&g, &g);
        let ty = RedundancyType::Robustness;
        assert_eq!(
            comparison.redundancy_paths_for_key(ty, Change::Conserved),
            Comparison::new(&g, &g).redundancy_paths_for_key(ty, Change::Conserved)
        );
    }

    #[test]
    fn conserved_contribution_is_split() {
        let g = detour_graph();
        let comparison = Comparison::new(&g, &g);
        let contribution = ContributionComparison::new(
            &comparison,
            &ElementSet::from_iter(["y"]),
            &ElementSet::from_iter(["x"]),
        );
        let ty = RedundancyType::Robustness;

        // `x` is backed up by `y` in A, `y` by `x` in B
        assert_eq!(contribution.key_contribution_ratio(ty, Change::Conserved), 1.0);
        let for_special = contribution.contributed_keys_for_special(ty, Change::Conserved);
        assert_eq!(for_special[&"y"], ElementSet::from_iter(["x"]));
        assert_eq!(for_special[&"x"], ElementSet::from_iter(["y"]));

        let for_key = contribution.contributed_paths_for_key(ty, Change::Conserved);
        assert_eq!(for_key[&"x"].only_a.len(), 1);
        assert!(for_key[&"x"].only_b.is_empty());
        assert_eq!(for_key[&"y"].only_b.len(), 1);
        assert!(contribution.contributed_paths(ty, Change::Conserved).is_empty());
    }
}
