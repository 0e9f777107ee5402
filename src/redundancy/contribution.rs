/*!
# Contribution

Attributes redundancy to a set of *special* keys: a redundant key is *contributed to* by a special key
if that special key lies on one of its alternative paths. Such paths are reported as [`MarkedPath`]s.

Contributions are collected per side and per class. A key only counts for a side if a special key was
found on one of the paths of that side. Ratios relate the number of contributed keys to the number of
redundant keys of the same class.
*/

use std::hash::Hash;

use tracing::debug;

use super::*;

/// Contribution of special keys to the keys of one redundancy class
#[derive(Debug, Clone)]
pub struct ClassContribution<E: Element> {
    redundant_keys: usize,
    special_for_key: ElementMap<E, ElementSet<E>>,
    keys_for_special: ElementMap<E, ElementSet<E>>,
    paths_for_key: ElementMap<E, ElementSet<MarkedPath<E>>>,
}

impl<E: Element> ClassContribution<E> {
    fn new(redundant_keys: usize) -> Self {
        Self {
            redundant_keys,
            special_for_key: ElementMap::default(),
            keys_for_special: ElementMap::default(),
            paths_for_key: ElementMap::default(),
        }
    }

    fn record(&mut self, key: E, specials: ElementSet<E>, paths: ElementSet<MarkedPath<E>>) {
        self.special_for_key.extend_into(key.clone(), specials);
        self.paths_for_key.extend_into(key, paths);
    }

    fn finish(mut self) -> Self {
        self.keys_for_special = self.special_for_key.inverted();
        self
    }

    /// Number of keys of this class
    pub fn num_redundant_keys(&self) -> usize {
        self.redundant_keys
    }

    /// Number of keys of this class with a special key on one of their paths
    pub fn num_contributed_keys(&self) -> usize {
        self.special_for_key.len()
    }

    pub fn ratio(&self) -> f64 {
        ratio(self.num_contributed_keys(), self.redundant_keys)
    }

    /// key -> special keys on its paths
    pub fn contributing_special_for_key(&self) -> &ElementMap<E, ElementSet<E>> {
        &self.special_for_key
    }

    /// special key -> keys on whose paths it lies
    pub fn contributed_keys_for_special(&self) -> &ElementMap<E, ElementSet<E>> {
        &self.keys_for_special
    }

    /// key -> its paths carrying a special key
    pub fn contributed_paths_for_key(&self) -> &ElementMap<E, ElementSet<MarkedPath<E>>> {
        &self.paths_for_key
    }
}

/// Contributions to fully and partially redundant keys of one side
#[derive(Debug, Clone)]
pub struct ContributionClasses<E: Element> {
    full: ClassContribution<E>,
    partial: ClassContribution<E>,
    marked_paths: ElementSet<MarkedPath<E>>,
    paths_with_special_keys_ratio: f64,
}

impl<E: Element> ContributionClasses<E> {
    pub(crate) fn new(
        metrics: &dyn RedundancyMetrics<E>,
        side: Side,
        special_keys: &ElementSet<E>,
    ) -> Self {
        let classes = metrics.classes(side);
        let mut full = ClassContribution::new(classes.count(Coverage::Full));
        let mut partial = ClassContribution::new(classes.count(Coverage::Partial));
        let mut marked_paths = ElementSet::default();

        for key in classes.keys() {
            let mut specials = ElementSet::default();
            let mut key_paths = ElementSet::default();
            for path in metrics.paths_of_key(key, side) {
                let marked = MarkedPath::with_special_keys(path.clone(), special_keys);
                if marked.has_special_key() {
                    specials.extend(marked.special_keys().into_iter().flatten().cloned());
                    key_paths.insert(marked);
                }
            }
            if key_paths.is_empty() {
                continue;
            }

            marked_paths.extend(key_paths.iter().cloned());
            match classes.class_of(key) {
                Some(Coverage::Full) => full.record(key.clone(), specials, key_paths),
                Some(_) => partial.record(key.clone(), specials, key_paths),
                None => {}
            }
        }

        let paths_with_special_keys_ratio = ratio(marked_paths.len(), metrics.paths(side).len());
        Self {
            full: full.finish(),
            partial: partial.finish(),
            marked_paths,
            paths_with_special_keys_ratio,
        }
    }

    pub fn full(&self) -> &ClassContribution<E> {
        &self.full
    }

    pub fn partial(&self) -> &ClassContribution<E> {
        &self.partial
    }

    /// All paths carrying a special key, including those of partially redundant keys
    pub fn marked_paths(&self) -> &ElementSet<MarkedPath<E>> {
        &self.marked_paths
    }

    /// Share of all alternative paths of the side that carry a special key
    pub fn paths_with_special_keys_ratio(&self) -> f64 {
        self.paths_with_special_keys_ratio
    }

    /// Share of keys redundant under `coverage` that have a special key on one of their paths
    pub fn key_contribution_ratio(&self, coverage: Coverage) -> f64 {
        match coverage {
            Coverage::Full => self.full.ratio(),
            Coverage::Partial => self.partial.ratio(),
            Coverage::Both => ratio(
                self.full.num_contributed_keys() + self.partial.num_contributed_keys(),
                self.full.num_redundant_keys() + self.partial.num_redundant_keys(),
            ),
        }
    }

    pub fn contributing_special_for_key(&self, coverage: Coverage) -> ElementMap<E, ElementSet<E>> {
        self.merged(coverage, ClassContribution::contributing_special_for_key)
    }

    pub fn contributed_keys_for_special(&self, coverage: Coverage) -> ElementMap<E, ElementSet<E>> {
        self.merged(coverage, ClassContribution::contributed_keys_for_special)
    }

    pub fn contributed_paths_for_key(
        &self,
        coverage: Coverage,
    ) -> ElementMap<E, ElementSet<MarkedPath<E>>> {
        self.merged(coverage, ClassContribution::contributed_paths_for_key)
    }

    fn merged<T, F>(&self, coverage: Coverage, select: F) -> ElementMap<E, ElementSet<T>>
    where
        T: Clone + Eq + Hash,
        F: Fn(&ClassContribution<E>) -> &ElementMap<E, ElementSet<T>>,
    {
        match coverage {
            Coverage::Full => select(&self.full).clone(),
            Coverage::Partial => select(&self.partial).clone(),
            Coverage::Both => {
                let mut both = select(&self.full).clone();
                both.merge(select(&self.partial));
                both
            }
        }
    }
}

/// Common view on [`RobustnessContribution`] and [`FlexibilityContribution`], queried by [`RedundancyType`]
pub trait ContributionMetrics<E: Element> {
    fn contributions(&self, side: Side) -> &ContributionClasses<E>;

    /// Share of keys redundant under `ty` that have a special key on one of their paths
    fn key_contribution_ratio(&self, ty: RedundancyType) -> f64 {
        self.contributions(ty.side())
            .key_contribution_ratio(ty.coverage())
    }

    fn contributed_keys_for_special(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<E>> {
        self.contributions(ty.side())
            .contributed_keys_for_special(ty.coverage())
    }

    fn contributing_special_for_key(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<E>> {
        self.contributions(ty.side())
            .contributing_special_for_key(ty.coverage())
    }

    /// All marked paths of the side of `ty`, always including partial redundancy
    fn contributed_paths(&self, ty: RedundancyType) -> ElementSet<MarkedPath<E>> {
        self.contributions(ty.side()).marked_paths().clone()
    }

    fn contributed_paths_for_key(
        &self,
        ty: RedundancyType,
    ) -> ElementMap<E, ElementSet<MarkedPath<E>>> {
        self.contributions(ty.side())
            .contributed_paths_for_key(ty.coverage())
    }
}

/// Contribution of special keys to the robustness of a graph
#[derive(Debug, Clone)]
pub struct RobustnessContribution<E: Element> {
    num_special_keys: usize,
    contributions: ContributionClasses<E>,
}

impl<E: Element> RobustnessContribution<E> {
    pub fn new(robustness: &Robustness<E>, special_keys: &ElementSet<E>) -> Self {
        let contributions = ContributionClasses::new(robustness, Side::Combined, special_keys);
        debug!(
            special_keys = special_keys.len(),
            contributed = contributions.full.num_contributed_keys(),
            partially_contributed = contributions.partial.num_contributed_keys(),
            marked_paths = contributions.marked_paths.len(),
            "robustness contribution computed"
        );
        Self {
            num_special_keys: special_keys.len(),
            contributions,
        }
    }

    pub fn num_special_keys(&self) -> usize {
        self.num_special_keys
    }

    pub fn paths_with_special_keys_ratio(&self) -> f64 {
        self.contributions.paths_with_special_keys_ratio()
    }
}

impl<E: Element> ContributionMetrics<E> for RobustnessContribution<E> {
    fn contributions(&self, _side: Side) -> &ContributionClasses<E> {
        &self.contributions
    }
}

/// Contribution of special keys to the flexibility of a graph, per side
#[derive(Debug, Clone)]
pub struct FlexibilityContribution<E: Element> {
    num_special_keys: usize,
    combined: ContributionClasses<E>,
    target: ContributionClasses<E>,
    source: ContributionClasses<E>,
}

impl<E: Element> FlexibilityContribution<E> {
    pub fn new(flexibility: &Flexibility<E>, special_keys: &ElementSet<E>) -> Self {
        let [combined, target, source] = [Side::Combined, Side::Target, Side::Source]
            .map(|side| ContributionClasses::new(flexibility, side, special_keys));
        debug!(
            special_keys = special_keys.len(),
            contributed = combined.full.num_contributed_keys(),
            target_contributed = target.full.num_contributed_keys(),
            source_contributed = source.full.num_contributed_keys(),
            marked_paths = combined.marked_paths.len(),
            "flexibility contribution computed"
        );
        Self {
            num_special_keys: special_keys.len(),
            combined,
            target,
            source,
        }
    }

    pub fn num_special_keys(&self) -> usize {
        self.num_special_keys
    }

    pub fn paths_with_special_keys_ratio(&self, side: Side) -> f64 {
        self.contributions(side).paths_with_special_keys_ratio()
    }
}

impl<E: Element> ContributionMetrics<E> for FlexibilityContribution<E> {
    fn contributions(&self, side: Side) -> &ContributionClasses<E> {
        match side {
            Side::Combined => &self.combined,
            Side::Target => &self.target,
            Side::Source => &self.source,
        }
    }
}

/// Contribution of special keys to all kinds of redundancy of a graph.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, redundancy::*, utils::ElementSet};
///
/// let g = DirectedMultiGraph::from_edges([("A", "B", "k1"), ("A", "C", "k2"), ("C", "B", "k3")]);
/// let contribution = RedundancyContribution::from_graph(&g, &ElementSet::from_iter(["k2"]));
///
/// assert_eq!(contribution.key_contribution_ratio(RedundancyType::Robustness), 1.0);
/// assert!(contribution.contributed_keys_for_special(RedundancyType::Robustness)["k2"].contains("k1"));
/// ```
#[derive(Debug, Clone)]
pub struct RedundancyContribution<E: Element> {
    robustness: RobustnessContribution<E>,
    flexibility: FlexibilityContribution<E>,
}

impl<E: Element> RedundancyContribution<E> {
    pub fn new(redundancy: &Redundancy<E>, special_keys: &ElementSet<E>) -> Self {
        Self {
            robustness: RobustnessContribution::new(redundancy.robustness(), special_keys),
            flexibility: FlexibilityContribution::new(redundancy.flexibility(), special_keys),
        }
    }

    /// Computes the redundancy of `graph` with default options and attributes it to `special_keys`
    pub fn from_graph<G>(graph: &G, special_keys: &ElementSet<E>) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        Self::new(&Redundancy::new(graph), special_keys)
    }

    pub fn robustness(&self) -> &RobustnessContribution<E> {
        &self.robustness
    }

    pub fn flexibility(&self) -> &FlexibilityContribution<E> {
        &self.flexibility
    }

    pub fn metrics(&self, calculator: Calculator) -> &dyn ContributionMetrics<E> {
        match calculator {
            Calculator::Robustness => &self.robustness,
            Calculator::Flexibility => &self.flexibility,
        }
    }

    /// Share of keys redundant under `ty` that have a special key on one of their paths
    pub fn key_contribution_ratio(&self, ty: RedundancyType) -> f64 {
        self.metrics(ty.calculator()).key_contribution_ratio(ty)
    }

    /// special key -> keys redundant under `ty` with that special key on one of their paths
    pub fn contributed_keys_for_special(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<E>> {
        self.metrics(ty.calculator())
            .contributed_keys_for_special(ty)
    }

    /// key redundant under `ty` -> special keys on its paths
    pub fn contributing_special_for_key(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<E>> {
        self.metrics(ty.calculator())
            .contributing_special_for_key(ty)
    }

    /// All paths carrying a special key, always including partial redundancy.
    /// Target- and source-flexibility only report the paths of their side.
    pub fn contributed_paths(&self, ty: RedundancyType) -> ElementSet<MarkedPath<E>> {
        self.metrics(ty.calculator()).contributed_paths(ty)
    }

    /// key redundant under `ty` -> its paths carrying a special key
    pub fn contributed_paths_for_key(
        &self,
        ty: RedundancyType,
    ) -> ElementMap<E, ElementSet<MarkedPath<E>>> {
        self.metrics(ty.calculator()).contributed_paths_for_key(ty)
    }
}

/// Contribution computed over a [`RestrictedRedundancy`].
///
/// Queries for a type of the other calculator fail with [`GraphError::ExcludedRedundancyType`].
#[derive(Debug, Clone)]
pub enum RestrictedRedundancyContribution<E: Element> {
    Robustness(RobustnessContribution<E>),
    Flexibility(FlexibilityContribution<E>),
}

impl<E: Element> RestrictedRedundancyContribution<E> {
    pub fn new(redundancy: &RestrictedRedundancy<E>, special_keys: &ElementSet<E>) -> Self {
        match redundancy {
            RestrictedRedundancy::Robustness(robustness) => {
                Self::Robustness(RobustnessContribution::new(robustness, special_keys))
            }
            RestrictedRedundancy::Flexibility(flexibility) => {
                Self::Flexibility(FlexibilityContribution::new(flexibility, special_keys))
            }
        }
    }

    pub fn metrics(&self, ty: RedundancyType) -> Result<&dyn ContributionMetrics<E>> {
        match (self, ty.calculator()) {
            (Self::Robustness(robustness), Calculator::Robustness) => Ok(robustness),
            (Self::Flexibility(flexibility), Calculator::Flexibility) => Ok(flexibility),
            _ => Err(GraphError::ExcludedRedundancyType(ty)),
        }
    }

    pub fn key_contribution_ratio(&self, ty: RedundancyType) -> Result<f64> {
        Ok(self.metrics(ty)?.key_contribution_ratio(ty))
    }

    pub fn contributed_keys_for_special(
        &self,
        ty: RedundancyType,
    ) -> Result<ElementMap<E, ElementSet<E>>> {
        Ok(self.metrics(ty)?.contributed_keys_for_special(ty))
    }

    pub fn contributing_special_for_key(
        &self,
        ty: RedundancyType,
    ) -> Result<ElementMap<E, ElementSet<E>>> {
        Ok(self.metrics(ty)?.contributing_special_for_key(ty))
    }

    pub fn contributed_paths(&self, ty: RedundancyType) -> Result<ElementSet<MarkedPath<E>>> {
        Ok(self.metrics(ty)?.contributed_paths(ty))
    }

    pub fn contributed_paths_for_key(
        &self,
        ty: RedundancyType,
    ) -> Result<ElementMap<E, ElementSet<MarkedPath<E>>>> {
        Ok(self.metrics(ty)?.contributed_paths_for_key(ty))
    }
}
