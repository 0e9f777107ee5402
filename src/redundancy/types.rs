use super::*;

/// Which calculator a [`RedundancyType`] is answered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calculator {
    Robustness,
    Flexibility,
}

/// Which alternative paths of a removed edge count.
/// Robustness only knows [`Side::Combined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Paths reconnecting source and target (robustness), or paths around source *and* target (flexibility)
    Combined,
    /// Paths into the target of the removed edge
    Target,
    /// Paths out of the source of the removed edge
    Source,
}

/// Which key classes a [`RedundancyType`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// Keys all of whose edges are redundant
    Full,
    /// Keys some but not all of whose edges are redundant
    Partial,
    /// Union of [`Coverage::Full`] and [`Coverage::Partial`]
    Both,
}

/// Every kind of redundancy the analysis can report on.
///
/// Robustness implies flexibility: a key that is robust is flexible as well.
/// A key is (fully) flexible exactly if it is (fully) target-flexible and (fully) source-flexible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RedundancyType {
    #[default]
    Robustness,
    RobustnessPartial,
    RobustnessBoth,
    Flexibility,
    FlexibilityPartial,
    FlexibilityBoth,
    TargetFlexibility,
    TargetFlexibilityPartial,
    TargetFlexibilityBoth,
    SourceFlexibility,
    SourceFlexibilityPartial,
    SourceFlexibilityBoth,
}

impl RedundancyType {
    pub const ALL: [RedundancyType; 12] = [
        Self::Robustness,
        Self::RobustnessPartial,
        Self::RobustnessBoth,
        Self::Flexibility,
        Self::FlexibilityPartial,
        Self::FlexibilityBoth,
        Self::TargetFlexibility,
        Self::TargetFlexibilityPartial,
        Self::TargetFlexibilityBoth,
        Self::SourceFlexibility,
        Self::SourceFlexibilityPartial,
        Self::SourceFlexibilityBoth,
    ];

    /// Assembles a type from its parts.
    /// Returns `None` for robustness restricted to one side, which does not exist.
    pub fn from_parts(calculator: Calculator, side: Side, coverage: Coverage) -> Option<Self> {
        use Coverage::*;
        use RedundancyType::*;
        Some(match (calculator, side, coverage) {
            (Calculator::Robustness, Side::Combined, Full) => Robustness,
            (Calculator::Robustness, Side::Combined, Partial) => RobustnessPartial,
            (Calculator::Robustness, Side::Combined, Both) => RobustnessBoth,
            (Calculator::Robustness, _, _) => return None,
            (Calculator::Flexibility, Side::Combined, Full) => Flexibility,
            (Calculator::Flexibility, Side::Combined, Partial) => FlexibilityPartial,
            (Calculator::Flexibility, Side::Combined, Both) => FlexibilityBoth,
            (Calculator::Flexibility, Side::Target, Full) => TargetFlexibility,
            (Calculator::Flexibility, Side::Target, Partial) => TargetFlexibilityPartial,
            (Calculator::Flexibility, Side::Target, Both) => TargetFlexibilityBoth,
            (Calculator::Flexibility, Side::Source, Full) => SourceFlexibility,
            (Calculator::Flexibility, Side::Source, Partial) => SourceFlexibilityPartial,
            (Calculator::Flexibility, Side::Source, Both) => SourceFlexibilityBoth,
        })
    }

    pub fn calculator(self) -> Calculator {
        match self {
            Self::Robustness | Self::RobustnessPartial | Self::RobustnessBoth => {
                Calculator::Robustness
            }
            _ => Calculator::Flexibility,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Self::TargetFlexibility | Self::TargetFlexibilityPartial | Self::TargetFlexibilityBoth => {
                Side::Target
            }
            Self::SourceFlexibility | Self::SourceFlexibilityPartial | Self::SourceFlexibilityBoth => {
                Side::Source
            }
            _ => Side::Combined,
        }
    }

    pub fn coverage(self) -> Coverage {
        match self {
            Self::Robustness
            | Self::Flexibility
            | Self::TargetFlexibility
            | Self::SourceFlexibility => Coverage::Full,
            Self::RobustnessPartial
            | Self::FlexibilityPartial
            | Self::TargetFlexibilityPartial
            | Self::SourceFlexibilityPartial => Coverage::Partial,
            _ => Coverage::Both,
        }
    }
}

/// Partition of all keys of a graph by how many of their edges are redundant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyClasses<E: Element> {
    fully_redundant: ElementSet<E>,
    partially_redundant: ElementSet<E>,
    breaking: ElementSet<E>,
}

impl<E: Element> Default for KeyClasses<E> {
    fn default() -> Self {
        Self {
            fully_redundant: ElementSet::default(),
            partially_redundant: ElementSet::default(),
            breaking: ElementSet::default(),
        }
    }
}

impl<E: Element> KeyClasses<E> {
    /// Files `key` into its class and returns it; `None` stands for breaking.
    pub(crate) fn classify(
        &mut self,
        key: E,
        redundant_edges: usize,
        total_edges: usize,
    ) -> Option<Coverage> {
        if redundant_edges == 0 {
            self.breaking.insert(key);
            None
        } else if redundant_edges == total_edges {
            self.fully_redundant.insert(key);
            Some(Coverage::Full)
        } else {
            self.partially_redundant.insert(key);
            Some(Coverage::Partial)
        }
    }

    pub fn fully_redundant(&self) -> &ElementSet<E> {
        &self.fully_redundant
    }

    pub fn partially_redundant(&self) -> &ElementSet<E> {
        &self.partially_redundant
    }

    /// Keys none of whose edges are redundant
    pub fn breaking(&self) -> &ElementSet<E> {
        &self.breaking
    }

    /// Returns the class of `key`: `Some(coverage)` if redundant, `None` if breaking or unknown
    pub fn class_of(&self, key: &E) -> Option<Coverage> {
        if self.fully_redundant.contains(key) {
            Some(Coverage::Full)
        } else if self.partially_redundant.contains(key) {
            Some(Coverage::Partial)
        } else {
            None
        }
    }

    /// Returns *true* if `key` is redundant under `coverage`
    pub fn is_redundant(&self, key: &E, coverage: Coverage) -> bool {
        match coverage {
            Coverage::Full => self.fully_redundant.contains(key),
            Coverage::Partial => self.partially_redundant.contains(key),
            Coverage::Both => {
                self.fully_redundant.contains(key) || self.partially_redundant.contains(key)
            }
        }
    }

    /// Returns a copy of the keys that are redundant under `coverage`
    pub fn redundant(&self, coverage: Coverage) -> ElementSet<E> {
        match coverage {
            Coverage::Full => self.fully_redundant.clone(),
            Coverage::Partial => self.partially_redundant.clone(),
            Coverage::Both => self
                .fully_redundant
                .union(&self.partially_redundant)
                .cloned()
                .collect(),
        }
    }

    /// Number of keys redundant under `coverage`
    pub fn count(&self, coverage: Coverage) -> usize {
        match coverage {
            Coverage::Full => self.fully_redundant.len(),
            Coverage::Partial => self.partially_redundant.len(),
            Coverage::Both => self.fully_redundant.len() + self.partially_redundant.len(),
        }
    }

    /// Number of classified keys
    pub fn num_keys(&self) -> usize {
        self.fully_redundant.len() + self.partially_redundant.len() + self.breaking.len()
    }

    /// Iterates over all classified keys
    pub fn keys(&self) -> impl Iterator<Item = &E> + '_ {
        self.fully_redundant
            .iter()
            .chain(&self.partially_redundant)
            .chain(&self.breaking)
    }

    /// Share of keys redundant under `coverage`; `0.0` without keys
    pub fn ratio(&self, coverage: Coverage) -> f64 {
        ratio(self.count(coverage), self.num_keys())
    }

    /// Share of breaking keys; `0.0` without keys
    pub fn breaking_ratio(&self) -> f64 {
        ratio(self.breaking.len(), self.num_keys())
    }
}

/// Classification and alternative paths of one side
#[derive(Debug, Clone)]
pub(crate) struct SidePaths<E: Element> {
    pub(crate) classes: KeyClasses<E>,
    key_paths: ElementMap<E, ElementSet<Path<E>>>,
    paths: ElementSet<Path<E>>,
}

impl<E: Element> Default for SidePaths<E> {
    fn default() -> Self {
        Self {
            classes: KeyClasses::default(),
            key_paths: ElementMap::default(),
            paths: ElementSet::default(),
        }
    }
}

impl<E: Element> SidePaths<E> {
    /// Stores the alternative paths found for `key`; keys without paths are not stored
    pub(crate) fn record(&mut self, key: &E, paths: ElementSet<Path<E>>) {
        if paths.is_empty() {
            return;
        }
        self.paths.extend(paths.iter().cloned());
        self.key_paths.entry(key.clone()).or_default().extend(paths);
    }

    pub(crate) fn paths(&self) -> &ElementSet<Path<E>> {
        &self.paths
    }

    pub(crate) fn paths_of_key(&self, key: &E) -> impl Iterator<Item = &Path<E>> + '_ {
        self.key_paths.get(key).into_iter().flatten()
    }
}

/// Common view on [`Robustness`] and [`Flexibility`], queried by [`RedundancyType`].
///
/// The provided methods ignore the calculator of the given type; use [`Redundancy`] to dispatch on it.
pub trait RedundancyMetrics<E: Element> {
    /// Classification of all keys for `side`
    fn classes(&self, side: Side) -> &KeyClasses<E>;

    /// All alternative paths found for `side`, of redundant and partially redundant keys alike
    fn paths(&self, side: Side) -> &ElementSet<Path<E>>;

    /// Alternative paths found for the edges of `key` on `side`; may contain duplicates
    fn paths_of_key(&self, key: &E, side: Side) -> Vec<&Path<E>>;

    /// Share of keys redundant under `ty`
    fn redundancy_ratio(&self, ty: RedundancyType) -> f64 {
        self.classes(ty.side()).ratio(ty.coverage())
    }

    /// Keys redundant under `ty`
    fn redundant_keys(&self, ty: RedundancyType) -> ElementSet<E> {
        self.classes(ty.side()).redundant(ty.coverage())
    }

    /// All alternative paths of the side of `ty`, always including partial redundancy
    fn redundancy_paths(&self, ty: RedundancyType) -> ElementSet<Path<E>> {
        self.paths(ty.side()).clone()
    }

    /// Alternative paths of every key redundant under `ty`
    fn redundancy_paths_for_key(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<Path<E>>> {
        let side = ty.side();
        self.classes(side)
            .redundant(ty.coverage())
            .into_iter()
            .map(|key| {
                let paths = self.paths_of_key(&key, side).into_iter().cloned().collect();
                (key, paths)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_decompose_and_reassemble() {
        for ty in RedundancyType::ALL {
            assert_eq!(
                RedundancyType::from_parts(ty.calculator(), ty.side(), ty.coverage()),
                Some(ty)
            );
        }
        assert_eq!(
            RedundancyType::from_parts(Calculator::Robustness, Side::Target, Coverage::Full),
            None
        );
        assert_eq!(RedundancyType::default(), RedundancyType::Robustness);
        assert_eq!(RedundancyType::SourceFlexibilityBoth.side(), Side::Source);
        assert_eq!(RedundancyType::RobustnessPartial.coverage(), Coverage::Partial);
    }

    #[test]
    fn classification() {
        let mut classes = KeyClasses::default();
        assert_eq!(classes.ratio(Coverage::Full), 0.0);

        assert_eq!(classes.classify('a', 2, 2), Some(Coverage::Full));
        assert_eq!(classes.classify('b', 1, 3), Some(Coverage::Partial));
        assert_eq!(classes.classify('c', 0, 1), None);
        assert_eq!(classes.classify('d', 0, 4), None);

        assert_eq!(classes.num_keys(), 4);
        assert_eq!(classes.ratio(Coverage::Full), 0.25);
        assert_eq!(classes.ratio(Coverage::Both), 0.5);
        assert_eq!(classes.breaking_ratio(), 0.5);
        assert_eq!(classes.redundant(Coverage::Both), ElementSet::from_iter(['a', 'b']));
        assert_eq!(classes.class_of(&'b'), Some(Coverage::Partial));
        assert_eq!(classes.class_of(&'d'), None);
        assert!(classes.is_redundant(&'a', Coverage::Both));
        assert!(!classes.is_redundant(&'a', Coverage::Partial));
    }
}
