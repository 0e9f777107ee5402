use tracing::debug;

use super::*;

/// Configures how redundancy is computed.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, redundancy::*};
///
/// let g = DirectedMultiGraph::from_edges([("A", "B", "k1"), ("A", "C", "k2"), ("C", "B", "k3")]);
/// let redundancy = RedundancyAnalysis::new().redundancy(&g);
///
/// assert_eq!(redundancy.redundant_keys(RedundancyType::Robustness).len(), 1);
/// assert_eq!(redundancy.redundancy_ratio(RedundancyType::Robustness), 1.0 / 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedundancyAnalysis {
    only_largest_component: bool,
}

impl RedundancyAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// If set, only the largest connected component of the graph is analyzed
    pub fn set_only_largest_component(&mut self, only_largest_component: bool) {
        self.only_largest_component = only_largest_component;
    }

    /// Chainable version of [`RedundancyAnalysis::set_only_largest_component`]
    pub fn only_largest_component(mut self, only_largest_component: bool) -> Self {
        self.set_only_largest_component(only_largest_component);
        self
    }

    fn working_copy<G>(&self, graph: &G) -> G
    where
        G: Subgraph + Clone,
    {
        if self.only_largest_component {
            let largest = graph.largest_component();
            debug!(
                nodes = largest.number_of_nodes(),
                of = graph.number_of_nodes(),
                "restricted to largest component"
            );
            largest
        } else {
            graph.clone()
        }
    }

    pub fn robustness<G>(&self, graph: &G) -> Robustness<G::Elem>
    where
        G: Subgraph + Clone,
    {
        Robustness::compute(self.working_copy(graph))
    }

    pub fn flexibility<G>(&self, graph: &G) -> Flexibility<G::Elem>
    where
        G: Subgraph + Clone,
    {
        Flexibility::compute(self.working_copy(graph))
    }

    /// Computes robustness and flexibility
    pub fn redundancy<G>(&self, graph: &G) -> Redundancy<G::Elem>
    where
        G: Subgraph + Clone,
    {
        Redundancy::compute(self.working_copy(graph))
    }

    /// Computes only the metrics of `calculator`
    pub fn restricted<G>(&self, graph: &G, calculator: Calculator) -> RestrictedRedundancy<G::Elem>
    where
        G: Subgraph + Clone,
    {
        match calculator {
            Calculator::Robustness => RestrictedRedundancy::Robustness(self.robustness(graph)),
            Calculator::Flexibility => RestrictedRedundancy::Flexibility(self.flexibility(graph)),
        }
    }

    /// Computes the redundancy of both graphs and compares them on the keys their analysed copies share
    pub fn compare<G>(&self, graph_a: &G, graph_b: &G) -> Comparison<G::Elem>
    where
        G: Subgraph + Clone,
    {
        let (graph_a, graph_b) = (self.working_copy(graph_a), self.working_copy(graph_b));
        let keys_b = graph_b.edge_keys();
        let common_keys = graph_a
            .edge_keys()
            .into_iter()
            .filter(|key| keys_b.contains(key))
            .collect();
        Comparison::from_parts(
            Redundancy::compute(graph_a),
            Redundancy::compute(graph_b),
            common_keys,
        )
    }
}

/// Robustness and flexibility of a graph, queried by [`RedundancyType`]
#[derive(Debug, Clone)]
pub struct Redundancy<E: Element> {
    robustness: Robustness<E>,
    flexibility: Flexibility<E>,
}

impl<E: Element> Redundancy<E> {
    /// Computes all redundancy metrics of `graph` with default options
    pub fn new<G>(graph: &G) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        RedundancyAnalysis::new().redundancy(graph)
    }

    fn compute<G>(graph: G) -> Self
    where
        G: AdjacencyList<Elem = E> + GraphEdgeEditing + Clone,
    {
        Self {
            robustness: Robustness::compute(graph.clone()),
            flexibility: Flexibility::compute(graph),
        }
    }

    pub fn robustness(&self) -> &Robustness<E> {
        &self.robustness
    }

    pub fn flexibility(&self) -> &Flexibility<E> {
        &self.flexibility
    }

    /// Returns the calculator answering queries of `calculator`
    pub fn metrics(&self, calculator: Calculator) -> &dyn RedundancyMetrics<E> {
        match calculator {
            Calculator::Robustness => &self.robustness,
            Calculator::Flexibility => &self.flexibility,
        }
    }

    /// Share of keys that are redundant under `ty`
    pub fn redundancy_ratio(&self, ty: RedundancyType) -> f64 {
        self.metrics(ty.calculator()).redundancy_ratio(ty)
    }

    pub fn redundant_keys(&self, ty: RedundancyType) -> ElementSet<E> {
        self.metrics(ty.calculator()).redundant_keys(ty)
    }

    /// All alternative paths of `ty`, always including partial redundancy.
    /// Target- and source-flexibility only report the paths of their side.
    pub fn redundancy_paths(&self, ty: RedundancyType) -> ElementSet<Path<E>> {
        self.metrics(ty.calculator()).redundancy_paths(ty)
    }

    /// Alternative paths of every key redundant under `ty`
    pub fn redundancy_paths_for_key(&self, ty: RedundancyType) -> ElementMap<E, ElementSet<Path<E>>> {
        self.metrics(ty.calculator()).redundancy_paths_for_key(ty)
    }
}

/// Redundancy of a graph computed by a single calculator.
///
/// Queries for a type of the other calculator fail with [`GraphError::ExcludedRedundancyType`].
#[derive(Debug, Clone)]
pub enum RestrictedRedundancy<E: Element> {
    Robustness(Robustness<E>),
    Flexibility(Flexibility<E>),
}

impl<E: Element> RestrictedRedundancy<E> {
    /// Computes only the metrics of `calculator` for `graph` with default options
    pub fn new<G>(graph: &G, calculator: Calculator) -> Self
    where
        G: Subgraph<Elem = E> + Clone,
    {
        RedundancyAnalysis::new().restricted(graph, calculator)
    }

    pub fn calculator(&self) -> Calculator {
        match self {
            Self::Robustness(_) => Calculator::Robustness,
            Self::Flexibility(_) => Calculator::Flexibility,
        }
    }

    /// Returns the calculator answering `ty`, if it was computed
    pub fn metrics(&self, ty: RedundancyType) -> Result<&dyn RedundancyMetrics<E>> {
        match (self, ty.calculator()) {
            (Self::Robustness(robustness), Calculator::Robustness) => Ok(robustness),
            (Self::Flexibility(flexibility), Calculator::Flexibility) => Ok(flexibility),
            _ => Err(GraphError::ExcludedRedundancyType(ty)),
        }
    }

    pub fn redundancy_ratio(&self, ty: RedundancyType) -> Result<f64> {
        Ok(self.metrics(ty)?.redundancy_ratio(ty))
    }

    pub fn redundant_keys(&self, ty: RedundancyType) -> Result<ElementSet<E>> {
        Ok(self.metrics(ty)?.redundant_keys(ty))
    }

    pub fn redundancy_paths(&self, ty: RedundancyType) -> Result<ElementSet<Path<E>>> {
        Ok(self.metrics(ty)?.redundancy_paths(ty))
    }

    pub fn redundancy_paths_for_key(
        &self,
        ty: RedundancyType,
    ) -> Result<ElementMap<E, ElementSet<Path<E>>>> {
        Ok(self.metrics(ty)?.redundancy_paths_for_key(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repr::DirectedMultiGraph, testing::detour_graph};

    #[test]
    fn queries_dispatch_by_type() {
        let g = detour_graph();
        let redundancy = Redundancy::new(&g);

        assert_eq!(
            redundancy.redundant_keys(RedundancyType::Robustness),
            ElementSet::from_iter(["x", "y"])
        );
        assert_eq!(
            redundancy.redundant_keys(RedundancyType::TargetFlexibility),
            ElementSet::from_iter(["x", "y", "z", "v"])
        );
        assert!(redundancy.redundant_keys(RedundancyType::RobustnessPartial).is_empty());
        assert_eq!(redundancy.redundancy_ratio(RedundancyType::SourceFlexibility), 0.6);

        let paths = redundancy.redundancy_paths_for_key(RedundancyType::Robustness);
        assert_eq!(paths.len(), 2);
        assert!(paths[&"x"].iter().all(|p| p.nodes() == ["A", "B"]));

        let target = redundancy.redundancy_paths(RedundancyType::TargetFlexibilityBoth);
        assert!(target.iter().all(|p| p.hops() == 1));
        assert!(
            target.is_subset(&redundancy.redundancy_paths(RedundancyType::FlexibilityPartial))
        );
    }

    #[test]
    fn restricted_results_reject_other_calculator() {
        let g = detour_graph();
        let full = Redundancy::new(&g);
        let restricted = RestrictedRedundancy::new(&g, Calculator::Flexibility);

        assert_eq!(restricted.calculator(), Calculator::Flexibility);
        assert_eq!(
            restricted.redundant_keys(RedundancyType::SourceFlexibility),
            Ok(full.redundant_keys(RedundancyType::SourceFlexibility))
        );
        assert_eq!(
            restricted.redundancy_ratio(RedundancyType::RobustnessBoth),
            Err(GraphError::ExcludedRedundancyType(RedundancyType::RobustnessBoth))
        );
        assert!(restricted.redundancy_paths(RedundancyType::Robustness).is_err());
    }

    #[test]
    fn largest_component_only() {
        let mut g = detour_graph();
        g.add_edge("P", "Q", "p");
        g.add_edge("P", "Q", "q");

        let all = Redundancy::new(&g);
        assert!(all.redundant_keys(RedundancyType::Robustness).contains("p"));

        let largest = RedundancyAnalysis::new()
            .only_largest_component(true)
            .redundancy(&g);
        assert_eq!(largest.robustness().sum_keys(), 5);
        assert!(!largest.redundant_keys(RedundancyType::Robustness).contains("p"));
    }

    #[test]
    fn comparison_ignores_keys_outside_largest_component() {
        let mut g = detour_graph();
        g.add_edge("X", "Y", "w");

        let analysis = RedundancyAnalysis::new().only_largest_component(true);
        let single = analysis.redundancy(&g);
        let comparison = analysis.compare(&g, &g);

        assert_eq!(
            comparison.common_keys(),
            &ElementSet::from_iter(["x", "y", "z", "u", "v"])
        );
        for ty in RedundancyType::ALL {
            assert_eq!(
                comparison.redundancy_ratio(ty, Change::Conserved),
                single.redundancy_ratio(ty)
            );
        }
        assert_eq!(
            comparison.redundancy_ratio(RedundancyType::Robustness, Change::Conserved),
            0.4
        );

        let unrestricted = RedundancyAnalysis::new().compare(&g, &g);
        assert!(unrestricted.common_keys().contains("w"));
    }

    #[test]
    fn empty_graph_has_no_redundancy() {
        let redundancy = Redundancy::new(&DirectedMultiGraph::<u32>::new());
        for ty in RedundancyType::ALL {
            assert_eq!(redundancy.redundancy_ratio(ty), 0.0);
            assert!(redundancy.redundant_keys(ty).is_empty());
            assert!(redundancy.redundancy_paths(ty).is_empty());
        }
    }
}
