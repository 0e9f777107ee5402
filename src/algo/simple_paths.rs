use super::{shortest_paths::direct_hops, *};

/// Enumerates simple paths, i.e. paths that never visit a node twice.
///
/// The number of simple paths grows exponentially with the density of the graph;
/// use [`SimplePathSearch::set_max_hops`] to bound the search.
#[derive(Debug, Clone)]
pub struct SimplePathSearch<'a, G> {
    graph: &'a G,
    max_hops: Option<usize>,
}

impl<'a, G> SimplePathSearch<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            max_hops: None,
        }
    }

    /// Only report paths with at most `max_hops` edge groups. `None` removes the bound.
    pub fn set_max_hops(&mut self, max_hops: Option<usize>) {
        self.max_hops = max_hops;
    }

    /// Chainable version of [`SimplePathSearch::set_max_hops`]
    pub fn max_hops(mut self, max_hops: Option<usize>) -> Self {
        self.set_max_hops(max_hops);
        self
    }

    /// Returns all simple paths from `from` to `to`.
    ///
    /// The endpoint contract equals the one of [`ShortestPaths::shortest_paths`]: with one endpoint
    /// omitted, only the direct neighbors of the other endpoint are reported.
    pub fn run(
        &self,
        from: Option<&G::Elem>,
        to: Option<&G::Elem>,
    ) -> Result<ElementSet<Path<G::Elem>>> {
        match (from, to) {
            (None, None) => Err(GraphError::MissingEndpoints),
            (Some(from), None) => Ok(self.bounded(direct_hops(self.graph, from, Reach::Outgoing))),
            (None, Some(to)) => Ok(self.bounded(direct_hops(self.graph, to, Reach::Incoming))),
            (Some(from), Some(to)) => self.paths_between(from, to),
        }
    }

    fn bounded(&self, mut paths: ElementSet<Path<G::Elem>>) -> ElementSet<Path<G::Elem>> {
        if let Some(max_hops) = self.max_hops {
            paths.retain(|path| path.hops() <= max_hops);
        }
        paths
    }

    fn paths_between(&self, from: &G::Elem, to: &G::Elem) -> Result<ElementSet<Path<G::Elem>>> {
        let mut paths = ElementSet::default();
        if from == to || !self.graph.has_node(from) || !self.graph.has_node(to) {
            return Ok(paths);
        }

        let may_add_hop = |hops: usize| self.max_hops.is_none_or(|max| hops < max);

        let mut builder = PathBuilder::new(from.clone());
        let mut stack = vec![self.graph.successors_of(from).collect::<Vec<_>>().into_iter()];

        while let Some(children) = stack.last_mut() {
            let Some(v) = children.next() else {
                stack.pop();
                builder.pop();
                continue;
            };

            if !may_add_hop(builder.hops()) {
                continue;
            }

            let keys = self
                .graph
                .keys_between(builder.last_node(), v)
                .cloned()
                .collect::<Vec<_>>();
            if v == to {
                let mut complete = builder.clone();
                complete.push_hop(keys, v.clone())?;
                paths.insert(complete.finish());
            } else if !builder.contains_node(v) && may_add_hop(builder.hops() + 1) {
                builder.push_hop(keys, v.clone())?;
                stack.push(self.graph.successors_of(v).collect::<Vec<_>>().into_iter());
            }
        }

        Ok(paths)
    }
}

pub trait SimplePaths: AdjacencyList {
    /// Returns all simple paths from `from` to `to` without a length bound.
    /// See [`SimplePathSearch::run`] for the endpoint contract.
    fn simple_paths(
        &self,
        from: Option<&Self::Elem>,
        to: Option<&Self::Elem>,
    ) -> Result<ElementSet<Path<Self::Elem>>> {
        SimplePathSearch::new(self).run(from, to)
    }

    /// Returns a configurable simple path search over the graph
    fn simple_path_search(&self) -> SimplePathSearch<'_, Self> {
        SimplePathSearch::new(self)
    }
}

impl<G: AdjacencyList> SimplePaths for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{repr::DirectedMultiGraph, testing::detour_graph};

    #[test]
    fn detours_are_simple_paths() {
        let mut g = detour_graph();
        g.add_edge("B", "D", "w");
        g.add_edge("D", "A", "r");

        let paths = g.simple_paths(Some(&"A"), Some(&"C")).unwrap();
        assert_eq!(
            paths.iter().map(|p| p.to_string()).sorted().collect_vec(),
            vec![
                r#""A" -"u"-> "D" -"v"-> "C""#,
                r#""A" -{"x","y"}-> "B" -"w"-> "D" -"v"-> "C""#,
                r#""A" -{"x","y"}-> "B" -"z"-> "C""#,
            ]
        );

        let short = g
            .simple_path_search()
            .max_hops(Some(2))
            .run(Some(&"A"), Some(&"C"))
            .unwrap();
        assert_eq!(short.len(), 2);
        assert!(g.simple_path_search().max_hops(Some(0)).run(Some(&"A"), None).unwrap().is_empty());
    }

    #[test]
    fn endpoint_contract() {
        let g = DirectedMultiGraph::from_edges([(1u32, 2, 0), (2, 3, 0), (3, 1, 0)]);

        assert_eq!(
            g.simple_paths(None, None).unwrap_err(),
            GraphError::MissingEndpoints
        );
        assert!(g.simple_paths(Some(&1), Some(&1)).unwrap().is_empty());
        assert!(g.simple_paths(Some(&1), Some(&9)).unwrap().is_empty());
        assert_eq!(g.simple_paths(Some(&1), None).unwrap().len(), 1);
        assert_eq!(g.simple_paths(None, Some(&1)).unwrap().len(), 1);
        assert_eq!(g.simple_paths(Some(&1), Some(&3)).unwrap().len(), 1);
    }

    #[test]
    fn simple_paths_contain_shortest_paths() {
        let g = detour_graph();
        let nodes = g.nodes().collect_vec();
        for (&u, &v) in nodes.iter().cartesian_product(&nodes) {
            let shortest = g.shortest_paths(Some(u), Some(v)).unwrap();
            let simple = g.simple_paths(Some(u), Some(v)).unwrap();
            assert!(shortest.is_subset(&simple));
        }
    }
}
