//! Community assignment stage

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::graph::UnGraph;

use super::metrics::modularity;
use super::traits::Memberships;
use super::Communities;
use crate::error::{Result, RoleError};
use crate::graph::{NodeKey, RoleGraph};
use crate::observer::Stage;

impl<N: NodeKey> RoleGraph<N> {
    /// Community of every node, detected once and cached.
    ///
    /// Detection runs on the undirected projection (see
    /// [`RoleGraph::to_undirected`]). When the detector reports several
    /// communities for a node only the first is kept.
    pub fn communities(&self) -> Result<Arc<Communities<N>>> {
        self.memoized(&self.cache.communities, (), Stage::Communities, || {
            detect_communities(self)
        })
    }

    /// Modularity of the detected partition, once communities have been computed
    pub fn modularity(&self) -> Option<f64> {
        self.cache
            .communities
            .peek()
            .map(|communities| communities.modularity())
    }
}

fn detect_communities<N: NodeKey>(graph: &RoleGraph<N>) -> Result<Communities<N>> {
    let projection = graph.to_undirected();
    let memberships = graph.detector().detect(&projection)?;
    let assignment = primary_assignment(&projection, memberships)?;
    let modularity = modularity(&projection, &assignment);

    let communities = Communities::new(graph.digraph(), assignment, modularity);
    log::debug!(
        "Found {} communities over {} nodes, modularity {:.4}",
        communities.community_count(),
        communities.len(),
        modularity
    );

    Ok(communities)
}

/// First membership of every node, renumbered to consecutive ids in order of appearance
fn primary_assignment<N: NodeKey>(
    projection: &UnGraph<N, f64>,
    memberships: Memberships,
) -> Result<Vec<usize>> {
    if memberships.len() != projection.node_count() {
        return Err(RoleError::Detection(format!(
            "detector returned memberships for {} of {} nodes",
            memberships.len(),
            projection.node_count()
        )));
    }

    let mut relabel: HashMap<usize, usize> = HashMap::new();
    projection
        .node_indices()
        .zip(memberships)
        .map(|(idx, communities)| {
            let primary = communities
                .first()
                .copied()
                .ok_or_else(|| RoleError::IncompletePartition {
                    node: format!("{:?}", projection[idx]),
                })?;
            let next = relabel.len();
            Ok(*relabel.entry(primary).or_insert(next))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{CommunityDetection, FixedPartition};
    use crate::observer::SilentObserver;

    fn quiet<N: NodeKey>(graph: RoleGraph<N>) -> RoleGraph<N> {
        graph.with_observer(Arc::new(SilentObserver))
    }

    #[test]
    fn every_node_gets_one_community() {
        let mut graph = quiet(RoleGraph::new());
        for &(a, b) in &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)] {
            graph.add_weighted_edge(a, b, 1.0);
        }
        graph.add_node(6);

        let communities = graph.communities().unwrap();

        assert_eq!(communities.len(), 7);
        for node in 0..7 {
            let community = communities.get(&node).unwrap();
            assert!(community < communities.community_count());
        }
        assert_eq!(communities.get(&0), communities.get(&1));
        assert_ne!(communities.get(&0), communities.get(&4));
        assert_eq!(communities.sizes().iter().sum::<usize>(), 7);
        assert!(graph.modularity().unwrap() > 0.0);
    }

    #[test]
    fn modularity_unknown_until_computed() {
        let mut graph = quiet(RoleGraph::new());
        graph.add_weighted_edge("a", "b", 1.0);
        assert!(graph.modularity().is_none());

        graph.communities().unwrap();
        assert!(graph.modularity().is_some());
    }

    #[test]
    fn overlapping_memberships_keep_first() {
        let mut graph = quiet(RoleGraph::new());
        graph.add_weighted_edge("a", "b", 1.0);
        graph.add_weighted_edge("b", "c", 1.0);
        let graph = graph.with_detector(
            FixedPartition::new()
                .assign("a", 10)
                .assign("a", 20)
                .assign("b", 20)
                .assign("b", 10)
                .assign("c", 10),
        );

        let communities = graph.communities().unwrap();

        // ids renumbered by first appearance: 10 -> 0, 20 -> 1
        assert_eq!(communities.get(&"a"), Some(0));
        assert_eq!(communities.get(&"b"), Some(1));
        assert_eq!(communities.get(&"c"), Some(0));
    }

    #[test]
    fn missing_membership_is_an_error() {
        let mut graph = quiet(RoleGraph::new());
        graph.add_weighted_edge("a", "b", 1.0);
        let graph = graph.with_detector(FixedPartition::new().assign("a", 0));

        assert!(matches!(
            graph.communities(),
            Err(RoleError::IncompletePartition { .. })
        ));
    }

    struct ShortDetector;

    impl CommunityDetection<&'static str> for ShortDetector {
        fn detect(&self, _graph: &UnGraph<&'static str, f64>) -> Result<Memberships> {
            Ok(vec![vec![0]])
        }
    }

    #[test]
    fn wrong_membership_count_is_an_error() {
        let mut graph = quiet(RoleGraph::new());
        graph.add_weighted_edge("a", "b", 1.0);
        let graph = graph.with_detector(ShortDetector);

        assert!(matches!(graph.communities(), Err(RoleError::Detection(_))));
    }

    #[test]
    fn empty_graph_has_no_communities() {
        let graph: RoleGraph<u32> = quiet(RoleGraph::new());
        let communities = graph.communities().unwrap();

        assert!(communities.is_empty());
        assert_eq!(communities.community_count(), 0);
        assert_eq!(graph.modularity(), Some(0.0));
    }
}
