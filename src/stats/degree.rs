//! Within-community degree z-score

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use statrs::statistics::Statistics;

use crate::error::Result;
use crate::graph::{EdgeAttributes, NodeKey, NodeMap, RoleGraph};
use crate::observer::Stage;

/// Standard deviations at or below this are treated as zero
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

impl<N: NodeKey> RoleGraph<N> {
    /// Within-community in-degree z-score of every node.
    ///
    /// Members of a community whose in-degrees do not vary (including
    /// singleton communities) get `z = 0`, so every node has a finite value.
    /// Cached per `weight_key`.
    pub fn within_community_degrees(&self, weight_key: &str) -> Result<Arc<NodeMap<N, f64>>> {
        self.memoized(
            &self.cache.within_degrees,
            weight_key.to_string(),
            Stage::WithinCommunityDegrees,
            || {
                let communities = self.communities()?;
                Ok(within_community_z_scores(
                    self.digraph(),
                    communities.assignment(),
                    weight_key,
                ))
            },
        )
    }
}

/// Weighted in-degree of each node inside the subgraph induced by its own community.
///
/// Only edges whose source shares the target's community count; self-loops do.
pub fn induced_in_degrees<N>(
    graph: &DiGraph<N, EdgeAttributes>,
    assignment: &[usize],
    weight_key: &str,
) -> Vec<f64> {
    graph
        .node_indices()
        .map(|node| {
            let community = assignment[node.index()];
            graph
                .edges_directed(node, Direction::Incoming)
                .filter(|edge| assignment[edge.source().index()] == community)
                .map(|edge| edge.weight().weight(weight_key))
                .sum()
        })
        .collect()
}

/// `z[i] = (k[i] - mean_k[c]) / std_k[c]` using population standard deviation per community
pub fn within_community_z_scores<N: NodeKey>(
    graph: &DiGraph<N, EdgeAttributes>,
    assignment: &[usize],
    weight_key: &str,
) -> NodeMap<N, f64> {
    let degrees = induced_in_degrees(graph, assignment, weight_key);

    let moments: HashMap<usize, (f64, f64)> = assignment
        .iter()
        .copied()
        .zip(degrees.iter().copied())
        .into_group_map()
        .into_iter()
        .map(|(community, k)| {
            let mean = k.iter().mean();
            let std_dev = k.iter().population_std_dev();
            (community, (mean, std_dev))
        })
        .collect();

    graph
        .node_indices()
        .map(|node| {
            let i = node.index();
            let (mean, std_dev) = moments[&assignment[i]];
            let z = if std_dev > ZERO_VARIANCE_EPSILON {
                (degrees[i] - mean) / std_dev
            } else {
                0.0
            };
            (graph[node].clone(), z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::FixedPartition;
    use crate::graph::EdgeAttributes;
    use crate::observer::SilentObserver;
    use approx::assert_abs_diff_eq;

    fn star(leaves: u32) -> RoleGraph<u32> {
        let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
        for leaf in 1..=leaves {
            graph.add_weighted_edge(leaf, 0, 1.0);
            graph.add_weighted_edge(0, leaf, 1.0);
        }
        graph.with_detector(FixedPartition::from_assignment((0..=leaves).map(|n| (n, 0))))
    }

    #[test]
    fn star_hub_stands_out() {
        let graph = star(4);
        let z = graph.within_community_degrees("weight").unwrap();

        // in-degrees: hub 4, leaves 1; mean 1.6, population std 1.2
        assert_abs_diff_eq!(z[&0], 2.0, epsilon = 1e-9);
        for leaf in 1..=4 {
            assert_abs_diff_eq!(z[&leaf], -0.5, epsilon = 1e-9);
            assert!(z[&0] > z[&leaf]);
        }
    }

    #[test]
    fn edges_leaving_the_community_are_ignored() {
        let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
        graph.add_weighted_edge("a", "b", 1.0);
        graph.add_weighted_edge("c", "b", 5.0);
        graph.add_node("d");
        let graph = graph.with_detector(FixedPartition::from_assignment([
            ("a", 0),
            ("b", 0),
            ("c", 1),
            ("d", 1),
        ]));

        let communities = graph.communities().unwrap();
        let k = induced_in_degrees(graph.digraph(), communities.assignment(), "weight");

        assert_eq!(k, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_variance_community_is_zero_filled() {
        let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
        for &(a, b) in &[(0, 1), (1, 2), (2, 0)] {
            graph.add_weighted_edge(a, b, 1.0);
        }
        graph.add_node(3);
        let graph = graph.with_detector(FixedPartition::from_assignment([
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 1),
        ]));

        let z = graph.within_community_degrees("weight").unwrap();

        assert_eq!(z.len(), 4);
        for node in 0..4 {
            assert_eq!(z[&node], 0.0);
        }
    }

    #[test]
    fn missing_weight_attribute_defaults_to_one() {
        let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
        graph.add_edge(1, 0, EdgeAttributes::new());
        graph.add_edge(2, 0, EdgeAttributes::new().with("capacity", 3.0));
        let graph = graph.with_detector(FixedPartition::from_assignment([(0, 0), (1, 0), (2, 0)]));

        let communities = graph.communities().unwrap();
        let plain = induced_in_degrees(graph.digraph(), communities.assignment(), "weight");
        let capacity = induced_in_degrees(graph.digraph(), communities.assignment(), "capacity");

        // node 0 was inserted second
        assert_eq!(plain, vec![0.0, 2.0, 0.0]);
        assert_eq!(capacity, vec![0.0, 4.0, 0.0]);
    }
}
