//! Participation coefficient

use std::collections::BTreeMap;
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rayon::prelude::*;

use crate::error::Result;
use crate::graph::{EdgeAttributes, NodeKey, NodeMap, RoleGraph};
use crate::observer::Stage;

impl<N: NodeKey> RoleGraph<N> {
    /// Participation coefficient of every node with incident weight.
    ///
    /// Nodes without incident edges, or whose incident edges sum to zero
    /// weight, have no entry. Cached per `weight_key`.
    pub fn participation_coefficients(&self, weight_key: &str) -> Result<Arc<NodeMap<N, f64>>> {
        self.memoized(
            &self.cache.participation,
            weight_key.to_string(),
            Stage::ParticipationCoefficients,
            || {
                let communities = self.communities()?;
                let parallel = self.node_count() >= self.config().parallel_threshold;
                Ok(participation_coefficients(
                    self.digraph(),
                    communities.assignment(),
                    weight_key,
                    parallel,
                ))
            },
        )
    }
}

/// `P[i] = 1 - Σ_c (k_ic / k_i)²` over incoming and outgoing edges of `i`.
///
/// With `parallel` set, nodes are processed on the rayon pool.
pub fn participation_coefficients<N: NodeKey>(
    graph: &DiGraph<N, EdgeAttributes>,
    assignment: &[usize],
    weight_key: &str,
    parallel: bool,
) -> NodeMap<N, f64> {
    if parallel {
        graph
            .node_indices()
            .collect::<Vec<_>>()
            .into_par_iter()
            .filter_map(|node| {
                node_participation(graph, assignment, node, weight_key)
                    .map(|p| (graph[node].clone(), p))
            })
            .collect()
    } else {
        graph
            .node_indices()
            .filter_map(|node| {
                node_participation(graph, assignment, node, weight_key)
                    .map(|p| (graph[node].clone(), p))
            })
            .collect()
    }
}

fn node_participation<N>(
    graph: &DiGraph<N, EdgeAttributes>,
    assignment: &[usize],
    node: NodeIndex,
    weight_key: &str,
) -> Option<f64> {
    let incoming = graph
        .edges_directed(node, Direction::Incoming)
        .map(|edge| (edge.source(), edge.weight()));
    let outgoing = graph
        .edges_directed(node, Direction::Outgoing)
        .map(|edge| (edge.target(), edge.weight()));

    // Weight between the node and each community it touches
    let mut per_community: BTreeMap<usize, f64> = BTreeMap::new();
    for (other, attrs) in incoming.chain(outgoing) {
        *per_community.entry(assignment[other.index()]).or_insert(0.0) += attrs.weight(weight_key);
    }

    let total: f64 = per_community.values().sum();
    if per_community.is_empty() || total == 0.0 {
        return None;
    }

    let concentration: f64 = per_community.values().map(|k| (k / total).powi(2)).sum();
    Some(1.0 - concentration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::FixedPartition;
    use crate::observer::SilentObserver;
    use approx::assert_abs_diff_eq;

    fn graph_with(
        edges: &[(u32, u32, f64)],
        assignment: &[(u32, usize)],
    ) -> RoleGraph<u32> {
        let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
        for &(node, _) in assignment {
            graph.add_node(node);
        }
        for &(a, b, w) in edges {
            graph.add_weighted_edge(a, b, w);
        }
        graph.with_detector(FixedPartition::from_assignment(assignment.iter().copied()))
    }

    #[test]
    fn isolated_nodes_are_skipped() {
        let graph = graph_with(&[], &[(0, 0), (1, 0), (2, 0)]);
        let p = graph.participation_coefficients("weight").unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn even_split_across_two_communities() {
        // node 0 sends one edge into each community
        let graph = graph_with(&[(0, 1, 1.0), (0, 2, 1.0)], &[(0, 0), (1, 0), (2, 1)]);
        let p = graph.participation_coefficients("weight").unwrap();

        assert_abs_diff_eq!(p[&0], 0.5, epsilon = 1e-12);
        assert_eq!(p[&1], 0.0);
        assert_eq!(p[&2], 0.0);
    }

    #[test]
    fn counts_both_directions() {
        // in from community 1 with weight 3, out to community 0 with weight 1
        let graph = graph_with(&[(1, 0, 3.0), (0, 2, 1.0)], &[(0, 0), (1, 1), (2, 0)]);
        let p = graph.participation_coefficients("weight").unwrap();

        assert_abs_diff_eq!(p[&0], 1.0 - (0.75f64.powi(2) + 0.25f64.powi(2)), epsilon = 1e-12);
    }

    #[test]
    fn zero_total_weight_is_skipped() {
        let graph = graph_with(&[(0, 1, 0.0)], &[(0, 0), (1, 1)]);
        let p = graph.participation_coefficients("weight").unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut edges = Vec::new();
        for i in 0..40u32 {
            edges.push((i, (i * 7 + 3) % 40, 1.0 + (i % 3) as f64));
            edges.push((i, (i + 1) % 40, 1.0));
        }
        let assignment: Vec<(u32, usize)> = (0..40).map(|i| (i, (i % 4) as usize)).collect();
        let graph = graph_with(&edges, &assignment);
        let communities = graph.communities().unwrap();

        let sequential =
            participation_coefficients(graph.digraph(), communities.assignment(), "weight", false);
        let parallel =
            participation_coefficients(graph.digraph(), communities.assignment(), "weight", true);

        assert_eq!(sequential.len(), 40);
        for (node, p) in &sequential {
            assert_abs_diff_eq!(parallel[node], *p, epsilon = 1e-12);
            assert!((0.0..=1.0).contains(p));
        }
    }
}
