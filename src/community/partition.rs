//! Caller-supplied community assignment

use std::collections::HashMap;

use petgraph::graph::UnGraph;

use super::traits::{CommunityDetection, Memberships};
use crate::error::Result;
use crate::graph::NodeKey;

/// Replays a partition the caller already knows instead of detecting one.
///
/// Nodes missing from the partition get no membership, which the pipeline
/// reports as an incomplete partition.
#[derive(Debug, Clone)]
pub struct FixedPartition<N: NodeKey> {
    memberships: HashMap<N, Vec<usize>>,
}

impl<N: NodeKey> FixedPartition<N> {
    pub fn new() -> Self {
        Self {
            memberships: HashMap::new(),
        }
    }

    /// Partition with exactly one community per node
    pub fn from_assignment<I>(assignment: I) -> Self
    where
        I: IntoIterator<Item = (N, usize)>,
    {
        Self {
            memberships: assignment
                .into_iter()
                .map(|(node, community)| (node, vec![community]))
                .collect(),
        }
    }

    /// Add `node` to `community`; repeated calls record overlapping memberships in order
    pub fn assign(mut self, node: N, community: usize) -> Self {
        self.memberships.entry(node).or_default().push(community);
        self
    }
}

impl<N: NodeKey> Default for FixedPartition<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> CommunityDetection<N> for FixedPartition<N> {
    fn detect(&self, graph: &UnGraph<N, f64>) -> Result<Memberships> {
        Ok(graph
            .node_indices()
            .map(|idx| self.memberships.get(&graph[idx]).cloned().unwrap_or_default())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_memberships_in_node_order() {
        let mut graph: UnGraph<&str, f64> = UnGraph::new_undirected();
        graph.add_node("b");
        graph.add_node("a");
        graph.add_node("c");

        let partition = FixedPartition::from_assignment([("a", 4), ("b", 2)]).assign("a", 9);
        let memberships = partition.detect(&graph).unwrap();

        assert_eq!(memberships, vec![vec![2], vec![4, 9], vec![]]);
    }
}
