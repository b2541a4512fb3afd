//! Community detection module
//!
//! Communities are found on the undirected weighted projection of the graph.
//! Detectors implement [`CommunityDetection`] and may report several
//! memberships per node; only the first one is kept. The default detector is
//! [`Louvain`]; [`FixedPartition`] replays an assignment the caller already has.
//!
//! The chosen partition is scored with Newman–Girvan modularity:
//!
//! ```text
//! Q = Σ_c [ L_c / m - (d_c / 2m)² ]
//! ```
//!
//! where `m` is the total edge weight, `L_c` the weight inside community `c`
//! and `d_c` the summed weighted degree of its members.

pub mod detection;
pub mod louvain;
pub mod metrics;
pub mod partition;
pub mod traits;

use std::collections::HashMap;

use petgraph::graph::DiGraph;

use crate::graph::{EdgeAttributes, NodeKey};

pub use louvain::Louvain;
pub use metrics::modularity;
pub use partition::FixedPartition;
pub use traits::{CommunityDetection, Memberships};

/// Community assignment of every node in a graph
#[derive(Debug, Clone)]
pub struct Communities<N: NodeKey> {
    /// Community of each node, indexed like the graph's nodes
    assignment: Vec<usize>,

    /// Community of each node, keyed by identifier
    by_node: HashMap<N, usize>,

    /// Number of members per community id
    sizes: Vec<usize>,

    /// Newman–Girvan modularity of the partition
    modularity: f64,
}

impl<N: NodeKey> Communities<N> {
    /// `assignment` must hold consecutive ids starting at 0, one per node of `graph`
    pub(crate) fn new(
        graph: &DiGraph<N, EdgeAttributes>,
        assignment: Vec<usize>,
        modularity: f64,
    ) -> Self {
        let community_count = assignment.iter().max().map_or(0, |&max| max + 1);
        let mut sizes = vec![0; community_count];
        for &community in &assignment {
            sizes[community] += 1;
        }

        let by_node = graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), assignment[idx.index()]))
            .collect();

        Self {
            assignment,
            by_node,
            sizes,
            modularity,
        }
    }

    /// Community of `node`, if the node is part of the graph
    pub fn get(&self, node: &N) -> Option<usize> {
        self.by_node.get(node).copied()
    }

    /// Number of assigned nodes
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn community_count(&self) -> usize {
        self.sizes.len()
    }

    /// Members per community, indexed by community id
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, usize)> + '_ {
        self.by_node.iter().map(|(node, &community)| (node, community))
    }

    pub fn as_map(&self) -> &HashMap<N, usize> {
        &self.by_node
    }

    pub(crate) fn assignment(&self) -> &[usize] {
        &self.assignment
    }
}
