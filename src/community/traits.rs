//! Community detection traits.

use petgraph::graph::UnGraph;

use crate::error::Result;

/// Community ids per node, indexed like the input graph's nodes.
///
/// Overlap-aware detectors may list several ids for one node; the pipeline
/// keeps the first.
pub type Memberships = Vec<Vec<usize>>;

/// Trait for community detection algorithms.
pub trait CommunityDetection<N>: Send + Sync {
    /// Detect communities in an undirected graph whose edge weights are `f64`.
    fn detect(&self, graph: &UnGraph<N, f64>) -> Result<Memberships>;
}
