//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! 1. **Phase 1 (Local Moving)**: Start with each node in its own community.
//!    Repeatedly move nodes to the neighboring community with the highest
//!    modularity gain until no move improves.
//!
//! 2. **Phase 2 (Aggregation)**: Build a meta-graph where communities become
//!    single nodes. Edge weights are sums of edges between communities and
//!    self-loops carry the weight internal to a community.
//!
//! 3. **Iterate**: Repeat phases 1-2 on the meta-graph until modularity
//!    stops improving.
//!
//! Nodes are visited in index order. A node only leaves its community for a
//! strictly better gain, and among equally good neighbors the lowest community
//! id wins, so the result is deterministic for a given graph.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use std::collections::BTreeMap;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use super::metrics::weighted_modularity;
use super::traits::{CommunityDetection, Memberships};
use crate::config::Config;
use crate::error::Result;

/// Weighted graph at one aggregation level
struct Level {
    n: usize,
    /// Each undirected edge once, `i != j`
    edges: Vec<(usize, usize, f64)>,
    self_loops: Vec<f64>,
}

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma).
    resolution: f64,
    /// Maximum iterations per level.
    max_iter: usize,
    /// Maximum levels of aggregation.
    max_levels: usize,
    /// Minimum modularity improvement to continue.
    min_modularity_gain: f64,
}

impl Louvain {
    /// Create a new Louvain detector with default settings.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Detector using the Louvain settings of `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            resolution: config.resolution,
            max_iter: config.max_iter,
            max_levels: config.max_levels,
            min_modularity_gain: config.min_modularity_gain,
        }
    }

    /// Phase 1: Local moving on weighted graph.
    /// Returns (communities, improved).
    fn local_moving(&self, level: &Level) -> (Vec<usize>, bool) {
        let n = level.n;

        let m: f64 = level.edges.iter().map(|&(_, _, w)| w).sum::<f64>()
            + level.self_loops.iter().sum::<f64>();
        if m <= 0.0 {
            return ((0..n).collect(), false);
        }

        // Self-loops stay out of the adjacency; they only add to degree
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut degrees: Vec<f64> = level.self_loops.iter().map(|&sl| 2.0 * sl).collect();
        for &(i, j, w) in &level.edges {
            adj[i].push((j, w));
            adj[j].push((i, w));
            degrees[i] += w;
            degrees[j] += w;
        }

        let mut communities: Vec<usize> = (0..n).collect();
        let mut community_degrees = degrees.clone();
        let mut any_improved = false;

        for _iter in 0..self.max_iter {
            let mut improved = false;

            for node in 0..n {
                let current = communities[node];
                let ki = degrees[node];

                // Take the node out of its community
                community_degrees[current] -= ki;

                let mut community_weights: BTreeMap<usize, f64> = BTreeMap::new();
                for &(neighbor, w) in &adj[node] {
                    *community_weights.entry(communities[neighbor]).or_insert(0.0) += w;
                }

                let gain = |community: usize, ki_in: f64| {
                    ki_in / m - self.resolution * community_degrees[community] * ki / (2.0 * m * m)
                };

                let mut best_community = current;
                let mut best_gain = gain(current, community_weights.get(&current).copied().unwrap_or(0.0));
                for (&candidate, &ki_in) in &community_weights {
                    let candidate_gain = gain(candidate, ki_in);
                    if candidate_gain > best_gain {
                        best_gain = candidate_gain;
                        best_community = candidate;
                    }
                }

                community_degrees[best_community] += ki;
                if best_community != current {
                    communities[node] = best_community;
                    improved = true;
                    any_improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        (communities, any_improved)
    }

    /// Phase 2: Aggregate graph based on consecutive community ids.
    fn aggregate(level: &Level, partition: &[usize], community_count: usize) -> Level {
        let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut self_loops = vec![0.0; community_count];

        for (i, &sl) in level.self_loops.iter().enumerate() {
            self_loops[partition[i]] += sl;
        }
        for &(i, j, w) in &level.edges {
            let (ci, cj) = (partition[i], partition[j]);
            if ci == cj {
                self_loops[ci] += w;
            } else {
                let key = if ci < cj { (ci, cj) } else { (cj, ci) };
                *between.entry(key).or_insert(0.0) += w;
            }
        }

        Level {
            n: community_count,
            edges: between.into_iter().map(|((i, j), w)| (i, j, w)).collect(),
            self_loops,
        }
    }

    /// Run all levels and return the community of every original node.
    fn run(&self, level: Level) -> Vec<usize> {
        let mut level = level;
        let mut membership: Vec<usize> = (0..level.n).collect();
        let mut prev_modularity =
            weighted_modularity(&level.edges, &level.self_loops, &membership, self.resolution);

        for _level in 0..self.max_levels {
            let (partition, improved) = self.local_moving(&level);
            if !improved {
                break;
            }

            let (partition, community_count) = renumber(&partition);
            for community in membership.iter_mut() {
                *community = partition[*community];
            }

            let modularity =
                weighted_modularity(&level.edges, &level.self_loops, &partition, self.resolution);
            let gain = modularity - prev_modularity;
            prev_modularity = modularity;

            if gain < self.min_modularity_gain || community_count == level.n {
                break;
            }

            level = Self::aggregate(&level, &partition, community_count);
        }

        renumber(&membership).0
    }
}

/// Relabel communities to consecutive ids in order of first appearance
fn renumber(partition: &[usize]) -> (Vec<usize>, usize) {
    let mut relabel: BTreeMap<usize, usize> = BTreeMap::new();
    let renumbered = partition
        .iter()
        .map(|&c| {
            let next = relabel.len();
            *relabel.entry(c).or_insert(next)
        })
        .collect();
    (renumbered, relabel.len())
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> CommunityDetection<N> for Louvain {
    fn detect(&self, graph: &UnGraph<N, f64>) -> Result<Memberships> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut self_loops = vec![0.0; n];
        for edge in graph.edge_references() {
            let (i, j) = (edge.source().index(), edge.target().index());
            if i == j {
                self_loops[i] += *edge.weight();
            } else {
                edges.push((i, j, *edge.weight()));
            }
        }

        let partition = self.run(Level { n, edges, self_loops });
        Ok(partition.into_iter().map(|c| vec![c]).collect())
    }
}
