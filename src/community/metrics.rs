//! Partition quality metrics

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Newman–Girvan modularity of `assignment` on a weighted undirected graph.
///
/// `assignment[i]` is the community of node index `i`. Self-loops count once
/// towards internal weight and twice towards degree. Returns 0 for a graph
/// without positive total weight.
pub fn modularity<N>(graph: &UnGraph<N, f64>, assignment: &[usize]) -> f64 {
    let mut edges = Vec::with_capacity(graph.edge_count());
    let mut self_loops = vec![0.0; graph.node_count()];

    for edge in graph.edge_references() {
        let (i, j) = (edge.source().index(), edge.target().index());
        if i == j {
            self_loops[i] += *edge.weight();
        } else {
            edges.push((i, j, *edge.weight()));
        }
    }

    weighted_modularity(&edges, &self_loops, assignment, 1.0)
}

/// Modularity with a resolution parameter over an explicit edge list.
///
/// `edges` holds each undirected edge once, without self-loops.
pub(crate) fn weighted_modularity(
    edges: &[(usize, usize, f64)],
    self_loops: &[f64],
    assignment: &[usize],
    resolution: f64,
) -> f64 {
    let m: f64 = edges.iter().map(|&(_, _, w)| w).sum::<f64>() + self_loops.iter().sum::<f64>();
    if m <= 0.0 {
        return 0.0;
    }

    let community_count = assignment.iter().max().map_or(0, |&max| max + 1);
    let mut internal = vec![0.0; community_count];
    let mut degree = vec![0.0; community_count];

    for &(i, j, w) in edges {
        let (ci, cj) = (assignment[i], assignment[j]);
        degree[ci] += w;
        degree[cj] += w;
        if ci == cj {
            internal[ci] += w;
        }
    }
    for (i, &w) in self_loops.iter().enumerate() {
        let c = assignment[i];
        degree[c] += 2.0 * w;
        internal[c] += w;
    }

    internal
        .iter()
        .zip(&degree)
        .map(|(&l, &d)| l / m - resolution * (d / (2.0 * m)).powi(2))
        .sum()
}
