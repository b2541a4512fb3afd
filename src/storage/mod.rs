//! Results persistence module

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::graph::{NodeKey, RoleGraph};
use crate::roles::{role_distribution, Role};

/// Graph-level outcome of a role analysis
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub node_count: usize,
    pub edge_count: usize,
    pub weight_key: String,
    pub modularity: f64,
    pub community_count: usize,
    pub community_sizes: Vec<usize>,
    /// Nodes that received a role
    pub classified_nodes: usize,
    /// Nodes without incident weight, hence without a role
    pub isolated_nodes: usize,
    pub role_distribution: BTreeMap<Role, usize>,
}

/// Everything computed for one node
#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord<N> {
    pub id: N,
    pub community: usize,
    pub z: f64,
    pub participation: Option<f64>,
    pub role: Option<Role>,
    pub role_name: Option<&'static str>,
}

/// Summary plus per-node records, in graph insertion order
#[derive(Debug, Clone, Serialize)]
pub struct RoleReport<N> {
    pub summary: Summary,
    pub nodes: Vec<NodeRecord<N>>,
}

/// Run every stage (or reuse cached results) and collect the outcome
pub fn build_report<N: NodeKey>(graph: &RoleGraph<N>, weight_key: &str) -> Result<RoleReport<N>> {
    let communities = graph.communities()?;
    let z_scores = graph.within_community_degrees(weight_key)?;
    let participation = graph.participation_coefficients(weight_key)?;
    let roles = graph.roles(weight_key)?;

    let nodes: Vec<NodeRecord<N>> = graph
        .nodes()
        .map(|node| {
            let role = roles.get(node).copied();
            NodeRecord {
                id: node.clone(),
                community: communities.get(node).unwrap_or_default(),
                z: z_scores.get(node).copied().unwrap_or_default(),
                participation: participation.get(node).copied(),
                role,
                role_name: role.map(Role::name),
            }
        })
        .collect();

    let summary = Summary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        weight_key: weight_key.to_string(),
        modularity: communities.modularity(),
        community_count: communities.community_count(),
        community_sizes: communities.sizes().to_vec(),
        classified_nodes: roles.len(),
        isolated_nodes: graph.node_count() - participation.len(),
        role_distribution: role_distribution(&roles),
    };

    Ok(RoleReport { summary, nodes })
}

/// Save analysis results to the specified directory
pub fn save_results<N: Serialize>(report: &RoleReport<N>, output_dir: &Path) -> Result<()> {
    log::info!(
        "Saving results for {} nodes to {}",
        report.nodes.len(),
        output_dir.display()
    );

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    write_json(&output_dir.join("summary.json"), &report.summary)?;
    write_json(&output_dir.join("nodes.json"), &report.nodes)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
