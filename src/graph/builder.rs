//! Graph construction from string-keyed edge rows

use std::collections::HashMap;

use crate::config::Config;
use crate::error::Result;
use crate::graph::{EdgeAttributes, RoleGraph};

/// Builder for incrementally collecting edges before creating a [`RoleGraph`].
///
/// Loaders push rows here so that node ids are interned once and the graph
/// is created in a single pass.
pub struct GraphBuilder {
    /// Mapping from string IDs to node positions
    id_to_index: HashMap<String, usize>,

    /// Node string IDs in first-seen order
    node_ids: Vec<String>,

    /// Directed edges between node positions
    edges: Vec<(usize, usize, EdgeAttributes)>,

    config: Config,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(node_capacity),
            node_ids: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
            config: Config::default(),
        }
    }

    /// Configuration handed to the built graph
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Get or create a node position for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len();
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        idx
    }

    /// Add an edge from one node to another
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, attrs: EdgeAttributes) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.edges.push((src_idx, dst_idx, attrs));
    }

    /// Add an edge carrying `weight` under `weight_key`, or no attribute when `weight` is `None`
    pub fn add_weighted_edge(
        &mut self,
        src_id: &str,
        dst_id: &str,
        weight_key: &str,
        weight: Option<f64>,
    ) {
        let attrs = match weight {
            Some(w) => EdgeAttributes::new().with(weight_key, w),
            None => EdgeAttributes::new(),
        };
        self.add_edge(src_id, dst_id, attrs);
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build the graph
    pub fn build(self) -> Result<RoleGraph<String>> {
        let mut graph = RoleGraph::with_config(self.config)?;

        for id in &self.node_ids {
            graph.insert_node(id.clone());
        }
        for (src, dst, attrs) in self.edges {
            graph.insert_edge(
                self.node_ids[src].clone(),
                self.node_ids[dst].clone(),
                attrs,
            );
        }

        log::debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}
