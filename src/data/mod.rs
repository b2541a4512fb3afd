//! Graph loading from edge files

pub mod edge_list;
pub mod parquet;

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::graph::RoleGraph;

/// Column names of an edge table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeColumns {
    pub source: String,
    pub target: String,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
        }
    }
}

/// Load a graph from `path`, choosing the reader by file extension.
///
/// `.parquet` files are read as edge tables; anything else as a text edge list.
/// Edge weights are stored under `config.weight_key`.
pub fn load_graph(path: &Path, columns: &EdgeColumns, config: Config) -> Result<RoleGraph<String>> {
    let is_parquet = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edge_table(path, columns, config)
    } else {
        edge_list::load_edge_list(path, config)
    }
}
