//! Parquet file handling for edge tables

use std::path::Path;

use anyhow::{anyhow, Result};
use polars::prelude::*;

use crate::config::Config;
use crate::data::EdgeColumns;
use crate::graph::{GraphBuilder, RoleGraph};

/// Load a directed edge table.
///
/// Source and target columns are cast to strings. A column named like
/// `config.weight_key` supplies edge weights (cast to f64); a null weight,
/// or a missing column, leaves the attribute off so the default weight applies.
pub fn load_edge_table(path: &Path, columns: &EdgeColumns, config: Config) -> Result<RoleGraph<String>> {
    log::info!("Reading parquet file: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;
    log::debug!("File schema: {:?}", df.schema());
    log::info!("Loaded {} edge rows", df.height());

    let sources = df.column(&columns.source)?.cast(&DataType::String)?;
    let targets = df.column(&columns.target)?.cast(&DataType::String)?;
    let weight_key = config.weight_key.clone();
    let weights = match df.get_column_index(&weight_key) {
        Some(_) => Some(df.column(&weight_key)?.cast(&DataType::Float64)?),
        None => {
            log::warn!(
                "No '{}' column; every edge uses the default weight",
                weight_key
            );
            None
        }
    };

    let sources = sources.str()?;
    let targets = targets.str()?;
    let weights = weights.as_ref().map(|w| w.f64()).transpose()?;

    let mut builder = GraphBuilder::with_capacity(df.height() / 4, df.height()).config(config);
    let mut skipped = 0usize;

    for row in 0..df.height() {
        let (Some(src), Some(dst)) = (sources.get(row), targets.get(row)) else {
            skipped += 1;
            continue;
        };
        let weight = weights.and_then(|w| w.get(row));
        builder.add_weighted_edge(src, dst, &weight_key, weight);
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with a null source or target", skipped);
    }
    log::info!(
        "Building graph with {} nodes and {} edges",
        builder.node_count(),
        builder.edge_count()
    );

    Ok(builder.build()?)
}
