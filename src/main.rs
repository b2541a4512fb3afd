use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use graph_role_analyzer::config::{Config, UndirectedMerge};
use graph_role_analyzer::data::{self, EdgeColumns};
use graph_role_analyzer::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "graph-role-analyzer",
    about = "Guimerà–Amaral role classification of weighted directed graphs"
)]
struct Cli {
    /// Path to the input edge file (.parquet table or text edge list)
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "role_results")]
    output_dir: PathBuf,

    /// Edge attribute (and parquet column) holding edge weights
    #[clap(long, default_value = "weight")]
    weight_key: String,

    /// Source node column of a parquet edge table
    #[clap(long, default_value = "source")]
    source_column: String,

    /// Target node column of a parquet edge table
    #[clap(long, default_value = "target")]
    target_column: String,

    /// Louvain resolution; higher values give smaller communities
    #[clap(long, default_value = "1.0")]
    resolution: f64,

    /// Add reciprocal edge weights when dropping direction for community detection
    #[clap(long)]
    sum_reciprocal: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting role analysis");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir.display());

    let config = Config {
        undirected_merge: if args.sum_reciprocal {
            UndirectedMerge::Sum
        } else {
            UndirectedMerge::KeepLast
        },
        ..Config::new(args.weight_key.clone(), args.resolution)
    };
    config.validate()?;

    // 1. Load data
    let columns = EdgeColumns {
        source: args.source_column,
        target: args.target_column,
    };
    let graph = data::load_graph(&args.input, &columns, config)?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    // 2. Run the pipeline
    let report = storage::build_report(&graph, &args.weight_key)?;

    log::info!(
        "Found {} communities (modularity {:.4}); classified {} nodes, {} isolated",
        report.summary.community_count,
        report.summary.modularity,
        report.summary.classified_nodes,
        report.summary.isolated_nodes
    );
    for (role, count) in &report.summary.role_distribution {
        log::info!("  {} ({}): {}", role, role.name(), count);
    }

    // 3. Save results
    storage::save_results(&report, &args.output_dir)?;

    log::info!(
        "Analysis complete. Results saved to {}",
        args.output_dir.display()
    );

    Ok(())
}
