//! Country Metric CLI
//!
//! Joins node counts with country statistics and computes one metric as
//! a sorted series document for the map/table frontend.
//!
//! Usage:
//!   compute-metrics --node-counts data/node_countries.json \
//!                   --country-stats data/country_data.json \
//!                   --metric 1 \
//!                   --output data/metric_series.json

use anyhow::Result;
use clap::Parser;
use country_metrics::{joiner, loader, series};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "compute-metrics",
    about = "Compute per-country node metrics for choropleth and table rendering"
)]
struct Args {
    /// Path to node counts JSON file
    #[arg(short = 'n', long, default_value = "data/node_countries.json")]
    node_counts: PathBuf,

    /// Path to country statistics JSON file
    #[arg(short = 'c', long, default_value = "data/country_data.json")]
    country_stats: PathBuf,

    /// Metric id (1-10)
    #[arg(short, long, default_value_t = 1)]
    metric: u8,

    /// Output JSON file
    #[arg(short, long, default_value = "data/metric_series.json")]
    output: PathBuf,

    /// Number of top countries to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("NodeAtlas Country Metric Engine");
    info!("{}", "=".repeat(60));

    // Load and join the two raw datasets
    let node_counts = loader::load_node_counts(&args.node_counts)?;
    let country_stats = loader::load_country_stats(&args.country_stats)?;
    let records = joiner::join(&node_counts, &country_stats);

    // Compute the selected metric
    let result = series::compute_series_by_id(&records, args.metric)?;

    info!("\nTop {} countries by {}:", args.top, result.color_axis.legend);
    for entry in result.entries.iter().take(args.top) {
        info!(
            "  {:>14.3} | {:3} | {}",
            entry.value, entry.country_code, entry.country_name
        );
    }

    // Write output
    info!("\nWriting output to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &result)?;

    // Summary
    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Metric:    {:?} (id {})", result.metric, result.metric_id);
    info!("Rendered:  {} countries", result.metadata.rendered);
    info!("Excluded:  {} countries", result.metadata.excluded);
    info!(
        "Domain:    [{}, {}] ({:?})",
        result.color_axis.domain[0], result.color_axis.domain[1], result.color_axis.scale
    );

    Ok(())
}
