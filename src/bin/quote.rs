//! Single-lane quote
//! Prices one origin/destination pair against the cost table.
//!
//! Usage:
//!   cargo run --release --bin quote -- --origin Santos --dest "Jundiaí" --costs costs.csv

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use freight_modal::alias::AliasMap;
use freight_modal::cost::CostTable;
use freight_modal::ingest::{self, AliasColumns, CostColumns};
use freight_modal::resolver::quote_lane;

#[derive(Parser, Debug)]
#[command(name = "quote")]
#[command(about = "Price a single freight lane: fleet vs aggregated carrier")]
struct Args {
    /// Origin location label
    #[arg(long)]
    origin: String,

    /// Destination location label
    #[arg(long)]
    dest: String,

    /// Lane cost table CSV
    #[arg(long)]
    costs: PathBuf,

    /// DEPARA alias CSV (optional)
    #[arg(long)]
    alias: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    let aliases = match &args.alias {
        Some(path) => AliasMap::from_pairs(ingest::read_alias_pairs_path(
            path,
            &AliasColumns::default(),
        )?),
        None => AliasMap::default(),
    };

    let records = ingest::read_costs_path(&args.costs, &CostColumns::default())?;
    let costs = CostTable::from_records(records)?;

    let quote = quote_lane(&args.origin, &args.dest, &aliases, &costs);

    println!("\nLane: {}", quote.lane);
    println!("{}", "-".repeat(45));
    println!("  {:16} {}", "Fleet cost:", format_cost(quote.fleet_cost));
    println!("  {:16} {}", "Aggregate cost:", format_cost(quote.aggregate_cost));
    println!("  {:16} {}", "Best mode:", quote.mode);
    println!("  {:16} {:.2}\n", "Saving:", quote.saving);

    Ok(())
}

fn format_cost(cost: Option<f64>) -> String {
    cost.map(|c| format!("{c:.2}")).unwrap_or_else(|| "n/a".to_string())
}
