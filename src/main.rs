//! Daily demand planner
//!
//! Reads the demand sheet, the DEPARA alias sheet and the lane cost
//! table, then annotates every demand row with the cheaper transport
//! mode and the saving recovered by running fleet-owned trucks.
//!
//! Usage:
//!   cargo run --release -- --demands demands.csv --costs costs.csv [OPTIONS]
//!
//! Options:
//!   --alias <PATH>          DEPARA alias CSV (optional)
//!   --alias-raw-col <NAME>  Raw-label column of the alias sheet
//!   --alias-std-col <NAME>  Standardized-label column of the alias sheet
//!   --output <PATH>         Write the annotated rows as CSV
//!   --format <table|json>   Console output format (default: table)

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use csv::WriterBuilder;
use tracing::{info, warn};

use freight_modal::alias::AliasMap;
use freight_modal::cost::CostTable;
use freight_modal::ingest::{self, AliasColumns, CostColumns, DemandColumns};
use freight_modal::models::{RecommendedMode, ResolvedDemand};
use freight_modal::resolver::{resolve_demands, summarize_routes};

#[derive(Parser, Debug)]
#[command(name = "freight_modal")]
#[command(about = "Suggest fleet vs aggregated-carrier allocation for daily demands")]
struct Args {
    /// Demand sheet CSV
    #[arg(long)]
    demands: PathBuf,

    /// DEPARA alias CSV; omit to use raw labels as-is
    #[arg(long)]
    alias: Option<PathBuf>,

    /// Lane cost table CSV
    #[arg(long)]
    costs: PathBuf,

    /// Raw-label column of the alias sheet
    #[arg(long, default_value = "ORIGEM")]
    alias_raw_col: String,

    /// Standardized-label column of the alias sheet
    #[arg(long, default_value = "PADRONIZADO")]
    alias_std_col: String,

    /// Write the annotated demand rows to this CSV path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Console output: "table" or "json"
    #[arg(long, default_value = "table")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let args = Args::parse();

    let demands = ingest::read_demands_path(&args.demands, &DemandColumns::default())?;
    info!("Loaded {} demand rows from {:?}", demands.len(), args.demands);

    let aliases = match &args.alias {
        Some(path) => {
            let columns = AliasColumns {
                raw: args.alias_raw_col.clone(),
                standardized: args.alias_std_col.clone(),
            };
            let pairs = ingest::read_alias_pairs_path(path, &columns)?;
            info!("Loaded {} alias pairs from {:?}", pairs.len(), path);
            AliasMap::from_pairs(pairs)
        }
        None => AliasMap::default(),
    };

    let records = ingest::read_costs_path(&args.costs, &CostColumns::default())?;
    let costs = CostTable::from_records(records)?;
    info!("Indexed {} priced lanes from {:?}", costs.len(), args.costs);

    let resolved = resolve_demands(demands, &aliases, &costs);

    let unresolved = resolved
        .iter()
        .filter(|r| r.mode == RecommendedMode::Undefined)
        .count();
    if unresolved > 0 {
        warn!("{} of {} demand rows have no usable lane price", unresolved, resolved.len());
    }

    if let Some(path) = &args.output {
        write_output_csv(path, &resolved)?;
        info!("Wrote annotated demands to {:?}", path);
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&resolved)?),
        _ => print_tables(&resolved),
    }

    Ok(())
}

fn write_output_csv(path: &PathBuf, resolved: &[ResolvedDemand]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record([
        "SOLICITACAO_CARGA_ID",
        "DATA",
        "CLIENTE",
        "ORIGEM",
        "DESTINO",
        "ORIGEM_MAPEADA",
        "DESTINO_MAPEADO",
        "CUSTO_FROTA",
        "CUSTO_AGREGADO",
        "MELHOR CUSTO",
        "SAVING RECUPERADO",
    ])?;
    for row in resolved {
        let record = vec![
            row.demand.request_id.clone(),
            row.demand.date.map(|d| d.to_string()).unwrap_or_default(),
            row.demand.client.clone(),
            row.demand.origin.clone(),
            row.demand.destination.clone(),
            row.mapped_origin.clone(),
            row.mapped_destination.clone(),
            format_cost(row.fleet_cost),
            format_cost(row.aggregate_cost),
            row.mode.label().to_string(),
            format!("{:.2}", row.saving),
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_cost(cost: Option<f64>) -> String {
    cost.map(|c| format!("{c:.2}")).unwrap_or_default()
}

fn print_tables(resolved: &[ResolvedDemand]) {
    println!("\n{}", "=".repeat(95));
    println!("                         DAILY DEMANDS + ALLOCATION SUGGESTION");
    println!("{}\n", "=".repeat(95));

    println!(
        "  {:8} {:18} {:18} {:>10} {:>10} {:>12} {:>10}",
        "Request", "Origin", "Destination", "Fleet", "Aggregate", "Best Mode", "Saving"
    );
    println!("{}", "-".repeat(95));
    for row in resolved {
        println!(
            "  {:8} {:18} {:18} {:>10} {:>10} {:>12} {:>10.2}",
            row.demand.request_id,
            row.mapped_origin,
            row.mapped_destination,
            format_cost(row.fleet_cost),
            format_cost(row.aggregate_cost),
            row.mode.label(),
            row.saving,
        );
    }

    let summaries = summarize_routes(resolved);
    println!("\nDEMAND VOLUME BY ROUTE");
    println!("{}", "-".repeat(95));
    println!(
        "  {:40} {:>8} {:>12} {:>10}",
        "Lane", "Demands", "Best Mode", "Saving"
    );
    for summary in &summaries {
        println!(
            "  {:40} {:>8} {:>12} {:>10.2}",
            summary.lane.to_string(),
            summary.demand_count,
            summary.mode.label(),
            summary.saving,
        );
    }

    let total_saving: f64 = resolved.iter().map(|r| r.saving).sum();
    println!("\n  Total recoverable saving: {total_saving:.2}\n");
}
