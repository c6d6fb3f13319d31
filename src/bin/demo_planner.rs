//! Allocation Suggestion Demo
//! Run: ./target/release/demo_planner
//!
//! Uses a small embedded rate card and demand set, so no input files
//! are needed. Embedding is a choice of this loader, not of the core:
//! the resolver only ever sees injected tables.

use anyhow::Result;

use freight_modal::alias::AliasMap;
use freight_modal::cost::CostTable;
use freight_modal::models::{CostRecord, DemandRecord};
use freight_modal::resolver::{resolve_demands, summarize_routes};

fn sample_rates() -> Vec<CostRecord> {
    let lanes = [
        ("Santos", "Jundiaí", 950.0, 1200.0),
        ("Santos", "Sumaré", 1050.0, 1300.0),
        ("Guarujá", "São Paulo", 980.0, 1250.0),
        ("Guarujá", "Campinas", 1020.0, 1280.0),
        ("Guarujá", "Jundiaí", 990.0, 1220.0),
    ];
    lanes
        .into_iter()
        .map(|(origin, dest, fleet, aggregate)| CostRecord {
            origin: origin.to_string(),
            destination: dest.to_string(),
            fleet_cost: Some(fleet),
            aggregate_cost: Some(aggregate),
        })
        .collect()
}

fn sample_demands() -> Vec<DemandRecord> {
    let rows = [
        ("1001", "Transpetro", "Porto", "São Paulo"),
        ("1002", "Cosan", "Guarujá", "Campinas"),
        ("1003", "Usiminas", "Santos", "JUNDIAI"),
        ("1004", "Raízen", "Santos", "Piracicaba"),
        ("1005", "Braskem", "guarujá ", "jundiaí"),
    ];
    rows.into_iter()
        .map(|(id, client, origin, dest)| DemandRecord {
            request_id: id.to_string(),
            date: None,
            client: client.to_string(),
            origin: origin.to_string(),
            destination: dest.to_string(),
            required_time: None,
            scheduling: None,
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    // "Porto" is how the port shows up on the demand sheet
    let aliases = AliasMap::from_pairs([("Porto".to_string(), "Guarujá".to_string())]);
    let costs = CostTable::from_records(sample_rates())?;

    let resolved = resolve_demands(sample_demands(), &aliases, &costs);

    println!("\n{}", "=".repeat(85));
    println!("                    FLEET / AGGREGATED ALLOCATION DEMO");
    println!("{}\n", "=".repeat(85));

    println!(
        "  {:8} {:12} {:22} {:>12} {:>10}",
        "Request", "Client", "Lane", "Best Mode", "Saving"
    );
    println!("{}", "-".repeat(85));
    for row in &resolved {
        println!(
            "  {:8} {:12} {:22} {:>12} {:>10.2}",
            row.demand.request_id,
            row.demand.client,
            row.lane.to_string(),
            row.mode.label(),
            row.saving,
        );
    }

    println!("\nBY ROUTE");
    println!("{}", "-".repeat(85));
    for summary in summarize_routes(&resolved) {
        println!(
            "  {:22} {:>3} demand(s)   {:>12}   saving {:>8.2}",
            summary.lane.to_string(),
            summary.demand_count,
            summary.mode.label(),
            summary.saving,
        );
    }
    println!();

    Ok(())
}
