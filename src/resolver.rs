//! Demand resolution
//! Joins demand rows to the cost table and classifies each lane

use std::collections::HashMap;

use tracing::debug;

use crate::alias::AliasMap;
use crate::cost::CostTable;
use crate::models::{
    DemandRecord, LaneKey, LaneQuote, RecommendedMode, ResolvedDemand, RouteSummary,
};
use crate::normalize::normalize;

/// Build the join key for an origin/destination pair: alias-resolve
/// then normalize each side independently.
pub fn lane_key(origin: &str, destination: &str, aliases: &AliasMap) -> LaneKey {
    LaneKey::new(
        normalize(aliases.resolve(origin)),
        normalize(aliases.resolve(destination)),
    )
}

/// Pick the cheaper transport mode for a lane.
///
/// Fleet is only preferred on a strict cost advantage; a tie goes to
/// the aggregated carrier with zero saving. Either cost missing means
/// no recommendation can be made. The saving is never negative and is
/// zero unless the fleet wins.
pub fn classify(fleet_cost: Option<f64>, aggregate_cost: Option<f64>) -> (RecommendedMode, f64) {
    match (fleet_cost, aggregate_cost) {
        (Some(fleet), Some(aggregate)) if fleet < aggregate => {
            (RecommendedMode::FleetOwned, aggregate - fleet)
        }
        (Some(_), Some(_)) => (RecommendedMode::Aggregated, 0.0),
        _ => (RecommendedMode::Undefined, 0.0),
    }
}

/// Resolve a batch of demand rows against the reference tables.
///
/// Left outer join: the output has exactly one row per input row, in
/// input order. Rows whose lane has no cost record are kept and
/// classified `Undefined` rather than dropped.
pub fn resolve_demands(
    demands: Vec<DemandRecord>,
    aliases: &AliasMap,
    costs: &CostTable,
) -> Vec<ResolvedDemand> {
    demands
        .into_iter()
        .map(|demand| {
            let mapped_origin = aliases.resolve(&demand.origin).to_string();
            let mapped_destination = aliases.resolve(&demand.destination).to_string();
            let lane = LaneKey::new(normalize(&mapped_origin), normalize(&mapped_destination));

            let record = costs.get(&lane);
            if record.is_none() {
                debug!(request_id = %demand.request_id, lane = %lane, "no cost record for lane");
            }
            let fleet_cost = record.and_then(|r| r.fleet_cost);
            let aggregate_cost = record.and_then(|r| r.aggregate_cost);
            let (mode, saving) = classify(fleet_cost, aggregate_cost);

            ResolvedDemand {
                demand,
                mapped_origin,
                mapped_destination,
                lane,
                fleet_cost,
                aggregate_cost,
                mode,
                saving,
            }
        })
        .collect()
}

/// Roll a resolved batch up by lane, preserving first-seen lane order.
pub fn summarize_routes(resolved: &[ResolvedDemand]) -> Vec<RouteSummary> {
    let mut index: HashMap<&LaneKey, usize> = HashMap::new();
    let mut summaries: Vec<RouteSummary> = Vec::new();

    for row in resolved {
        match index.get(&row.lane) {
            Some(&i) => summaries[i].demand_count += 1,
            None => {
                index.insert(&row.lane, summaries.len());
                summaries.push(RouteSummary {
                    mapped_origin: row.mapped_origin.clone(),
                    mapped_destination: row.mapped_destination.clone(),
                    lane: row.lane.clone(),
                    demand_count: 1,
                    fleet_cost: row.fleet_cost,
                    aggregate_cost: row.aggregate_cost,
                    mode: row.mode,
                    saving: row.saving,
                });
            }
        }
    }
    summaries
}

/// Price a single origin/destination pair.
pub fn quote_lane(
    origin: &str,
    destination: &str,
    aliases: &AliasMap,
    costs: &CostTable,
) -> LaneQuote {
    let lane = lane_key(origin, destination, aliases);
    let record = costs.get(&lane);
    let fleet_cost = record.and_then(|r| r.fleet_cost);
    let aggregate_cost = record.and_then(|r| r.aggregate_cost);
    let (mode, saving) = classify(fleet_cost, aggregate_cost);
    LaneQuote {
        lane,
        fleet_cost,
        aggregate_cost,
        mode,
        saving,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostRecord;

    fn demand(id: &str, origin: &str, dest: &str) -> DemandRecord {
        DemandRecord {
            request_id: id.to_string(),
            date: None,
            client: "ACME".to_string(),
            origin: origin.to_string(),
            destination: dest.to_string(),
            required_time: None,
            scheduling: None,
        }
    }

    fn cost(origin: &str, dest: &str, fleet: f64, aggregate: f64) -> CostRecord {
        CostRecord {
            origin: origin.to_string(),
            destination: dest.to_string(),
            fleet_cost: Some(fleet),
            aggregate_cost: Some(aggregate),
        }
    }

    #[test]
    fn classify_prefers_fleet_on_strict_advantage() {
        assert_eq!(
            classify(Some(950.0), Some(1200.0)),
            (RecommendedMode::FleetOwned, 250.0)
        );
    }

    #[test]
    fn classify_tie_goes_to_aggregated() {
        assert_eq!(
            classify(Some(1000.0), Some(1000.0)),
            (RecommendedMode::Aggregated, 0.0)
        );
        assert_eq!(
            classify(Some(1300.0), Some(1200.0)),
            (RecommendedMode::Aggregated, 0.0)
        );
    }

    #[test]
    fn classify_missing_cost_is_undefined() {
        assert_eq!(classify(Some(950.0), None), (RecommendedMode::Undefined, 0.0));
        assert_eq!(classify(None, Some(1200.0)), (RecommendedMode::Undefined, 0.0));
        assert_eq!(classify(None, None), (RecommendedMode::Undefined, 0.0));
    }

    #[test]
    fn outer_join_preserves_every_row() {
        let costs = CostTable::from_records([cost("Guarujá", "São Paulo", 980.0, 1250.0)]).unwrap();
        let aliases = AliasMap::default();
        let rows = vec![
            demand("1", "Guarujá", "São Paulo"),
            demand("2", "Nowhere", "Elsewhere"),
            demand("3", "guarujá ", "SÃO PAULO"),
        ];

        let resolved = resolve_demands(rows, &aliases, &costs);
        assert_eq!(resolved.len(), 3);

        assert_eq!(resolved[0].mode, RecommendedMode::FleetOwned);
        assert_eq!(resolved[0].saving, 270.0);
        assert_eq!(resolved[1].mode, RecommendedMode::Undefined);
        assert_eq!(resolved[1].fleet_cost, None);
        // Case and accents do not matter once normalized
        assert_eq!(resolved[2].mode, RecommendedMode::FleetOwned);
    }

    #[test]
    fn alias_applies_before_normalization() {
        let costs = CostTable::from_records([cost("Guarujá", "São Paulo", 980.0, 1250.0)]).unwrap();
        let aliases = AliasMap::from_pairs([
            ("Porto".to_string(), "Guarujá/SP".to_string()),
            ("SP Capital".to_string(), "São Paulo".to_string()),
        ]);

        let quote = quote_lane("SP Capital", "x", &aliases, &costs);
        assert_eq!(quote.lane.origin, "SAO PAULO");

        let resolved = resolve_demands(vec![demand("1", "Guarujá", "SP Capital")], &aliases, &costs);
        assert_eq!(resolved[0].mapped_destination, "São Paulo");
        assert_eq!(resolved[0].mode, RecommendedMode::FleetOwned);
    }

    #[test]
    fn summarize_groups_by_lane_in_first_seen_order() {
        let costs = CostTable::from_records([cost("Santos", "Jundiaí", 950.0, 1200.0)]).unwrap();
        let aliases = AliasMap::default();
        let rows = vec![
            demand("1", "Santos", "Jundiaí"),
            demand("2", "Nowhere", "Elsewhere"),
            demand("3", "SANTOS", "JUNDIAI"),
            demand("4", "Santos", "Jundiaí"),
        ];

        let summaries = summarize_routes(&resolve_demands(rows, &aliases, &costs));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].lane, LaneKey::new("SANTOS", "JUNDIAI"));
        assert_eq!(summaries[0].demand_count, 3);
        assert_eq!(summaries[0].mode, RecommendedMode::FleetOwned);
        assert_eq!(summaries[0].saving, 250.0);
        assert_eq!(summaries[1].demand_count, 1);
        assert_eq!(summaries[1].mode, RecommendedMode::Undefined);
        let total: usize = summaries.iter().map(|s| s.demand_count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn quote_unknown_lane_is_undefined() {
        let costs = CostTable::default();
        let quote = quote_lane("Santos", "Sumaré", &AliasMap::default(), &costs);
        assert_eq!(quote.mode, RecommendedMode::Undefined);
        assert_eq!(quote.fleet_cost, None);
        assert_eq!(quote.aggregate_cost, None);
        assert_eq!(quote.saving, 0.0);
    }
}
