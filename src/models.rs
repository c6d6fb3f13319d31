use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed origin -> destination route, keyed by normalized labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneKey {
    pub origin: String,
    pub dest: String,
}

impl LaneKey {
    pub fn new(origin: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            dest: dest.into(),
        }
    }
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.dest)
    }
}

/// One priced lane as loaded from the cost table.
/// Labels are raw; they are normalized when the table is indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRecord {
    pub origin: String,
    pub destination: String,
    pub fleet_cost: Option<f64>,
    pub aggregate_cost: Option<f64>,
}

/// One shipment request from the daily demand sheet.
/// Only origin and destination are inspected by the resolver; the rest
/// is pass-through metadata for the output table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    pub request_id: String,
    pub date: Option<NaiveDate>,
    pub client: String,
    pub origin: String,
    pub destination: String,
    pub required_time: Option<String>,
    pub scheduling: Option<String>,
}

/// Transport mode recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedMode {
    FleetOwned,
    Aggregated,
    Undefined,
}

impl RecommendedMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FleetOwned => "Fleet Owned",
            Self::Aggregated => "Aggregated",
            Self::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for RecommendedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A demand row enriched with alias-mapped labels, costs and the
/// mode recommendation. One per input demand row, match or not.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDemand {
    pub demand: DemandRecord,
    pub mapped_origin: String,
    pub mapped_destination: String,
    pub lane: LaneKey,
    pub fleet_cost: Option<f64>,
    pub aggregate_cost: Option<f64>,
    pub mode: RecommendedMode,
    pub saving: f64,
}

/// Per-route rollup of a resolved batch: demand volume plus the lane's
/// priced recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub mapped_origin: String,
    pub mapped_destination: String,
    pub lane: LaneKey,
    pub demand_count: usize,
    pub fleet_cost: Option<f64>,
    pub aggregate_cost: Option<f64>,
    pub mode: RecommendedMode,
    pub saving: f64,
}

/// Pricing result for a single origin/destination pair.
#[derive(Debug, Clone, Serialize)]
pub struct LaneQuote {
    pub lane: LaneKey,
    pub fleet_cost: Option<f64>,
    pub aggregate_cost: Option<f64>,
    pub mode: RecommendedMode,
    pub saving: f64,
}
