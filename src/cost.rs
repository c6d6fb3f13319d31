//! Cost table indexing
//! Builds the lane-key lookup the resolver joins against

use std::collections::HashMap;

use crate::error::DataError;
use crate::models::{CostRecord, LaneKey};
use crate::normalize::normalize;

/// Read-only cost table indexed by normalized lane key.
///
/// At most one record per lane is allowed; duplicates after
/// normalization are a data-integrity error, never silently resolved
/// to the first or last match.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    lanes: HashMap<LaneKey, CostRecord>,
}

impl CostTable {
    pub fn from_records<I>(records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = CostRecord>,
    {
        let mut lanes = HashMap::new();
        for record in records {
            let key = LaneKey::new(normalize(&record.origin), normalize(&record.destination));
            if lanes.insert(key.clone(), record).is_some() {
                return Err(DataError::DuplicateLaneKey {
                    origin: key.origin,
                    dest: key.dest,
                });
            }
        }
        Ok(Self { lanes })
    }

    pub fn get(&self, lane: &LaneKey) -> Option<&CostRecord> {
        self.lanes.get(lane)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(origin: &str, dest: &str, fleet: f64, aggregate: f64) -> CostRecord {
        CostRecord {
            origin: origin.to_string(),
            destination: dest.to_string(),
            fleet_cost: Some(fleet),
            aggregate_cost: Some(aggregate),
        }
    }

    #[test]
    fn indexes_by_normalized_key() {
        let table =
            CostTable::from_records([record("Guarujá", "São Paulo", 980.0, 1250.0)]).unwrap();
        let found = table.get(&LaneKey::new("GUARUJA", "SAO PAULO")).unwrap();
        assert_eq!(found.fleet_cost, Some(980.0));
        assert!(table.get(&LaneKey::new("GUARUJA", "CAMPINAS")).is_none());
    }

    #[test]
    fn duplicate_lane_is_an_error() {
        // Same lane after normalization even though the raw labels differ
        let err = CostTable::from_records([
            record("Santos", "Jundiaí", 950.0, 1200.0),
            record("SANTOS ", "JUNDIAI", 940.0, 1190.0),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DataError::DuplicateLaneKey {
                origin: "SANTOS".to_string(),
                dest: "JUNDIAI".to_string(),
            }
        );
    }
}
