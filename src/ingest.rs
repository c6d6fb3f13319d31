//! CSV ingestion for the three reference tables
//!
//! Column names are caller configuration, not fixed: the defaults match
//! the original planning spreadsheets but any layout can be wired in.
//! Headers are validated once, before any row is read, so the resolver
//! never hits a missing column mid-batch. Per-cell gaps (blank costs,
//! unparseable dates) load as `None` and never abort.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::DataError;
use crate::models::{CostRecord, DemandRecord};

/// Column layout of the demand sheet. `request_id`, `origin` and
/// `destination` are required; the metadata columns may be absent.
#[derive(Debug, Clone)]
pub struct DemandColumns {
    pub request_id: String,
    pub date: String,
    pub client: String,
    pub origin: String,
    pub destination: String,
    pub required_time: String,
    pub scheduling: String,
}

impl Default for DemandColumns {
    fn default() -> Self {
        Self {
            request_id: "SOLICITACAO_CARGA_ID".to_string(),
            date: "DATA".to_string(),
            client: "CLIENTE".to_string(),
            origin: "ORIGEM".to_string(),
            destination: "DESTINO".to_string(),
            required_time: "HORARIO REQUERIDO".to_string(),
            scheduling: "AGENDAMENTO".to_string(),
        }
    }
}

/// Column layout of the DEPARA alias sheet.
#[derive(Debug, Clone)]
pub struct AliasColumns {
    pub raw: String,
    pub standardized: String,
}

impl Default for AliasColumns {
    fn default() -> Self {
        Self {
            raw: "ORIGEM".to_string(),
            standardized: "PADRONIZADO".to_string(),
        }
    }
}

/// Column layout of the cost table.
#[derive(Debug, Clone)]
pub struct CostColumns {
    pub origin: String,
    pub destination: String,
    pub fleet_cost: String,
    pub aggregate_cost: String,
}

impl Default for CostColumns {
    fn default() -> Self {
        Self {
            origin: "ORIGEM".to_string(),
            destination: "DESTINO".to_string(),
            fleet_cost: "CUSTO_FROTA".to_string(),
            aggregate_cost: "CUSTO_AGREGADO".to_string(),
        }
    }
}

fn required_index(
    headers: &StringRecord,
    table: &'static str,
    column: &str,
) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| DataError::MissingColumn {
            table,
            column: column.to_string(),
        })
}

fn optional_index(headers: &StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == column)
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn optional_cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    let value = cell(record, index?);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_cost(record: &StringRecord, index: usize, column: &str, line: u64) -> Option<f64> {
    let raw = cell(record, index);
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(line, column, value = raw, "unparseable cost cell, treating as unknown");
            None
        }
    }
}

fn parse_date(raw: &str, line: u64) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| warn!(line, value = raw, "unparseable date, leaving empty"))
        .ok()
}

/// Read demand rows. Fails fast on a missing required column; blank
/// metadata cells load as `None`.
pub fn read_demands<R: io::Read>(reader: R, columns: &DemandColumns) -> Result<Vec<DemandRecord>> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv.headers()?.clone();

    let request_id = required_index(&headers, "demand", &columns.request_id)?;
    let origin = required_index(&headers, "demand", &columns.origin)?;
    let destination = required_index(&headers, "demand", &columns.destination)?;
    let date = optional_index(&headers, &columns.date);
    let client = optional_index(&headers, &columns.client);
    let required_time = optional_index(&headers, &columns.required_time);
    let scheduling = optional_index(&headers, &columns.scheduling);

    let mut demands = Vec::new();
    for row in csv.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        demands.push(DemandRecord {
            request_id: cell(&row, request_id).to_string(),
            date: optional_cell(&row, date).and_then(|d| parse_date(&d, line)),
            client: optional_cell(&row, client).unwrap_or_default(),
            origin: cell(&row, origin).to_string(),
            destination: cell(&row, destination).to_string(),
            required_time: optional_cell(&row, required_time),
            scheduling: optional_cell(&row, scheduling),
        });
    }
    Ok(demands)
}

/// Read the DEPARA sheet as ordered (raw, standardized) pairs, ready
/// for `AliasMap::from_pairs`.
pub fn read_alias_pairs<R: io::Read>(
    reader: R,
    columns: &AliasColumns,
) -> Result<Vec<(String, String)>> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv.headers()?.clone();

    let raw = required_index(&headers, "alias", &columns.raw)?;
    let standardized = required_index(&headers, "alias", &columns.standardized)?;

    let mut pairs = Vec::new();
    for row in csv.records() {
        let row = row?;
        pairs.push((
            cell(&row, raw).to_string(),
            cell(&row, standardized).to_string(),
        ));
    }
    Ok(pairs)
}

/// Read cost records. Blank or malformed cost cells become `None`
/// (the lane will classify `Undefined`), never an error.
pub fn read_costs<R: io::Read>(reader: R, columns: &CostColumns) -> Result<Vec<CostRecord>> {
    let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv.headers()?.clone();

    let origin = required_index(&headers, "cost", &columns.origin)?;
    let destination = required_index(&headers, "cost", &columns.destination)?;
    let fleet_cost = required_index(&headers, "cost", &columns.fleet_cost)?;
    let aggregate_cost = required_index(&headers, "cost", &columns.aggregate_cost)?;

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(CostRecord {
            origin: cell(&row, origin).to_string(),
            destination: cell(&row, destination).to_string(),
            fleet_cost: parse_cost(&row, fleet_cost, &columns.fleet_cost, line),
            aggregate_cost: parse_cost(&row, aggregate_cost, &columns.aggregate_cost, line),
        });
    }
    Ok(records)
}

pub fn read_demands_path(path: &Path, columns: &DemandColumns) -> Result<Vec<DemandRecord>> {
    read_demands(File::open(path)?, columns)
}

pub fn read_alias_pairs_path(path: &Path, columns: &AliasColumns) -> Result<Vec<(String, String)>> {
    read_alias_pairs(File::open(path)?, columns)
}

pub fn read_costs_path(path: &Path, columns: &CostColumns) -> Result<Vec<CostRecord>> {
    read_costs(File::open(path)?, columns)
}
