use thiserror::Error;

/// Structural problems in the reference tables. These abort the whole
/// batch before any row is emitted; per-row gaps (unmapped locations,
/// missing costs) are not errors and degrade to `Undefined` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("required column '{column}' missing from {table} table")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    #[error("cost table has more than one record for lane {origin} -> {dest}")]
    DuplicateLaneKey { origin: String, dest: String },
}
