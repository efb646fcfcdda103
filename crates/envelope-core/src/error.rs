//! Error types for scenario evaluation and catalog I/O.

use serde::Serialize;
use thiserror::Error;

/// Which empirical table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    AircraftDetection,
    DefenseDetection,
    TerrainLineOfSight,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableKind::AircraftDetection => "aircraft detection",
            TableKind::DefenseDetection => "defense detection",
            TableKind::TerrainLineOfSight => "terrain line-of-sight",
        };
        f.write_str(name)
    }
}

/// Failure of a single scenario evaluation.
///
/// These never abort a sweep; the sweep records them per scenario and the
/// reducer skips them.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineError {
    #[error("{table} table has no value at {query}")]
    MissingTableValue { table: TableKind, query: f64 },

    #[error("invalid {entity} '{name}': {reason}")]
    InvalidEntity {
        entity: &'static str,
        name: String,
        reason: String,
    },

    #[error("{quantity} is outside its domain: {value}")]
    Domain { quantity: &'static str, value: f64 },

    #[error("intercept accrual for battery {battery} did not terminate within {steps} steps")]
    AccrualStalled { battery: usize, steps: usize },

    #[error("effectiveness coefficient is undefined: {numerator} / {denominator}")]
    DegenerateCoefficient { numerator: f64, denominator: f64 },

    #[error("invalid sweep configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when loading or saving an entity catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
