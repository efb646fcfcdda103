//! Core types and definitions for the strike envelope engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, lookup tables, sweep configuration, scenario and
//! result records, errors, and constants. It performs no sweep math.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod scenario;
pub mod table;

pub use catalog::EntityCatalog;
pub use error::{CatalogError, EngineError, EngineResult, TableKind};

#[cfg(test)]
mod tests;
