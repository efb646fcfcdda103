//! The five entity collections consumed by a sweep.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{Aircraft, DefenseSystem, Target, Terrain, Weapon};
use crate::error::CatalogError;

/// Entity collections as handed over by the data layer.
///
/// A collection that is `None` was never configured; a sweep over a catalog
/// with any absent collection yields no scenarios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityCatalog {
    #[serde(default)]
    pub aircraft: Option<Vec<Aircraft>>,
    #[serde(default)]
    pub weapons: Option<Vec<Weapon>>,
    #[serde(default)]
    pub targets: Option<Vec<Target>>,
    #[serde(default)]
    pub defenses: Option<Vec<DefenseSystem>>,
    #[serde(default)]
    pub terrains: Option<Vec<Terrain>>,
}

/// Borrowed view of a catalog whose collections are all present.
#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'a> {
    pub aircraft: &'a [Aircraft],
    pub weapons: &'a [Weapon],
    pub targets: &'a [Target],
    pub defenses: &'a [DefenseSystem],
    pub terrains: &'a [Terrain],
}

impl EntityCatalog {
    /// All five collections, or `None` if any is absent.
    pub fn complete(&self) -> Option<CatalogView<'_>> {
        Some(CatalogView {
            aircraft: self.aircraft.as_deref()?,
            weapons: self.weapons.as_deref()?,
            targets: self.targets.as_deref()?,
            defenses: self.defenses.as_deref()?,
            terrains: self.terrains.as_deref()?,
        })
    }

    /// Names of the collections that are absent.
    pub fn missing_collections(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.aircraft.is_none() {
            missing.push("aircraft");
        }
        if self.weapons.is_none() {
            missing.push("weapons");
        }
        if self.targets.is_none() {
            missing.push("targets");
        }
        if self.defenses.is_none() {
            missing.push("defenses");
        }
        if self.terrains.is_none() {
            missing.push("terrains");
        }
        missing
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the catalog as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
