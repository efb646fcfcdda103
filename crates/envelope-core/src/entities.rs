//! Entity records supplied by the external data layer.
//!
//! Records are plain data and read-only to the engine. Each has a
//! `validate` method checking the preconditions the probability models
//! rely on, so that a bad record fails the scenarios it takes part in
//! instead of producing silent NaNs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::table::LookupTable;

/// An attacking aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub name: String,
    /// Probability of detecting the target versus distance (meters).
    pub detection: LookupTable,
    /// Lateral aiming dispersion (meters, one sigma).
    pub lateral_sigma: f64,
    /// Maximum turn load factor (g). Must exceed 1 for a finite turn radius.
    pub max_load_factor: f64,
    /// Time to aim before weapon release (seconds).
    pub aim_time: f64,
    /// Maximum bank angle (degrees).
    pub max_bank_angle: f64,
    /// Weapons carried per aircraft.
    pub rockets: u32,
}

/// Warhead class, which decides how area-hit probability becomes a kill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarheadKind {
    /// High-explosive blast: kill radius extends the target footprint.
    #[default]
    Blast,
    /// Shaped charge: needs several hits, given by the target's expected-hits divisor.
    ShapedCharge,
}

/// An air-to-ground weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub warhead: WarheadKind,
    /// Minimum release range (meters).
    pub min_range: f64,
    /// Maximum release range (meters).
    pub max_range: f64,
    /// Mean flight speed (m/s).
    pub mean_speed: f64,
    /// Effective cone angle of the warhead.
    pub cone_angle: f64,
}

/// A rectangular ground target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    /// Footprint extent across the attack axis (meters).
    pub span: f64,
    /// Footprint extent along the attack axis (meters).
    pub depth: f64,
    /// Target height (meters).
    pub height: f64,
    /// Blast kill radius around the footprint (meters).
    pub kill_radius: f64,
    /// Expected number of shaped-charge hits needed per unit area-hit probability.
    pub expected_hits: f64,
}

/// A layered air-defense system made of several batteries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseSystem {
    pub name: String,
    pub battery_count: usize,
    /// Interceptors available to each battery.
    pub interceptors_per_battery: u32,
    /// Interceptor speed (m/s).
    pub interceptor_speed: f64,
    pub passive_time: f64,
    pub handoff_time: f64,
    /// Reaction time added to every intercept (seconds).
    pub reaction_time: f64,
    /// Along-track battery coordinates (meters).
    pub battery_x: Vec<f64>,
    /// Vertical battery coordinates (meters).
    pub battery_y: Vec<f64>,
    /// Minimum engagement radius (meters).
    pub min_range: f64,
    /// Maximum engagement radius (meters).
    pub max_range: f64,
    pub corridor_width: f64,
    pub max_altitude: f64,
    /// Single-shot kill probability of one interceptor.
    pub single_shot_kill: f64,
    /// Probability of detecting the attacker versus distance (meters).
    pub detection: LookupTable,
}

/// Terrain type, characterized by line-of-sight probability versus distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    pub line_of_sight: LookupTable,
}

fn invalid(entity: &'static str, name: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidEntity {
        entity,
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn check_table(
    entity: &'static str,
    name: &str,
    label: &str,
    table: &LookupTable,
) -> EngineResult<()> {
    if table.is_empty() {
        return Err(invalid(entity, name, format!("{label} table is empty")));
    }
    if !table.is_probability_table() {
        return Err(invalid(
            entity,
            name,
            format!("{label} table has values outside [0, 1]"),
        ));
    }
    Ok(())
}

impl Aircraft {
    pub fn validate(&self) -> EngineResult<()> {
        check_table("aircraft", &self.name, "detection", &self.detection)?;
        if !(self.lateral_sigma > 0.0) {
            return Err(invalid("aircraft", &self.name, "lateral sigma must be positive"));
        }
        if !(self.max_load_factor > 1.0) {
            return Err(invalid("aircraft", &self.name, "max load factor must exceed 1"));
        }
        if !(self.max_bank_angle > 0.0 && self.max_bank_angle < 180.0) {
            return Err(invalid(
                "aircraft",
                &self.name,
                "max bank angle must lie in (0, 180) degrees",
            ));
        }
        if self.aim_time < 0.0 {
            return Err(invalid("aircraft", &self.name, "aim time is negative"));
        }
        Ok(())
    }
}

impl Weapon {
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.min_range >= 0.0) {
            return Err(invalid("weapon", &self.name, "minimum range is negative"));
        }
        if self.max_range < self.min_range {
            return Err(invalid(
                "weapon",
                &self.name,
                "maximum range is below minimum range",
            ));
        }
        Ok(())
    }
}

impl Target {
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.span >= 0.0 && self.depth >= 0.0) {
            return Err(invalid("target", &self.name, "footprint extents are negative"));
        }
        if !(self.expected_hits > 0.0) {
            return Err(invalid("target", &self.name, "expected hits must be positive"));
        }
        Ok(())
    }
}

impl DefenseSystem {
    pub fn validate(&self) -> EngineResult<()> {
        check_table("defense system", &self.name, "detection", &self.detection)?;
        if self.battery_x.len() < self.battery_count || self.battery_y.len() < self.battery_count {
            return Err(invalid(
                "defense system",
                &self.name,
                format!(
                    "{} batteries declared but only {}/{} coordinates given",
                    self.battery_count,
                    self.battery_x.len(),
                    self.battery_y.len()
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.single_shot_kill) {
            return Err(invalid(
                "defense system",
                &self.name,
                "single-shot kill probability outside [0, 1]",
            ));
        }
        if !(self.interceptor_speed > 0.0) {
            return Err(invalid(
                "defense system",
                &self.name,
                "interceptor speed must be positive",
            ));
        }
        if self.max_range < self.min_range {
            return Err(invalid(
                "defense system",
                &self.name,
                "maximum range is below minimum range",
            ));
        }
        Ok(())
    }

    /// Battery positions as `(x, y)` pairs, limited to `battery_count`.
    pub fn batteries(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.battery_x
            .iter()
            .copied()
            .zip(self.battery_y.iter().copied())
            .take(self.battery_count)
    }
}

impl Terrain {
    pub fn validate(&self) -> EngineResult<()> {
        check_table("terrain", &self.name, "line-of-sight", &self.line_of_sight)
    }
}
