//! Scenario records: the bound input combination and its evaluated result.

use serde::{Deserialize, Serialize};

use crate::entities::{Aircraft, DefenseSystem, Target, Terrain, Weapon};
use crate::error::EngineError;

/// One fully bound sweep point. Borrowed from the catalog and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Scenario<'a> {
    pub aircraft: &'a Aircraft,
    pub target: &'a Target,
    pub weapon: &'a Weapon,
    pub defense: &'a DefenseSystem,
    pub terrain: &'a Terrain,
    /// Aircraft in the flight group.
    pub formation_size: u32,
    /// Approach speed (m/s).
    pub speed: u32,
    /// Flight altitude (meters).
    pub altitude: u32,
    /// Cross-track offset from the target axis (meters).
    pub lateral_offset: i64,
}

impl Scenario<'_> {
    pub fn key(&self) -> ScenarioKey {
        ScenarioKey {
            aircraft: self.aircraft.name.clone(),
            target: self.target.name.clone(),
            weapon: self.weapon.name.clone(),
            defense: self.defense.name.clone(),
            terrain: self.terrain.name.clone(),
            formation_size: self.formation_size,
            speed: self.speed,
            altitude: self.altitude,
            lateral_offset: self.lateral_offset,
        }
    }
}

/// Identifying keys of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioKey {
    pub aircraft: String,
    pub target: String,
    pub weapon: String,
    pub defense: String,
    pub terrain: String,
    pub formation_size: u32,
    pub speed: u32,
    pub altitude: u32,
    pub lateral_offset: i64,
}

/// Evaluated probabilities and effectiveness coefficient of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub key: ScenarioKey,
    /// All-survive probability against the vectored defense geometry (P4).
    pub p_vectored: f64,
    /// All-survive probability on the closing pass (Pprl1).
    pub p_closing: f64,
    /// All-survive probability on the opposing pass (Pprl2).
    pub p_opposing: f64,
    /// Both passes survived (P5 = Pprl1 · Pprl2).
    pub p_pass: f64,
    /// Geometric area-kill probability of the strike (P_def).
    pub p_area: f64,
    /// Vulnerability weight at the defense-optimal geometry (W_a).
    pub weight: f64,
    /// Vulnerability weight at the terrain-limited geometry (W_a_max).
    pub weight_max: f64,
    /// Effectiveness coefficient K. Not a probability; may exceed 1.
    pub coefficient: f64,
    /// Whether both vectoring-turn Newton solves converged.
    pub newton_converged: bool,
}

/// Result of evaluating one scenario. Failures are kept per scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Evaluated(ScenarioResult),
    Failed { key: ScenarioKey, error: EngineError },
}

impl ScenarioOutcome {
    pub fn key(&self) -> &ScenarioKey {
        match self {
            ScenarioOutcome::Evaluated(result) => &result.key,
            ScenarioOutcome::Failed { key, .. } => key,
        }
    }

    pub fn result(&self) -> Option<&ScenarioResult> {
        match self {
            ScenarioOutcome::Evaluated(result) => Some(result),
            ScenarioOutcome::Failed { .. } => None,
        }
    }
}
