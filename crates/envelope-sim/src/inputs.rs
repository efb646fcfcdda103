//! Flattened, validated numeric view of a scenario.

use glam::DVec2;

use envelope_core::error::{EngineError, EngineResult, TableKind};
use envelope_core::scenario::Scenario;
use envelope_core::table::LookupTable;

/// Everything the probability models read from a scenario, with entity
/// preconditions already checked.
#[derive(Debug, Clone)]
pub struct ProbabilityInputs<'a> {
    // --- Defense ---
    pub defense_detection: &'a LookupTable,
    /// Battery positions as (along-track, vertical) coordinates.
    pub batteries: Vec<DVec2>,
    /// Interceptors per battery, the per-battery intercept cap.
    pub interceptor_cap: f64,
    pub interceptor_speed: f64,
    pub passive_time: f64,
    pub handoff_time: f64,
    pub reaction_time: f64,
    pub min_range: f64,
    pub max_range: f64,
    pub corridor_width: f64,
    pub max_altitude: f64,
    pub single_shot_kill: f64,

    // --- Terrain ---
    pub line_of_sight: &'a LookupTable,

    // --- Aircraft and weapon ---
    pub aircraft_detection: &'a LookupTable,
    pub lateral_sigma: f64,
    pub weapon_min_range: f64,
    pub load_factor: f64,
    pub aim_time: f64,
    /// Maximum bank angle (degrees).
    pub max_bank_angle: f64,
    pub cone_angle: f64,

    // --- Kinematics ---
    pub altitude: f64,
    pub speed: f64,
    pub lateral_offset: f64,
    pub formation_size: f64,
}

impl<'a> ProbabilityInputs<'a> {
    /// Validate the scenario's entities and flatten them.
    pub fn from_scenario(scenario: &Scenario<'a>) -> EngineResult<Self> {
        scenario.aircraft.validate()?;
        scenario.weapon.validate()?;
        scenario.target.validate()?;
        scenario.defense.validate()?;
        scenario.terrain.validate()?;

        if scenario.formation_size == 0 {
            return Err(EngineError::InvalidEntity {
                entity: "scenario",
                name: scenario.aircraft.name.clone(),
                reason: "formation size is zero".to_string(),
            });
        }
        if scenario.speed == 0 {
            return Err(EngineError::InvalidEntity {
                entity: "scenario",
                name: scenario.aircraft.name.clone(),
                reason: "approach speed is zero".to_string(),
            });
        }

        let defense = scenario.defense;
        let aircraft = scenario.aircraft;

        Ok(Self {
            defense_detection: &defense.detection,
            batteries: defense
                .batteries()
                .map(|(x, y)| DVec2::new(x, y))
                .collect(),
            interceptor_cap: defense.interceptors_per_battery as f64,
            interceptor_speed: defense.interceptor_speed,
            passive_time: defense.passive_time,
            handoff_time: defense.handoff_time,
            reaction_time: defense.reaction_time,
            min_range: defense.min_range,
            max_range: defense.max_range,
            corridor_width: defense.corridor_width,
            max_altitude: defense.max_altitude,
            single_shot_kill: defense.single_shot_kill,
            line_of_sight: &scenario.terrain.line_of_sight,
            aircraft_detection: &aircraft.detection,
            lateral_sigma: aircraft.lateral_sigma,
            weapon_min_range: scenario.weapon.min_range,
            load_factor: aircraft.max_load_factor,
            aim_time: aircraft.aim_time,
            max_bank_angle: aircraft.max_bank_angle,
            cone_angle: scenario.weapon.cone_angle,
            altitude: scenario.altitude as f64,
            speed: scenario.speed as f64,
            lateral_offset: scenario.lateral_offset as f64,
            formation_size: scenario.formation_size as f64,
        })
    }
}

/// Evaluate `table` at `query`, turning a missing value into an error.
pub(crate) fn lookup(table: &LookupTable, kind: TableKind, query: f64) -> EngineResult<f64> {
    table
        .evaluate(query)
        .ok_or(EngineError::MissingTableValue { table: kind, query })
}
