//! Vectoring-turn geometry of an attacker maneuvering onto its release point.
//!
//! Three candidate distances describe where the defense must engage:
//! the direct-turn distance `D1`, the vectored-turn distance `D2` (from a
//! Newton solve of the circular-arc turn), and the terrain-limited
//! distance `D3` set by the lateral offset and maximum bank angle.

use envelope_core::constants::*;
use envelope_core::error::{EngineError, EngineResult};

use crate::inputs::ProbabilityInputs;
use crate::newton::{self, NewtonSolution};

/// Which quantity sets the lead angle at the start of the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadModel {
    /// Lead from the aircraft's maximum bank angle (vectored intercept geometry).
    BankLimited,
    /// Lead from the weapon's cone angle (defense-optimal geometry).
    ConeLimited,
}

/// Solved turn geometry for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnGeometry {
    /// Direct-turn distance `D1`.
    pub direct: f64,
    /// Vectored-turn distance `D2`.
    pub vectored: f64,
    /// Terrain-limited distance `D3`.
    pub terrain_limited: f64,
    /// Along-track coordinate where the vectored turn ends (`x2`).
    pub turn_exit_x: f64,
    /// Turn-angle solve, in degrees.
    pub solve: NewtonSolution,
}

/// Terrain-limited detection distance `z / sin(ψ)`.
pub fn terrain_limited_distance(lateral_offset: f64, max_bank_angle: f64) -> f64 {
    lateral_offset / max_bank_angle.to_radians().sin()
}

/// Radius of a level turn at `speed` with load factor `load_factor`.
pub fn turn_radius(speed: f64, load_factor: f64) -> EngineResult<f64> {
    let lift_excess = load_factor * load_factor - 1.0;
    if !(lift_excess > 0.0) {
        return Err(EngineError::Domain {
            quantity: "load factor",
            value: load_factor,
        });
    }
    Ok(speed * speed / (GRAVITY * lift_excess.sqrt()))
}

impl TurnGeometry {
    pub fn solve(inputs: &ProbabilityInputs<'_>, lead: LeadModel) -> EngineResult<Self> {
        let r_min = inputs.weapon_min_range;
        let z = inputs.lateral_offset;
        let run = inputs.speed * inputs.aim_time;
        let bank = inputs.max_bank_angle.to_radians();

        let offset_leg = (z * z - r_min * r_min).abs().sqrt();
        let direct = (r_min * r_min + run * run + 2.0 * run * offset_leg).sqrt();

        let (lead_term, lead_sine_term) = match lead {
            LeadModel::BankLimited => (bank.cos(), r_min * bank.sin()),
            LeadModel::ConeLimited => (inputs.cone_angle, r_min * inputs.cone_angle),
        };
        let y0 = (r_min * r_min + run * run + 2.0 * run * lead_term).sqrt();

        let lead_sine = (lead_sine_term / y0).to_radians();
        if !(-1.0..=1.0).contains(&lead_sine) {
            return Err(EngineError::Domain {
                quantity: "turn lead angle sine",
                value: lead_sine,
            });
        }
        let phi0 = match lead {
            LeadModel::BankLimited => lead_sine.asin().abs(),
            LeadModel::ConeLimited => lead_sine.asin(),
        };

        let radius = turn_radius(inputs.speed, inputs.load_factor)?;

        // Lateral offset reached after turning through `alpha` degrees.
        let residual = |alpha: f64| {
            z - (y0 * alpha.to_radians().sin()
                + radius * (1.0 - (alpha - phi0).to_radians().cos()))
        };
        let slope = |alpha: f64| {
            y0 * alpha.to_radians().cos() - radius * (alpha - phi0).to_radians().sin()
        };
        let solve = newton::solve(
            residual,
            slope,
            NEWTON_START_ANGLE,
            NEWTON_TOLERANCE,
            NEWTON_MAX_ITERATIONS,
        );

        let alpha = solve.root;
        let turn_exit_x =
            y0 * alpha.to_radians().cos() + radius * (alpha - phi0).to_radians().sin();
        let vectored = (turn_exit_x * turn_exit_x + z * z).sqrt();

        Ok(Self {
            direct,
            vectored,
            terrain_limited: terrain_limited_distance(z, inputs.max_bank_angle),
            turn_exit_x,
            solve,
        })
    }

    /// The furthest of the three candidate distances.
    pub fn furthest(&self) -> f64 {
        self.direct.max(self.vectored).max(self.terrain_limited)
    }
}
