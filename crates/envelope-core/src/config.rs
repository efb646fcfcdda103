//! Sweep configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EngineError, EngineResult};

/// An inclusive integer range with a positive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl SweepRange {
    pub const fn new(start: u32, end: u32, step: u32) -> Self {
        Self { start, end, step }
    }

    /// Values from `start` to `end` inclusive. Empty when `step` is zero.
    pub fn values(&self) -> Vec<u32> {
        if self.step == 0 {
            return Vec::new();
        }
        (self.start..=self.end).step_by(self.step as usize).collect()
    }
}

/// Configuration for a parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Formation sizes (aircraft per flight group).
    pub formation: SweepRange,
    /// Approach speeds (m/s).
    pub speed: SweepRange,
    /// Flight altitudes (meters).
    pub altitude: SweepRange,
    /// Lateral offsets span `±lateral_sigma_span · sigma` of each aircraft.
    pub lateral_sigma_span: f64,
    /// Lateral offset step (meters).
    pub lateral_step: u32,
    /// Evaluate scenarios on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            formation: SweepRange::new(FORMATION_MIN, FORMATION_MAX, 1),
            speed: SweepRange::new(SPEED_MIN, SPEED_MAX, SPEED_STEP),
            altitude: SweepRange::new(ALTITUDE_MIN, ALTITUDE_MAX, ALTITUDE_STEP),
            lateral_sigma_span: LATERAL_SIGMA_SPAN,
            lateral_step: LATERAL_STEP,
            parallel: true,
        }
    }
}

fn invalid_config(reason: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        reason: reason.into(),
    }
}

impl SweepConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for (label, range) in [
            ("formation", &self.formation),
            ("speed", &self.speed),
            ("altitude", &self.altitude),
        ] {
            if range.step == 0 {
                return Err(invalid_config(format!("{label} step is zero")));
            }
        }
        if self.formation.start == 0 {
            return Err(invalid_config("formation sizes start at 1"));
        }
        if self.speed.start == 0 {
            return Err(invalid_config("approach speeds must be positive"));
        }
        if self.lateral_step == 0 {
            return Err(invalid_config("lateral step is zero"));
        }
        if !(self.lateral_sigma_span >= 0.0) {
            return Err(invalid_config("lateral sigma span is negative"));
        }
        Ok(())
    }

    /// Lateral offsets swept for an aircraft with dispersion `sigma`.
    ///
    /// Runs from `trunc(-span·σ)` up to but excluding `trunc(span·σ)`.
    pub fn lateral_offsets(&self, sigma: f64) -> Vec<i64> {
        if self.lateral_step == 0 {
            return Vec::new();
        }
        let extent = self.lateral_sigma_span * sigma;
        let start = (-extent).trunc() as i64;
        let end = extent.trunc() as i64;
        (start..end).step_by(self.lateral_step as usize).collect()
    }
}
