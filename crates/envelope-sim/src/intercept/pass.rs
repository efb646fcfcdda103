//! Straight-pass intercept windows (Pprl1 and Pprl2).
//!
//! The attacker flies straight past each battery at its altitude and
//! lateral offset. On the closing pass it flies toward the battery and the
//! interceptors meet it head-on; on the opposing pass it flies away and
//! the interceptors must catch up.

use glam::DVec3;

use envelope_core::error::EngineResult;

use super::{accrue, formation_survival, half_chord, ContinueWhile, LateIntercept};
use crate::inputs::ProbabilityInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassDirection {
    /// Attacker inbound; closing speed is the sum of both speeds.
    Closing,
    /// Attacker outbound; closing speed is the interceptor's excess speed.
    Opposing,
}

impl PassDirection {
    fn closing_speed(self, inputs: &ProbabilityInputs<'_>) -> f64 {
        match self {
            PassDirection::Closing => inputs.speed + inputs.interceptor_speed,
            PassDirection::Opposing => inputs.interceptor_speed - inputs.speed,
        }
    }

    fn condition(self) -> ContinueWhile {
        match self {
            PassDirection::Closing => ContinueWhile::DistanceOrStock,
            PassDirection::Opposing => ContinueWhile::DistanceAndStock,
        }
    }
}

/// Length of the engagement corridor a battery at `battery` cuts along the
/// attacker's track, or `None` when the attacker never enters its range.
pub fn pass_corridor(inputs: &ProbabilityInputs<'_>, battery: DVec3) -> Option<f64> {
    let aircraft = DVec3::new(0.0, inputs.altitude, inputs.lateral_offset);
    let max_range = inputs.max_range;
    if battery.distance_squared(aircraft) > max_range * max_range {
        return None;
    }

    let chord = half_chord(
        max_range,
        inputs.altitude - battery.y,
        inputs.lateral_offset,
    )?;
    Some((battery.x + chord - (battery.y + inputs.min_range)).max(0.0))
}

/// All-survive probability of the formation on a straight pass.
pub fn pass_survival(inputs: &ProbabilityInputs<'_>, direction: PassDirection) -> EngineResult<f64> {
    let closing_speed = direction.closing_speed(inputs);
    let mut total = 0.0;

    for (index, position) in inputs.batteries.iter().enumerate() {
        let battery = position.extend(0.0);
        let Some(corridor) = pass_corridor(inputs, battery) else {
            continue;
        };
        // Interceptors slower than the attacker never catch it.
        if closing_speed <= 0.0 {
            continue;
        }
        total += accrue(
            inputs,
            index,
            corridor,
            closing_speed,
            direction.condition(),
            LateIntercept::Advance,
        )?;
    }

    Ok(formation_survival(inputs, total))
}
