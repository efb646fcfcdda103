//! Intercept-window calculators.
//!
//! Each calculator walks every battery's engagement corridor, accruing the
//! expected number of interceptors that reach the formation, and converts
//! the total into the probability that every aircraft survives. Results
//! are returned as values; nothing is cached between calls.

pub mod pass;
pub mod vectored;

use envelope_core::constants::*;
use envelope_core::error::{EngineError, EngineResult, TableKind};

use crate::inputs::{lookup, ProbabilityInputs};

pub use pass::{pass_survival, PassDirection};
pub use vectored::{vectored_survival, CorridorStrategy};

/// Loop condition of the accrual walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueWhile {
    /// Keep launching while corridor remains or interceptors remain.
    DistanceOrStock,
    /// Keep launching only while corridor and interceptors both remain.
    DistanceAndStock,
}

/// What happens when an interceptor cannot reach the attacker in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateIntercept {
    /// Skip the shot but keep walking the corridor.
    Advance,
    /// End the walk for this battery.
    Stop,
}

/// Probability that the defense sees the attacker at `distance`.
///
/// At the threshold altitude this is the terrain's line-of-sight value;
/// above it an altitude gain is added. Below it the attacker is masked.
pub fn line_of_sight(inputs: &ProbabilityInputs<'_>, distance: f64) -> EngineResult<f64> {
    let altitude = inputs.altitude;
    if altitude < LOS_ALTITUDE_THRESHOLD {
        return Ok(0.0);
    }

    let base = lookup(inputs.line_of_sight, TableKind::TerrainLineOfSight, distance)?;
    let visibility = if altitude > LOS_ALTITUDE_THRESHOLD {
        base + LOS_ALTITUDE_GAIN * altitude - LOS_ALTITUDE_OFFSET
    } else {
        base
    };
    Ok(visibility.clamp(0.0, 1.0))
}

/// Walk one battery's corridor of `corridor` meters and return the capped
/// expected intercept count.
pub(crate) fn accrue(
    inputs: &ProbabilityInputs<'_>,
    battery: usize,
    corridor: f64,
    closing_speed: f64,
    condition: ContinueWhile,
    late: LateIntercept,
) -> EngineResult<f64> {
    let cap = inputs.interceptor_cap;
    let mut remaining = corridor;
    let mut intercepts = 0.0;
    let mut steps = 0;

    loop {
        let proceed = match condition {
            ContinueWhile::DistanceOrStock => remaining > 0.0 || intercepts < cap,
            ContinueWhile::DistanceAndStock => remaining > 0.0 && intercepts < cap,
        };
        if !proceed {
            break;
        }
        if steps == ACCRUAL_STEP_LIMIT {
            return Err(EngineError::AccrualStalled { battery, steps });
        }
        steps += 1;

        let flight_time = remaining / closing_speed + inputs.reaction_time;
        let visibility = line_of_sight(inputs, remaining)?;

        if flight_time * inputs.speed > remaining {
            let detect = lookup(
                inputs.defense_detection,
                TableKind::DefenseDetection,
                remaining,
            )?;
            let gain = detect * visibility;
            if condition == ContinueWhile::DistanceOrStock
                && spends_stock_only(inputs, remaining, closing_speed)
            {
                // Every further step repeats this gain until the stock is spent.
                if gain > 0.0 {
                    return Ok(cap);
                }
                return Err(EngineError::AccrualStalled { battery, steps });
            }
            intercepts += gain;
        } else if late == LateIntercept::Stop {
            break;
        }
        remaining -= inputs.speed * flight_time;
    }

    Ok(intercepts.min(cap))
}

/// True once the corridor is spent and every later step of the walk is
/// identical: the remaining distance stays at or below zero, below the
/// start of both tables, and each step still reaches the attacker.
fn spends_stock_only(inputs: &ProbabilityInputs<'_>, remaining: f64, closing_speed: f64) -> bool {
    let floor = match (inputs.defense_detection.first_x(), inputs.line_of_sight.first_x()) {
        (Some(detect), Some(visible)) => detect.min(visible),
        _ => return false,
    };
    remaining <= 0.0
        && floor >= 0.0
        && closing_speed > inputs.speed
        && inputs.reaction_time >= 0.0
}

/// Probability that every aircraft in the formation survives
/// `total_intercepts` expected interceptor shots.
pub(crate) fn formation_survival(inputs: &ProbabilityInputs<'_>, total_intercepts: f64) -> f64 {
    let shots_per_aircraft = total_intercepts / inputs.formation_size;
    (1.0 - inputs.single_shot_kill).powf(shots_per_aircraft)
}

/// Half-length of the chord cut by a sphere of `radius` at the given
/// vertical and lateral offsets from its center, if the plane intersects it.
pub(crate) fn half_chord(radius: f64, vertical: f64, lateral: f64) -> Option<f64> {
    let radicand = radius * radius - vertical * vertical - lateral * lateral;
    (radicand >= 0.0).then(|| radicand.sqrt())
}


#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;
    use envelope_core::entities::WarheadKind;
    use envelope_core::scenario::Scenario;

    fn with_inputs<R>(altitude: u32, f: impl FnOnce(&ProbabilityInputs<'_>) -> R) -> R {
        let (aircraft, target, weapon, defense, terrain) = (
            fixtures::aircraft(),
            fixtures::target(),
            fixtures::weapon(WarheadKind::Blast),
            fixtures::defense(),
            fixtures::terrain(),
        );
        let scenario = Scenario {
            aircraft: &aircraft,
            target: &target,
            weapon: &weapon,
            defense: &defense,
            terrain: &terrain,
            formation_size: 2,
            speed: 200,
            altitude,
            lateral_offset: 50,
        };
        let inputs = ProbabilityInputs::from_scenario(&scenario).unwrap();
        f(&inputs)
    }

    #[test]
    fn test_line_of_sight_masked_below_threshold() {
        with_inputs(40, |inputs| {
            assert_eq!(line_of_sight(inputs, 2000.0).unwrap(), 0.0);
        });
    }

    #[test]
    fn test_line_of_sight_at_threshold_uses_table() {
        with_inputs(50, |inputs| {
            let value = line_of_sight(inputs, 1000.0).unwrap();
            assert!((value - 0.9).abs() < 1e-12);
        });
    }

    #[test]
    fn test_line_of_sight_above_threshold_is_clamped() {
        with_inputs(100, |inputs| {
            assert_eq!(line_of_sight(inputs, 20_000.0).unwrap(), 1.0);
        });
    }

    #[test]
    fn test_accrual_capped_at_interceptor_count() {
        with_inputs(100, |inputs| {
            let n = accrue(
                inputs,
                0,
                5_000.0,
                600.0,
                ContinueWhile::DistanceOrStock,
                LateIntercept::Advance,
            )
            .unwrap();
            assert_eq!(n, inputs.interceptor_cap);
        });
    }

    #[test]
    fn test_accrual_and_condition_stops_with_corridor() {
        with_inputs(100, |inputs| {
            // One shot consumes the whole 2748 m corridor.
            let n = accrue(
                inputs,
                0,
                2_748.0,
                600.0,
                ContinueWhile::DistanceAndStock,
                LateIntercept::Stop,
            )
            .unwrap();
            assert!((n - 0.8).abs() < 1e-12, "expected one shot at Pd 0.8, got {n}");
        });
    }

    #[test]
    fn test_empty_corridor_differs_by_condition() {
        with_inputs(100, |inputs| {
            let either = accrue(
                inputs,
                0,
                0.0,
                600.0,
                ContinueWhile::DistanceOrStock,
                LateIntercept::Advance,
            )
            .unwrap();
            let both = accrue(
                inputs,
                0,
                0.0,
                600.0,
                ContinueWhile::DistanceAndStock,
                LateIntercept::Advance,
            )
            .unwrap();
            assert_eq!(both, 0.0);
            assert_eq!(either, inputs.interceptor_cap);
        });
    }

    #[test]
    fn test_masked_attacker_stalls_or_loop() {
        // Below the line-of-sight threshold nothing accrues, so the
        // corridor-or-stock walk can never finish.
        with_inputs(40, |inputs| {
            let err = accrue(
                inputs,
                1,
                1_000.0,
                600.0,
                ContinueWhile::DistanceOrStock,
                LateIntercept::Advance,
            )
            .unwrap_err();
            assert!(
                matches!(
                    err,
                    EngineError::AccrualStalled { battery: 1, steps } if steps < ACCRUAL_STEP_LIMIT
                ),
                "got {err:?}"
            );
        });
    }

    #[test]
    fn test_stock_only_walk_requires_exhausted_corridor() {
        with_inputs(100, |inputs| {
            assert!(!spends_stock_only(inputs, 10.0, 600.0));
            assert!(spends_stock_only(inputs, 0.0, 600.0));
            assert!(spends_stock_only(inputs, -500.0, 600.0));
            // Interceptors no faster than the attacker never settle.
            assert!(!spends_stock_only(inputs, -500.0, 200.0));
        });
    }

    #[test]
    fn test_formation_survival() {
        with_inputs(100, |inputs| {
            assert_eq!(formation_survival(inputs, 0.0), 1.0);
            let p = formation_survival(inputs, 2.0);
            assert!((p - 0.2).abs() < 1e-12, "one shot each at Pk 0.8, got {p}");
        });
    }

    #[test]
    fn test_half_chord() {
        assert_eq!(half_chord(5.0, 3.0, 0.0), Some(4.0));
        assert_eq!(half_chord(5.0, 3.0, 4.0), Some(0.0));
        assert_eq!(half_chord(5.0, 4.0, 4.0), None);
    }
}
