//! Geometric area-kill estimate for the strike on a rectangular target.
//!
//! Weapon impacts are normally distributed about the aim point. The kill
//! region is the target footprint (grown by the kill radius for blast
//! warheads) plus the strip behind it shadowed by the target's height at
//! the release dive angle.

use statrs::function::erf::erf;

use envelope_core::constants::{AREA_DISPERSION_X, AREA_DISPERSION_Y};
use envelope_core::entities::WarheadKind;
use envelope_core::error::EngineResult;
use envelope_core::scenario::Scenario;

/// Standard normal cumulative distribution.
fn laplace(u: f64) -> f64 {
    0.5 * (1.0 + erf(u / std::f64::consts::SQRT_2))
}

/// Axis-aligned region of the ground plane, in meters about the aim point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct KillBox {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    center_x: f64,
}

impl KillBox {
    /// Probability that one impact lands in the box.
    fn hit_probability(&self) -> f64 {
        let along = laplace((self.x_max - self.center_x) / AREA_DISPERSION_X)
            - laplace((self.x_min - self.center_x) / AREA_DISPERSION_X);
        let across =
            laplace(self.y_max / AREA_DISPERSION_Y) - laplace(self.y_min / AREA_DISPERSION_Y);
        along * across
    }
}

/// Cotangent of the release dive angle, infinite for a level release.
fn dive_cotangent(altitude: f64, min_range: f64) -> f64 {
    let dive = altitude.atan2(min_range.to_radians());
    let tangent = dive.to_radians().tan();
    if tangent != 0.0 {
        1.0 / tangent
    } else {
        f64::INFINITY
    }
}

/// Probability that one weapon hits the kill region.
pub fn single_weapon_probability(scenario: &Scenario<'_>) -> f64 {
    let target = scenario.target;
    let cot = dive_cotangent(scenario.altitude as f64, scenario.weapon.min_range);
    let (half_depth, half_span) = (target.depth / 2.0, target.span / 2.0);

    let allowance = match scenario.weapon.warhead {
        WarheadKind::Blast => target.kill_radius,
        WarheadKind::ShapedCharge => 0.0,
    };

    let footprint = KillBox {
        x_min: -half_depth - allowance,
        x_max: half_depth + allowance,
        y_min: -half_span - allowance,
        y_max: half_span + allowance,
        center_x: 0.0,
    };

    let shadow = if cot.is_finite() {
        let shadow_length = target.height * cot;
        KillBox {
            x_min: half_depth + allowance,
            x_max: half_depth + shadow_length,
            y_min: -half_span,
            y_max: half_span,
            center_x: (target.depth + allowance + shadow_length) / 2.0,
        }
        .hit_probability()
    } else {
        0.0
    };

    (footprint.hit_probability() + shadow).clamp(0.0, 1.0)
}

/// Probability that the formation's salvo kills the target (P_def).
pub fn area_kill_probability(scenario: &Scenario<'_>) -> EngineResult<f64> {
    scenario.target.validate()?;
    scenario.weapon.validate()?;

    let single = single_weapon_probability(scenario);
    let per_weapon = match scenario.weapon.warhead {
        WarheadKind::Blast => single,
        WarheadKind::ShapedCharge => (single / scenario.target.expected_hits).clamp(0.0, 1.0),
    };

    let salvo = scenario.aircraft.rockets as f64 * scenario.formation_size as f64;
    Ok(1.0 - (1.0 - per_weapon).powf(salvo))
}
