//! Vectored intercept window (P4).
//!
//! The defense engages an attacker that turns onto its release point. Each
//! battery covers a sphere of the mean engagement radius; the stretch of
//! track it can engage depends on how the direct-turn, vectored-turn and
//! terrain-limited distances compare.

use glam::DVec2;

use envelope_core::error::EngineResult;

use super::{accrue, formation_survival, half_chord, ContinueWhile, LateIntercept};
use crate::geometry::TurnGeometry;
use crate::inputs::ProbabilityInputs;

/// How a battery's engageable track is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorridorStrategy {
    /// Direct turn dominates: one stretch from the minimum-range edge to
    /// the sphere's far boundary.
    Direct,
    /// Vectored or terrain-limited geometry: an entry stretch plus the
    /// overlap of the sphere with `[near, far]`.
    Split {
        near: f64,
        far: f64,
        /// Along-track point where the attacker enters the engagement.
        entry: f64,
    },
}

impl CorridorStrategy {
    pub fn select(geometry: &TurnGeometry, lateral_offset: f64) -> Self {
        let TurnGeometry {
            direct: d1,
            vectored: d2,
            terrain_limited: d3,
            ..
        } = *geometry;

        if d1 > d2 && d3 < d1 {
            return CorridorStrategy::Direct;
        }

        let entry = if d2 > d3 {
            geometry.turn_exit_x
        } else {
            (d3 * d3 - lateral_offset * lateral_offset).max(0.0).sqrt()
        };
        CorridorStrategy::Split {
            near: d2.min(d3),
            far: d2.max(d3),
            entry,
        }
    }

    /// Engageable track length for a battery at `battery` with sphere
    /// `radius`. Zero when the track misses the sphere.
    pub fn corridor_length(
        &self,
        inputs: &ProbabilityInputs<'_>,
        battery: DVec2,
        radius: f64,
    ) -> f64 {
        let Some(chord) = half_chord(radius, inputs.altitude - battery.y, inputs.lateral_offset)
        else {
            return 0.0;
        };
        let right = battery.x + chord;
        let left = battery.x - chord;

        match *self {
            CorridorStrategy::Direct => (right - (battery.y + inputs.min_range)).max(0.0),
            CorridorStrategy::Split { near, far, entry } => {
                if right <= near {
                    return 0.0;
                }
                let entry_leg = (right - entry).max(0.0);
                let overlap = (right.min(far) - left.max(near)).max(0.0);
                entry_leg + overlap
            }
        }
    }
}

/// All-survive probability of the formation against vectored engagement.
pub fn vectored_survival(
    inputs: &ProbabilityInputs<'_>,
    geometry: &TurnGeometry,
) -> EngineResult<f64> {
    let radius = (inputs.min_range + inputs.max_range) / 2.0;
    let strategy = CorridorStrategy::select(geometry, inputs.lateral_offset);
    let closing_speed = inputs.speed + inputs.interceptor_speed;
    let mut total = 0.0;

    for (index, &battery) in inputs.batteries.iter().enumerate() {
        let axis_distance = battery.distance(DVec2::new(0.0, inputs.altitude));
        if axis_distance > radius {
            continue;
        }

        let corridor = strategy.corridor_length(inputs, battery, radius);
        total += accrue(
            inputs,
            index,
            corridor,
            closing_speed,
            ContinueWhile::DistanceAndStock,
            LateIntercept::Stop,
        )?;
    }

    Ok(formation_survival(inputs, total))
}
