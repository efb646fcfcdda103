//! Per-scenario composition of the effectiveness coefficient K.

use envelope_core::error::{EngineError, EngineResult, TableKind};
use envelope_core::scenario::{Scenario, ScenarioResult};

use crate::area_kill::area_kill_probability;
use crate::density::normal_density;
use crate::geometry::{terrain_limited_distance, LeadModel, TurnGeometry};
use crate::inputs::{lookup, ProbabilityInputs};
use crate::intercept::{pass_survival, vectored_survival, PassDirection};

/// Probabilities and weights feeding the coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientTerms {
    pub p_vectored: f64,
    pub p_closing: f64,
    pub p_pass: f64,
    pub p_area: f64,
    pub weight: f64,
    pub weight_max: f64,
}

/// Ratio of expected strike effect to expected attrition.
///
/// Fails when the attrition term is zero or the ratio is not finite.
pub fn effectiveness_coefficient(terms: &CoefficientTerms) -> EngineResult<f64> {
    let CoefficientTerms {
        p_vectored,
        p_closing,
        p_pass,
        p_area,
        weight,
        weight_max,
    } = *terms;
    let shadowed = weight_max - weight;
    let exposed = 1.0 - weight_max;

    let numerator = p_area * p_vectored * weight + shadowed * p_area * p_pass + exposed;
    let denominator = (1.0 - p_pass) * weight
        + shadowed * (1.0 - (1.0 - p_pass).powi(2))
        + exposed * (1.0 - p_closing);

    let coefficient = numerator / denominator;
    if denominator == 0.0 || !coefficient.is_finite() {
        return Err(EngineError::DegenerateCoefficient {
            numerator,
            denominator,
        });
    }
    Ok(coefficient)
}

/// Evaluate every probability of one scenario and compose K.
pub fn compose(scenario: &Scenario<'_>) -> EngineResult<ScenarioResult> {
    let inputs = ProbabilityInputs::from_scenario(scenario)?;

    let vectored = TurnGeometry::solve(&inputs, LeadModel::BankLimited)?;
    let p_vectored = vectored_survival(&inputs, &vectored)?;
    let p_closing = pass_survival(&inputs, PassDirection::Closing)?;
    let p_opposing = pass_survival(&inputs, PassDirection::Opposing)?;
    let p_pass = p_closing * p_opposing;

    let density = normal_density(inputs.lateral_sigma, inputs.lateral_offset);
    let terrain_limited = terrain_limited_distance(inputs.lateral_offset, inputs.max_bank_angle);
    let weight_max = lookup(
        inputs.aircraft_detection,
        TableKind::AircraftDetection,
        terrain_limited,
    )? * density;

    let optimal = TurnGeometry::solve(&inputs, LeadModel::ConeLimited)?;
    let weight = lookup(
        inputs.aircraft_detection,
        TableKind::AircraftDetection,
        optimal.furthest(),
    )? * density;

    let p_area = area_kill_probability(scenario)?;

    let coefficient = effectiveness_coefficient(&CoefficientTerms {
        p_vectored,
        p_closing,
        p_pass,
        p_area,
        weight,
        weight_max,
    })?;

    Ok(ScenarioResult {
        key: scenario.key(),
        p_vectored,
        p_closing,
        p_opposing,
        p_pass,
        p_area,
        weight,
        weight_max,
        coefficient,
        newton_converged: vectored.solve.converged && optimal.solve.converged,
    })
}
