//! Scenario enumeration and the sweep driver.

use rayon::prelude::*;

use envelope_core::catalog::{CatalogView, EntityCatalog};
use envelope_core::config::SweepConfig;
use envelope_core::error::EngineResult;
use envelope_core::scenario::{Scenario, ScenarioOutcome};

use crate::compose::compose;

/// Every scenario of the sweep, in nesting order: aircraft, target, weapon,
/// defense, terrain, speed, altitude, formation size, lateral offset.
///
/// Returns an empty list when any entity collection is absent.
pub fn enumerate_scenarios<'a>(
    catalog: &'a EntityCatalog,
    config: &SweepConfig,
) -> Vec<Scenario<'a>> {
    let Some(view) = catalog.complete() else {
        tracing::warn!(
            "Catalog is missing {:?}; sweep yields no scenarios",
            catalog.missing_collections()
        );
        return Vec::new();
    };
    enumerate_view(view, config)
}

fn enumerate_view<'a>(view: CatalogView<'a>, config: &SweepConfig) -> Vec<Scenario<'a>> {
    let speeds = config.speed.values();
    let altitudes = config.altitude.values();
    let formations = config.formation.values();
    let mut scenarios = Vec::new();

    for aircraft in view.aircraft {
        let offsets = config.lateral_offsets(aircraft.lateral_sigma);
        for target in view.targets {
            for weapon in view.weapons {
                for defense in view.defenses {
                    for terrain in view.terrains {
                        for &speed in &speeds {
                            for &altitude in &altitudes {
                                for &formation_size in &formations {
                                    for &lateral_offset in &offsets {
                                        scenarios.push(Scenario {
                                            aircraft,
                                            target,
                                            weapon,
                                            defense,
                                            terrain,
                                            formation_size,
                                            speed,
                                            altitude,
                                            lateral_offset,
                                        });
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    scenarios
}

/// Evaluate one scenario, keeping a failure as its outcome.
pub fn evaluate(scenario: &Scenario<'_>) -> ScenarioOutcome {
    match compose(scenario) {
        Ok(result) => ScenarioOutcome::Evaluated(result),
        Err(error) => {
            tracing::debug!("Scenario {:?} failed: {}", scenario.key(), error);
            ScenarioOutcome::Failed {
                key: scenario.key(),
                error,
            }
        }
    }
}

/// Enumerate and evaluate the full sweep.
///
/// Outcomes are in enumeration order whether or not the sweep runs in
/// parallel, and a failing scenario never stops the others.
pub fn run_sweep(
    catalog: &EntityCatalog,
    config: &SweepConfig,
) -> EngineResult<Vec<ScenarioOutcome>> {
    config.validate()?;
    let scenarios = enumerate_scenarios(catalog, config);

    let outcomes: Vec<ScenarioOutcome> = if config.parallel {
        scenarios.par_iter().map(evaluate).collect()
    } else {
        scenarios.iter().map(evaluate).collect()
    };

    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.result().is_none())
        .count();
    tracing::info!(
        "Sweep evaluated {} scenarios ({} failed)",
        outcomes.len(),
        failed
    );

    Ok(outcomes)
}
