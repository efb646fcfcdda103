//! Single-pass statistics over sweep outcomes.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use envelope_core::scenario::{ScenarioOutcome, ScenarioResult};

/// Running count and sum of coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub count: u64,
    pub sum: f64,
}

impl AggregateBucket {
    pub fn single(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
        }
    }

    /// Mean of the accumulated values, `None` for an empty bucket.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl Add for AggregateBucket {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
        }
    }
}

impl AddAssign for AggregateBucket {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Mean coefficient per formation size for one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSeries {
    pub aircraft: String,
    pub formation_sizes: Vec<u32>,
    pub coefficients: Vec<f64>,
}

/// Mean coefficient of an aircraft/weapon pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponPairing {
    pub aircraft: String,
    pub weapon: String,
    pub coefficient: f64,
    pub scenarios: u64,
}

/// Best aircraft's mean coefficient at one altitude, refined by speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSeries {
    pub altitude: u32,
    pub coefficient: f64,
    pub speeds: Vec<u32>,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub by_formation: Vec<FormationSeries>,
    pub by_weapon: Vec<WeaponPairing>,
    /// Aircraft with the highest mean coefficient over any formation size.
    pub best_aircraft: Option<String>,
    /// Altitude series of the best aircraft.
    pub by_altitude: Vec<AltitudeSeries>,
    pub evaluated: u64,
    pub skipped: u64,
    pub unconverged: u64,
}

/// Accumulates outcomes one at a time. Keys are ordered so the summary
/// does not depend on hash iteration order.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    by_formation: BTreeMap<(String, u32), AggregateBucket>,
    by_weapon: BTreeMap<(String, String), AggregateBucket>,
    by_altitude: BTreeMap<(String, u32), AggregateBucket>,
    by_altitude_speed: BTreeMap<(String, u32, u32), AggregateBucket>,
    evaluated: u64,
    skipped: u64,
    unconverged: u64,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, outcome: &ScenarioOutcome) {
        match outcome.result() {
            Some(result) => self.fold_result(result),
            None => self.skipped += 1,
        }
    }

    fn fold_result(&mut self, result: &ScenarioResult) {
        let key = &result.key;
        let bucket = AggregateBucket::single(result.coefficient);

        *self
            .by_formation
            .entry((key.aircraft.clone(), key.formation_size))
            .or_default() += bucket;
        *self
            .by_weapon
            .entry((key.aircraft.clone(), key.weapon.clone()))
            .or_default() += bucket;
        *self
            .by_altitude
            .entry((key.aircraft.clone(), key.altitude))
            .or_default() += bucket;
        *self
            .by_altitude_speed
            .entry((key.aircraft.clone(), key.altitude, key.speed))
            .or_default() += bucket;

        self.evaluated += 1;
        if !result.newton_converged {
            self.unconverged += 1;
        }
    }

    /// The first formation bucket in key order with the strictly highest mean.
    fn best_aircraft(&self) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for ((aircraft, _), bucket) in &self.by_formation {
            let Some(mean) = bucket.mean() else {
                continue;
            };
            match best {
                Some((_, top)) if mean <= top => {}
                _ => best = Some((aircraft.as_str(), mean)),
            }
        }
        best.map(|(aircraft, _)| aircraft.to_string())
    }

    pub fn finish(self) -> SweepSummary {
        let best_aircraft = self.best_aircraft();

        let mut by_formation: Vec<FormationSeries> = Vec::new();
        for ((aircraft, formation_size), bucket) in &self.by_formation {
            let Some(mean) = bucket.mean() else {
                continue;
            };
            if let Some(series) = by_formation
                .last_mut()
                .filter(|series| &series.aircraft == aircraft)
            {
                series.formation_sizes.push(*formation_size);
                series.coefficients.push(mean);
                continue;
            }
            by_formation.push(FormationSeries {
                aircraft: aircraft.clone(),
                formation_sizes: vec![*formation_size],
                coefficients: vec![mean],
            });
        }

        let by_weapon = self
            .by_weapon
            .iter()
            .filter_map(|((aircraft, weapon), bucket)| {
                Some(WeaponPairing {
                    aircraft: aircraft.clone(),
                    weapon: weapon.clone(),
                    coefficient: bucket.mean()?,
                    scenarios: bucket.count,
                })
            })
            .collect();

        let mut by_altitude = Vec::new();
        if let Some(best) = &best_aircraft {
            for ((aircraft, altitude), bucket) in &self.by_altitude {
                if aircraft != best {
                    continue;
                }
                let Some(coefficient) = bucket.mean() else {
                    continue;
                };
                let (speeds, coefficients) = self
                    .by_altitude_speed
                    .range((best.clone(), *altitude, 0)..=(best.clone(), *altitude, u32::MAX))
                    .filter_map(|((_, _, speed), bucket)| Some((*speed, bucket.mean()?)))
                    .unzip();
                by_altitude.push(AltitudeSeries {
                    altitude: *altitude,
                    coefficient,
                    speeds,
                    coefficients,
                });
            }
        }

        tracing::info!(
            "Reduced {} evaluated scenarios ({} skipped, {} unconverged), best aircraft: {:?}",
            self.evaluated,
            self.skipped,
            self.unconverged,
            best_aircraft
        );

        SweepSummary {
            by_formation,
            by_weapon,
            best_aircraft,
            by_altitude,
            evaluated: self.evaluated,
            skipped: self.skipped,
            unconverged: self.unconverged,
        }
    }
}

/// Fold every outcome and finalize the summary.
pub fn reduce<'a>(outcomes: impl IntoIterator<Item = &'a ScenarioOutcome>) -> SweepSummary {
    let mut reducer = Reducer::new();
    for outcome in outcomes {
        reducer.fold(outcome);
    }
    reducer.finish()
}
