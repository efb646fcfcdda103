//! Seeded generation of sample entity catalogs.
//!
//! Produces a small but complete catalog (several aircraft, weapons of both
//! warhead kinds, targets, defense systems and terrains) for demos and
//! tests. The same seed always yields the same catalog.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use envelope_core::entities::*;
use envelope_core::table::LookupTable;
use envelope_core::EntityCatalog;

/// Ranges (meters) at which detection and line-of-sight tables are sampled.
const TABLE_RANGES: [f64; 5] = [1_000.0, 4_000.0, 8_000.0, 14_000.0, 20_000.0];

const AIRCRAFT_NAMES: [&str; 3] = ["Falcon", "Flanker", "Raptor"];
const WEAPON_NAMES: [(&str, WarheadKind); 3] = [
    ("Maverick", WarheadKind::ShapedCharge),
    ("Kh-29", WarheadKind::Blast),
    ("Hellfire", WarheadKind::ShapedCharge),
];
const TARGET_NAMES: [&str; 2] = ["Bunker", "Radar Site"];
const DEFENSE_NAMES: [&str; 2] = ["Point Defense", "Area Defense"];
const TERRAIN_NAMES: [&str; 2] = ["Plains", "Hills"];

/// Generate a complete sample catalog from `seed`.
pub fn generate_catalog(seed: u64) -> EntityCatalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let aircraft = AIRCRAFT_NAMES
        .iter()
        .map(|name| generate_aircraft(&mut rng, name))
        .collect();
    let weapons = WEAPON_NAMES
        .iter()
        .map(|(name, warhead)| generate_weapon(&mut rng, name, *warhead))
        .collect();
    let targets = TARGET_NAMES
        .iter()
        .map(|name| generate_target(&mut rng, name))
        .collect();
    let defenses = DEFENSE_NAMES
        .iter()
        .map(|name| generate_defense(&mut rng, name))
        .collect();
    let terrains = TERRAIN_NAMES
        .iter()
        .map(|name| Terrain {
            name: name.to_string(),
            line_of_sight: falloff_table(&mut rng, 0.6..0.95),
        })
        .collect();

    EntityCatalog {
        aircraft: Some(aircraft),
        weapons: Some(weapons),
        targets: Some(targets),
        defenses: Some(defenses),
        terrains: Some(terrains),
    }
}

/// A probability table that starts in `start` at the shortest range and
/// decreases with distance, never reaching zero.
fn falloff_table(rng: &mut ChaCha8Rng, start: std::ops::Range<f64>) -> LookupTable {
    let mut probability: f64 = rng.gen_range(start);
    let points: Vec<(f64, f64)> = TABLE_RANGES
        .iter()
        .map(|&range| {
            let point = (range, probability);
            probability = (probability * rng.gen_range(0.6..0.9)).max(0.05);
            point
        })
        .collect();
    LookupTable::new(points)
}

fn generate_aircraft(rng: &mut ChaCha8Rng, name: &str) -> Aircraft {
    Aircraft {
        name: name.to_string(),
        detection: falloff_table(rng, 0.7..0.95),
        lateral_sigma: rng.gen_range(100.0..300.0_f64).round(),
        max_load_factor: rng.gen_range(5.0..9.0_f64).round(),
        aim_time: rng.gen_range(6.0..12.0_f64).round(),
        max_bank_angle: rng.gen_range(30.0..70.0_f64).round(),
        rockets: rng.gen_range(2..=8),
    }
}

fn generate_weapon(rng: &mut ChaCha8Rng, name: &str, warhead: WarheadKind) -> Weapon {
    let min_range: f64 = rng.gen_range(300.0..800.0_f64).round();
    Weapon {
        name: name.to_string(),
        warhead,
        min_range,
        max_range: min_range + rng.gen_range(5_000.0..15_000.0_f64).round(),
        mean_speed: rng.gen_range(250.0..1_000.0_f64).round(),
        // Cone angles above ~57 put the defense-optimal lead outside arcsine's domain.
        cone_angle: rng.gen_range(30.0..55.0_f64).round(),
    }
}

fn generate_target(rng: &mut ChaCha8Rng, name: &str) -> Target {
    Target {
        name: name.to_string(),
        span: rng.gen_range(4.0..30.0_f64).round(),
        depth: rng.gen_range(4.0..30.0_f64).round(),
        height: rng.gen_range(2.0..12.0_f64).round(),
        kill_radius: rng.gen_range(1.0..8.0_f64).round(),
        expected_hits: rng.gen_range(1..=3) as f64,
    }
}

fn generate_defense(rng: &mut ChaCha8Rng, name: &str) -> DefenseSystem {
    let battery_count = rng.gen_range(2..=4);
    let min_range: f64 = rng.gen_range(300.0..1_000.0_f64).round();
    DefenseSystem {
        name: name.to_string(),
        battery_count,
        interceptors_per_battery: rng.gen_range(2..=8),
        interceptor_speed: rng.gen_range(400.0..900.0_f64).round(),
        passive_time: rng.gen_range(2.0..8.0_f64).round(),
        handoff_time: rng.gen_range(1.0..5.0_f64).round(),
        reaction_time: rng.gen_range(5.0..15.0_f64).round(),
        battery_x: (0..battery_count)
            .map(|_| rng.gen_range(-2_000.0..2_000.0_f64).round())
            .collect(),
        battery_y: (0..battery_count)
            .map(|_| rng.gen_range(0.0..300.0_f64).round())
            .collect(),
        min_range,
        max_range: min_range + rng.gen_range(4_000.0..12_000.0_f64).round(),
        corridor_width: rng.gen_range(2_000.0..8_000.0_f64).round(),
        max_altitude: rng.gen_range(3_000.0..10_000.0_f64).round(),
        single_shot_kill: rng.gen_range(0.5..0.9),
        detection: falloff_table(rng, 0.75..0.95),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_catalog() {
        assert_eq!(generate_catalog(7), generate_catalog(7));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_catalog(1), generate_catalog(2));
    }

    #[test]
    fn test_catalog_is_complete_and_valid() {
        let catalog = generate_catalog(42);
        let view = catalog.complete().expect("all collections present");

        assert_eq!(view.aircraft.len(), AIRCRAFT_NAMES.len());
        assert_eq!(view.weapons.len(), WEAPON_NAMES.len());
        for aircraft in view.aircraft {
            aircraft.validate().unwrap();
        }
        for weapon in view.weapons {
            weapon.validate().unwrap();
            assert!(weapon.cone_angle < 57.0);
        }
        for target in view.targets {
            target.validate().unwrap();
        }
        for defense in view.defenses {
            defense.validate().unwrap();
            assert_eq!(defense.batteries().count(), defense.battery_count);
        }
        for terrain in view.terrains {
            terrain.validate().unwrap();
        }
    }

    #[test]
    fn test_both_warhead_kinds_present() {
        let catalog = generate_catalog(0);
        let weapons = catalog.weapons.unwrap();
        assert!(weapons.iter().any(|w| w.warhead == WarheadKind::Blast));
        assert!(weapons.iter().any(|w| w.warhead == WarheadKind::ShapedCharge));
    }

    #[test]
    fn test_tables_fall_off_with_range() {
        let catalog = generate_catalog(3);
        for terrain in catalog.terrains.unwrap() {
            let points = terrain.line_of_sight.points().collect::<Vec<_>>();
            assert_eq!(points.len(), TABLE_RANGES.len());
            for pair in points.windows(2) {
                assert!(pair[1].1 <= pair[0].1, "{}: {:?}", terrain.name, pair);
                assert!(pair[1].1 > 0.0);
            }
        }
    }
}
