//! Tests for catalog parsing, record validation, and sweep configuration.

use crate::catalog::EntityCatalog;
use crate::config::{SweepConfig, SweepRange};
use crate::entities::*;
use crate::error::{EngineError, TableKind};
use crate::scenario::{ScenarioKey, ScenarioOutcome};
use crate::table::LookupTable;

const CATALOG_JSON: &str = r#"{
    "aircraft": [{
        "name": "Striker",
        "detection": [[4000, 0.6], [1000, 0.8], [20000, 0.1]],
        "lateral_sigma": 500,
        "max_load_factor": 5,
        "aim_time": 10,
        "max_bank_angle": 60,
        "rockets": 4
    }],
    "weapons": [{
        "name": "Hammer",
        "warhead": "blast",
        "min_range": 500,
        "max_range": 8000,
        "mean_speed": 300,
        "cone_angle": 45
    }],
    "targets": [{
        "name": "Depot",
        "span": 5,
        "depth": 4,
        "height": 3,
        "kill_radius": 2,
        "expected_hits": 2
    }],
    "defenses": [{
        "name": "Layered",
        "battery_count": 2,
        "interceptors_per_battery": 4,
        "interceptor_speed": 400,
        "passive_time": 5,
        "handoff_time": 3,
        "reaction_time": 10,
        "battery_x": [0, 200],
        "battery_y": [0, 150],
        "min_range": 500,
        "max_range": 6000,
        "corridor_width": 5000,
        "max_altitude": 5000,
        "single_shot_kill": 0.8,
        "detection": [[1000, 0.9], [8000, 0.7], [20000, 0.5]]
    }],
    "terrains": [{
        "name": "Hills",
        "line_of_sight": [[1000, 0.9], [8000, 0.7], [20000, 0.5]]
    }]
}"#;

fn parsed_catalog() -> EntityCatalog {
    EntityCatalog::from_json(CATALOG_JSON).expect("catalog should parse")
}

// ---- Catalog ----

#[test]
fn test_catalog_parses_and_sorts_tables() {
    let catalog = parsed_catalog();
    let view = catalog.complete().expect("all collections present");
    assert_eq!(view.aircraft.len(), 1);
    assert_eq!(view.weapons[0].warhead, WarheadKind::Blast);

    let xs: Vec<f64> = view.aircraft[0].detection.points().map(|(x, _)| x).collect();
    assert_eq!(xs, vec![1000.0, 4000.0, 20000.0]);

    for aircraft in view.aircraft {
        aircraft.validate().unwrap();
    }
    for defense in view.defenses {
        defense.validate().unwrap();
    }
}

#[test]
fn test_catalog_missing_collection_is_incomplete() {
    let mut catalog = parsed_catalog();
    catalog.terrains = None;
    assert!(catalog.complete().is_none());
    assert_eq!(catalog.missing_collections(), vec!["terrains"]);

    let empty = EntityCatalog::from_json("{}").unwrap();
    assert_eq!(empty.missing_collections().len(), 5);
}

#[test]
fn test_catalog_empty_collection_is_still_complete() {
    let mut catalog = parsed_catalog();
    catalog.weapons = Some(Vec::new());
    let view = catalog.complete().expect("empty but present");
    assert!(view.weapons.is_empty());
}

#[test]
fn test_catalog_rejects_malformed_json() {
    assert!(EntityCatalog::from_json("{\"aircraft\": 3}").is_err());
}

// ---- Validation ----

#[test]
fn test_aircraft_load_factor_must_exceed_one() {
    let catalog = parsed_catalog();
    let mut aircraft = catalog.aircraft.unwrap().remove(0);
    aircraft.max_load_factor = 1.0;
    let err = aircraft.validate().unwrap_err();
    assert!(
        matches!(err, EngineError::InvalidEntity { entity: "aircraft", .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn test_defense_battery_arrays_must_cover_count() {
    let catalog = parsed_catalog();
    let mut defense = catalog.defenses.unwrap().remove(0);
    defense.battery_count = 3;
    assert!(defense.validate().is_err());

    defense.battery_count = 1;
    defense.validate().unwrap();
    assert_eq!(defense.batteries().collect::<Vec<_>>(), vec![(0.0, 0.0)]);
}

#[test]
fn test_terrain_table_must_be_probabilities() {
    let terrain = Terrain {
        name: "Bad".to_string(),
        line_of_sight: LookupTable::new([(100.0, 1.5)]),
    };
    assert!(terrain.validate().is_err());

    let empty = Terrain {
        name: "Empty".to_string(),
        line_of_sight: LookupTable::default(),
    };
    assert!(empty.validate().is_err());
}

#[test]
fn test_target_expected_hits_must_be_positive() {
    let catalog = parsed_catalog();
    let mut target = catalog.targets.unwrap().remove(0);
    target.expected_hits = 0.0;
    assert!(target.validate().is_err());
}

// ---- Sweep configuration ----

#[test]
fn test_default_sweep_ranges() {
    let config = SweepConfig::default();
    config.validate().unwrap();
    assert_eq!(config.formation.values(), vec![1, 2, 3, 4, 5]);
    assert_eq!(config.speed.values(), vec![100, 150, 200, 250, 300]);
    assert_eq!(
        config.altitude.values(),
        vec![50, 100, 150, 200, 250, 300, 350, 400, 450]
    );
}

#[test]
fn test_lateral_offsets_exclude_upper_bound() {
    let config = SweepConfig::default();
    let offsets = config.lateral_offsets(500.0);
    assert_eq!(offsets.first(), Some(&-1500));
    assert_eq!(offsets.last(), Some(&1400));
    assert_eq!(offsets.len(), 30);
    assert!(offsets.contains(&0));
}

#[test]
fn test_lateral_offsets_truncate_toward_zero() {
    let config = SweepConfig::default();
    // ±3 · 1.5 = ±4.5, truncated to -4 .. 4 with a 100 m step.
    assert_eq!(config.lateral_offsets(1.5), vec![-4]);
    assert!(config.lateral_offsets(0.0).is_empty());
}

#[test]
fn test_zero_step_config_is_rejected() {
    let config = SweepConfig {
        speed: SweepRange::new(100, 300, 0),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(EngineError::InvalidConfig { .. })
    ));
    assert!(config.speed.values().is_empty());
}

#[test]
fn test_partial_config_json_uses_defaults() {
    let config: SweepConfig =
        serde_json::from_str(r#"{"parallel": false, "lateral_step": 250}"#).unwrap();
    assert!(!config.parallel);
    assert_eq!(config.lateral_step, 250);
    assert_eq!(config.speed, SweepConfig::default().speed);
}

// ---- Outcomes ----

#[test]
fn test_failed_outcome_serializes_with_error_kind() {
    let outcome = ScenarioOutcome::Failed {
        key: ScenarioKey {
            aircraft: "Striker".to_string(),
            target: "Depot".to_string(),
            weapon: "Hammer".to_string(),
            defense: "Layered".to_string(),
            terrain: "Hills".to_string(),
            formation_size: 1,
            speed: 100,
            altitude: 50,
            lateral_offset: 0,
        },
        error: EngineError::MissingTableValue {
            table: TableKind::TerrainLineOfSight,
            query: 12.5,
        },
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["error"]["kind"], "missing_table_value");
    assert_eq!(json["error"]["table"], "terrain_line_of_sight");
    assert!(outcome.result().is_none());
    assert_eq!(outcome.key().aircraft, "Striker");
}
