#![allow(missing_docs)]

use std::path::PathBuf;

use evoflock::simulation::error::{ConfigError, ParamsFileError};
use evoflock::simulation::params::Params;
use evoflock::simulation::predator::PredatorType;
use evoflock::simulation::prey::CreatureType;
use evoflock::simulation::selection::SelectionMethod;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("evoflock_{}_{name}.json", std::process::id()));
    std::fs::write(&path, contents).expect("temp dir is writable");
    path
}

#[test]
fn test_defaults_are_valid() {
    let params = Params::default();
    assert_eq!(params.validate(), Ok(()));
    assert_eq!(params.genotype_length(), 64);
}

#[test]
fn test_extended_genotype_length() {
    let params = Params {
        num_eyes: 4,
        creature_type: CreatureType::Extended,
        ..Params::default()
    };
    assert_eq!(params.genotype_length(), 16 + params.extended_traits);
}

#[test]
fn test_load_partial_json_uses_defaults() {
    let path = write_temp(
        "partial",
        r#"{ "num_creatures": 12, "selection_method": "tournament", "predator_type": "advanced" }"#,
    );
    let params = Params::from_json_file(&path).expect("valid params file");
    let _ = std::fs::remove_file(&path);

    assert_eq!(params.num_creatures, 12);
    assert_eq!(params.selection_method, SelectionMethod::Tournament);
    assert_eq!(params.predator_type, PredatorType::Advanced);
    assert_eq!(params.num_eyes, Params::default().num_eyes);
    assert!(!params.bounded);
}

#[test]
fn test_params_json_roundtrip() {
    let params = Params {
        bounded: true,
        selection_method: SelectionMethod::Rank,
        ..Params::default()
    };
    let json = serde_json::to_string(&params).expect("serializable");
    assert!(json.contains(r#""selection_method":"rank""#));
    let back: Params = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, params);
}

#[test]
fn test_unknown_selection_method_fails_to_load() {
    let path = write_temp("unknown", r#"{ "selection_method": "roulette" }"#);
    let result = Params::from_json_file(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(ParamsFileError::Json(_))));
}

#[test]
fn test_invalid_values_fail_validation_on_load() {
    let path = write_temp("too_few", r#"{ "num_creatures": 2 }"#);
    let result = Params::from_json_file(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(ParamsFileError::Config(ConfigError::TooFewCreatures { min: 3, actual: 2 }))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("evoflock_definitely_missing_params.json");
    assert!(matches!(
        Params::from_json_file(&path),
        Err(ParamsFileError::Io(_))
    ));
}

#[test]
fn test_validation_rules() {
    let base = Params::default();

    let negative_speed = Params {
        creature_speed: -0.1,
        ..base.clone()
    };
    assert!(matches!(
        negative_speed.validate(),
        Err(ConfigError::Negative {
            field: "creature_speed",
            ..
        })
    ));

    let zero_diameter = Params {
        creature_diameter: 0.0,
        ..base.clone()
    };
    assert!(matches!(
        zero_diameter.validate(),
        Err(ConfigError::NonPositive { .. })
    ));

    let wild_blend = Params {
        randomness_factor: 1.5,
        ..base.clone()
    };
    assert_eq!(
        wild_blend.validate(),
        Err(ConfigError::RandomnessFactor(1.5))
    );

    // thresholds only matter for the advanced predator
    let zero_threshold = Params {
        evolution_threshold: 0,
        ..base.clone()
    };
    assert_eq!(zero_threshold.validate(), Ok(()));
    let advanced = Params {
        predator_type: PredatorType::Advanced,
        ..zero_threshold
    };
    assert_eq!(advanced.validate(), Err(ConfigError::EvolutionThreshold));

    // tournament size only matters for tournament selection
    let big_tournament = Params {
        tournament_size: 500,
        ..base
    };
    assert_eq!(big_tournament.validate(), Ok(()));
}
