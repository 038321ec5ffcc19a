use std::fs;

use sky_assault::config::GameConfig;
use sky_assault::error::ConfigError;
use tempfile::tempdir;

#[test]
fn defaults_are_valid() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults_for_missing_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, r#"{ "contact_damage": 35, "powerup_drop_chance": 0.5 }"#).unwrap();

    let config = GameConfig::from_file(&path).unwrap();

    assert_eq!(config.contact_damage, 35);
    assert_eq!(config.powerup_drop_chance, 0.5);
    let defaults = GameConfig::default();
    assert_eq!(config.enemy_bullet_damage, defaults.enemy_bullet_damage);
    assert_eq!(config.stage_duration_ms, defaults.stage_duration_ms);
    assert_eq!(config.field_width, defaults.field_width);
}

#[test]
fn explicit_path_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, r#"{ "enemy_score": 250 }"#).unwrap();

    let config = GameConfig::load(Some(&path)).unwrap();
    assert_eq!(config.enemy_score, 250);
}

#[test]
fn out_of_range_chance_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, r#"{ "powerup_drop_chance": 1.5 }"#).unwrap();

    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "powerup_drop_chance",
            ..
        }
    ));
}

#[test]
fn non_positive_sizes_are_rejected() {
    let config = GameConfig {
        field_width: 0.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid {
            field: "field_width",
            ..
        })
    ));

    let config = GameConfig {
        enemy_fire_rate: -1.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid {
            field: "enemy_fire_rate",
            ..
        })
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, "{ contact_damage: ").unwrap();

    let err = GameConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("game.json"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = GameConfig::from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
