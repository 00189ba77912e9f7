use std::io::Write;

use wave_shooter::config::GameConfig;
use wave_shooter::error::GameError;

#[test]
fn defaults_describe_the_classic_game() {
    let c = GameConfig::default();
    assert_eq!((c.screen_width, c.screen_height), (800, 600));
    assert_eq!(c.fps, 60);
    assert_eq!(c.max_enemies, 5);
    assert_eq!(c.enemy_spawn_interval, 30);
    assert_eq!(c.power_up_spawn_interval, 300);
    assert_eq!(c.invincibility_frames(), 900);
    assert_eq!(c.enemy_spawn_max_y(), 540);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let c = GameConfig::from_toml_str("fps = 30\nmax_enemies = 8\n").unwrap();
    assert_eq!(c.fps, 30);
    assert_eq!(c.max_enemies, 8);
    assert_eq!(c.invincibility_frames(), 450);
    assert_eq!(c.screen_width, 800);
    assert_eq!(c.player_health, 100);
}

#[test]
fn empty_toml_is_the_default() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("fps = \"fast\"").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn zero_speed_is_rejected() {
    let err = GameConfig::from_toml_str("enemy_speed = 0").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
    assert!(err.to_string().contains("enemy_speed"));
}

#[test]
fn chance_outside_unit_range_is_rejected() {
    let err = GameConfig::from_toml_str("power_up_chance = 1.5").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn screen_too_short_for_enemies_is_rejected() {
    let err = GameConfig::from_toml_str("screen_height = 55").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn zero_waves_per_power_up_is_rejected() {
    let err = GameConfig::from_toml_str("waves_per_power_up = 0").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "player_speed = 8").unwrap();
    writeln!(file, "breach_damage = 25").unwrap();

    let c = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(c.player_speed, 8);
    assert_eq!(c.breach_damage, 25);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
}
