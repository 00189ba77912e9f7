/// Tunable game constants.
///
/// `GameConfig::default()` is the canonical game.  A TOML file named by
/// `WAVE_SHOOTER_CONFIG` may override any subset of fields.

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{GameError, Result};

/// Environment variable naming an optional TOML override file.
pub const CONFIG_ENV: &str = "WAVE_SHOOTER_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen & pacing ──────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: i32,
    pub player_height: i32,
    pub player_start_x: i32,
    pub player_speed: i32,
    pub player_health: i32,
    /// How long a power-up keeps the player invincible.
    pub invincibility_secs: u32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_speed: i32,
    /// Gap kept free under the lowest possible spawn row.
    pub spawn_margin: i32,
    /// Hard cap on live enemies regardless of wave size.
    pub max_enemies: usize,
    pub enemy_spawn_interval: u32,
    pub enemies_first_wave: u32,
    /// Waves that are a multiple of this may field one special enemy.
    pub special_wave_interval: u32,
    pub special_enemy_chance: f64,
    /// Damage dealt when an enemy slips past the left edge.
    pub breach_damage: i32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_speed: i32,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub power_up_size: i32,
    pub power_up_speed: i32,
    pub power_up_spawn_interval: u32,
    pub power_up_chance: f64,
    /// At most one power-up per this many waves reached.
    pub waves_per_power_up: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fps: 60,

            player_width: 50,
            player_height: 60,
            player_start_x: 50,
            player_speed: 5,
            player_health: 100,
            invincibility_secs: 15,

            enemy_width: 50,
            enemy_height: 50,
            enemy_speed: 2,
            spawn_margin: 10,
            max_enemies: 5,
            enemy_spawn_interval: 30,
            enemies_first_wave: 3,
            special_wave_interval: 5,
            special_enemy_chance: 0.5,
            breach_damage: 10,

            bullet_width: 5,
            bullet_height: 5,
            bullet_speed: 10,

            power_up_size: 30,
            power_up_speed: 2,
            power_up_spawn_interval: 300,
            power_up_chance: 0.1,
            waves_per_power_up: 4,
        }
    }
}

impl GameConfig {
    /// Frames of invincibility granted by one power-up.
    pub fn invincibility_frames(&self) -> u32 {
        self.invincibility_secs * self.fps
    }

    /// Lowest y an enemy may spawn at (inclusive).
    pub fn enemy_spawn_max_y(&self) -> i32 {
        self.screen_height - self.enemy_height - self.spawn_margin
    }

    pub fn power_up_spawn_max_y(&self) -> i32 {
        self.screen_height - self.power_up_size - self.spawn_margin
    }

    /// Parse a (possibly partial) TOML override and validate the result.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, or the file named by `WAVE_SHOOTER_CONFIG` when it is set.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = Path::new(&path);
                info!("loading config from {}", path.display());
                Self::from_file(path)
            }
            None => {
                info!("using built-in config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("player_health", self.player_health),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_speed", self.enemy_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("power_up_size", self.power_up_size),
            ("power_up_speed", self.power_up_speed),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(GameError::InvalidConfig(format!("{name} must be positive")));
        }

        let nonzero = [
            ("fps", self.fps),
            ("enemy_spawn_interval", self.enemy_spawn_interval),
            ("enemies_first_wave", self.enemies_first_wave),
            ("special_wave_interval", self.special_wave_interval),
            ("power_up_spawn_interval", self.power_up_spawn_interval),
            ("waves_per_power_up", self.waves_per_power_up),
        ];
        if let Some((name, _)) = nonzero.iter().find(|(_, v)| *v == 0) {
            return Err(GameError::InvalidConfig(format!("{name} must be non-zero")));
        }

        if self.max_enemies == 0 {
            return Err(GameError::InvalidConfig("max_enemies must be non-zero".into()));
        }
        if self.spawn_margin < 0 || self.enemy_spawn_max_y() < 0 || self.power_up_spawn_max_y() < 0 {
            return Err(GameError::InvalidConfig(
                "spawn range does not fit the screen height".into(),
            ));
        }
        if self.player_height > self.screen_height {
            return Err(GameError::InvalidConfig("player taller than the screen".into()));
        }
        for (name, p) in [
            ("special_enemy_chance", self.special_enemy_chance),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!("{name} must be within [0, 1]")));
            }
        }
        Ok(())
    }
}
