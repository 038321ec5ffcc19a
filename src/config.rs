/// Gameplay tunables.
///
/// Everything that is a plain number and not part of the stage or boss tables
/// lives here.  A JSON file may override any subset of fields; missing fields
/// keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SKY_ASSAULT_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    /// A stage ends after this long even if its kill quota is unmet.
    pub stage_duration_ms: f32,
    /// A boss always appears once the run has lasted this long.
    pub boss_fallback_ms: f32,

    pub effect_duration_ms: f32,
    pub powerup_drop_chance: f64,
    pub health_pickup_amount: u32,

    /// Expected shots per second from each regular enemy.
    pub enemy_fire_rate: f64,
    pub enemy_bullet_damage: u32,
    pub contact_damage: u32,

    pub enemy_score: u32,
    pub enemy_exp: u32,
    pub boss_score: u32,
    pub boss_exp: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 900.0,
            field_height: 700.0,
            stage_duration_ms: 45_000.0,
            boss_fallback_ms: 30_000.0,
            effect_duration_ms: 5_000.0,
            powerup_drop_chance: 0.2,
            health_pickup_amount: 30,
            enemy_fire_rate: 0.18,
            enemy_bullet_damage: 10,
            contact_damage: 20,
            enemy_score: 100,
            enemy_exp: 10,
            boss_score: 1_000,
            boss_exp: 100,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from `$SKY_ASSAULT_CONFIG`,
    /// otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(p) => Self::from_file(Path::new(&p)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {v}"),
                })
            }
        }
        fn probability(field: &'static str, v: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within 0..=1, got {v}"),
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("stage_duration_ms", self.stage_duration_ms)?;
        positive("boss_fallback_ms", self.boss_fallback_ms)?;
        positive("effect_duration_ms", self.effect_duration_ms)?;
        probability("powerup_drop_chance", self.powerup_drop_chance)?;
        if !(self.enemy_fire_rate.is_finite() && self.enemy_fire_rate >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "enemy_fire_rate",
                reason: format!("must be non-negative, got {}", self.enemy_fire_rate),
            });
        }
        Ok(())
    }
}
