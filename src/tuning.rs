//! Gameplay tuning
//!
//! Every balance constant of the simulation lives in [`Tuning`]. Defaults are
//! the values the game shipped with; a JSON file can override any subset of
//! them because missing keys fall back to [`Tuning::default`].
//!
//! Units: distances in world units (pixels), speeds in units per tick, angles
//! in degrees, durations in ticks.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HEALTH;

/// Errors raised while loading or validating tuning and layout data
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid JSON for the expected shape
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config JSON: {e}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ship ===
    pub player_max_speed: f32,
    /// Speed gained per tick while thrust is held (coasting decays at half this)
    pub player_acceleration: f32,
    /// Degrees per tick while a turn key is held
    pub player_turn_rate: f32,
    pub player_radius: f32,
    pub player_max_health: u32,
    pub player_fire_cooldown: u32,

    // === Enemy ships ===
    pub enemy_speed: f32,
    /// Max degrees per tick while steering toward the patrol heading
    pub enemy_turn_rate: f32,
    pub enemy_radius: f32,
    pub enemy_fire_cooldown: u32,
    /// Per-tick probability that an enemy attempts to fire
    pub enemy_fire_chance: f64,
    /// Ticks between random patrol heading changes
    pub enemy_retarget_ticks: u32,

    // === Cannonballs ===
    pub cannonball_speed: f32,
    pub cannonball_radius: f32,
    /// Spawn distance past the firing ship's hull
    pub muzzle_offset: f32,
    pub cannonball_damage: u32,

    // === Treasure ===
    pub treasure_radius: f32,
    /// Extra reach added to the treasure radius for pickup
    pub treasure_pickup_margin: f32,

    // === Scoring ===
    pub enemy_reward: u64,
    pub treasure_reward: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 1200.0,
            world_height: 800.0,

            player_max_speed: 4.0,
            player_acceleration: 0.2,
            player_turn_rate: 3.0,
            player_radius: 30.0,
            player_max_health: MAX_HEALTH,
            player_fire_cooldown: 30, // half a second

            enemy_speed: 2.0,
            enemy_turn_rate: 2.0,
            enemy_radius: 25.0,
            enemy_fire_cooldown: 90,
            enemy_fire_chance: 0.02,
            enemy_retarget_ticks: 120, // two seconds

            cannonball_speed: 8.0,
            cannonball_radius: 5.0,
            muzzle_offset: 10.0,
            cannonball_damage: 10,

            treasure_radius: 15.0,
            treasure_pickup_margin: 10.0,

            enemy_reward: 100,
            treasure_reward: 50,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every value is inside the range the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a non-negative finite number",
                })
            }
        }

        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;

        positive("player_max_speed", self.player_max_speed)?;
        positive("player_acceleration", self.player_acceleration)?;
        non_negative("player_turn_rate", self.player_turn_rate)?;
        positive("player_radius", self.player_radius)?;
        if self.player_max_health == 0 || self.player_max_health > MAX_HEALTH {
            return Err(ConfigError::Invalid {
                field: "player_max_health",
                reason: "must be between 1 and 100",
            });
        }

        non_negative("enemy_speed", self.enemy_speed)?;
        non_negative("enemy_turn_rate", self.enemy_turn_rate)?;
        positive("enemy_radius", self.enemy_radius)?;
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(ConfigError::Invalid {
                field: "enemy_fire_chance",
                reason: "must be a probability in [0, 1]",
            });
        }

        positive("cannonball_speed", self.cannonball_speed)?;
        positive("cannonball_radius", self.cannonball_radius)?;
        non_negative("muzzle_offset", self.muzzle_offset)?;

        positive("treasure_radius", self.treasure_radius)?;
        non_negative("treasure_pickup_margin", self.treasure_pickup_margin)?;

        if 2.0 * self.player_radius >= self.world_width.min(self.world_height) {
            return Err(ConfigError::Invalid {
                field: "player_radius",
                reason: "ship does not fit inside the world",
            });
        }

        Ok(())
    }

    /// Slowest (most negative) player speed; reverse is capped at half forward speed
    #[inline]
    pub fn player_min_speed(&self) -> f32 {
        -self.player_max_speed / 2.0
    }
}
