//! Initial entity placement
//!
//! A [`Layout`] says where things start. It is separate from [`Tuning`] so the
//! same balance values can be played on different maps.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Island;
use crate::tuning::{ConfigError, Tuning};

/// A map file must name the player spawn. Omitted lists are empty, not
/// taken from the classic map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub player_spawn: Vec2,
    #[serde(default)]
    pub islands: Vec<Island>,
    #[serde(default)]
    pub enemy_spawns: Vec<Vec2>,
    #[serde(default)]
    pub treasure_spawns: Vec<Vec2>,
}

impl Default for Layout {
    /// The classic 1200x800 map
    fn default() -> Self {
        Self {
            player_spawn: Vec2::new(600.0, 250.0),
            islands: vec![
                Island::new(200.0, 150.0, 80.0),
                Island::new(900.0, 200.0, 100.0),
                Island::new(300.0, 600.0, 60.0),
                Island::new(800.0, 650.0, 90.0),
                Island::new(600.0, 400.0, 70.0),
            ],
            enemy_spawns: vec![
                Vec2::new(400.0, 200.0),
                Vec2::new(800.0, 400.0),
                Vec2::new(300.0, 500.0),
                Vec2::new(1000.0, 600.0),
            ],
            treasure_spawns: vec![
                Vec2::new(150.0, 100.0),
                Vec2::new(950.0, 150.0),
                Vec2::new(250.0, 650.0),
                Vec2::new(850.0, 700.0),
                Vec2::new(550.0, 350.0),
                Vec2::new(100.0, 400.0),
                Vec2::new(1100.0, 500.0),
            ],
        }
    }
}

impl Layout {
    /// Open sea with only the player, for tests and sandboxes
    pub fn empty(player_spawn: Vec2) -> Self {
        Self {
            player_spawn,
            islands: Vec::new(),
            enemy_spawns: Vec::new(),
            treasure_spawns: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the layout fits the world described by `tuning`
    pub fn validate(&self, tuning: &Tuning) -> Result<(), ConfigError> {
        let inside = |p: Vec2| {
            p.x >= 0.0 && p.x <= tuning.world_width && p.y >= 0.0 && p.y <= tuning.world_height
        };

        if !inside(self.player_spawn) {
            return Err(ConfigError::Invalid {
                field: "player_spawn",
                reason: "outside the world",
            });
        }
        if self
            .islands
            .iter()
            .any(|i| !(i.radius.is_finite() && i.radius > 0.0))
        {
            return Err(ConfigError::Invalid {
                field: "islands",
                reason: "island radius must be positive",
            });
        }
        if !self.enemy_spawns.iter().all(|&p| inside(p)) {
            return Err(ConfigError::Invalid {
                field: "enemy_spawns",
                reason: "outside the world",
            });
        }
        if !self.treasure_spawns.iter().all(|&p| inside(p)) {
            return Err(ConfigError::Invalid {
                field: "treasure_spawns",
                reason: "outside the world",
            });
        }
        Ok(())
    }
}
