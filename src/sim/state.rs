//! World state and core simulation types
//!
//! The [`World`] exclusively owns every entity collection. Entities never hold
//! references to the world or to each other; collision code compares them by
//! position and radius only.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{circle_contains, distance};
use super::layout::Layout;
use crate::tuning::{ConfigError, Tuning};
use crate::{heading_vector, normalize_degrees};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Input accepted, entities update
    Running,
    /// Player ship sunk; terminal
    Ended,
}

/// Which fleet an entity belongs to. Cannonballs carry the side that fired them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The side this one's cannonballs are allowed to hit
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Enemy patrol AI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolState {
    /// Steering toward a randomly chosen heading
    Cruising,
    /// Turning around after running into the world edge or an island
    Reversing,
}

/// Kind-specific ship data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShipKind {
    Player {
        /// 0..=100; the session ends at 0
        health: u32,
    },
    Enemy {
        /// Heading (degrees) the patrol AI is steering toward
        target_heading: f32,
        /// Ticks since the last random retarget
        patrol_ticks: u32,
        patrol: PatrolState,
    },
}

/// A ship. Player and enemy share geometry and diverge only in [`ShipKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: u32,
    pub kind: ShipKind,
    pub pos: Vec2,
    /// Degrees, 0 = +x, counter-clockwise
    pub heading: f32,
    /// Units per tick along the heading (negative when reversing)
    pub speed: f32,
    pub radius: f32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
}

impl Ship {
    pub fn new_player(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: ShipKind::Player {
                health: tuning.player_max_health,
            },
            pos,
            heading: 0.0,
            speed: 0.0,
            radius: tuning.player_radius,
            fire_cooldown: 0,
        }
    }

    pub fn new_enemy(id: u32, pos: Vec2, heading: f32, tuning: &Tuning) -> Self {
        let heading = normalize_degrees(heading);
        Self {
            id,
            kind: ShipKind::Enemy {
                target_heading: heading,
                patrol_ticks: 0,
                patrol: PatrolState::Cruising,
            },
            pos,
            heading,
            speed: tuning.enemy_speed,
            radius: tuning.enemy_radius,
            fire_cooldown: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        match self.kind {
            ShipKind::Player { .. } => Side::Player,
            ShipKind::Enemy { .. } => Side::Enemy,
        }
    }

    /// Player health, `None` for enemies (they have no health pool)
    #[inline]
    pub fn health(&self) -> Option<u32> {
        match self.kind {
            ShipKind::Player { health } => Some(health),
            ShipKind::Enemy { .. } => None,
        }
    }

    /// Apply damage with a clamp at zero. Returns the remaining health, or
    /// `None` for enemies.
    pub fn take_damage(&mut self, damage: u32) -> Option<u32> {
        match &mut self.kind {
            ShipKind::Player { health } => {
                *health = health.saturating_sub(damage);
                Some(*health)
            }
            ShipKind::Enemy { .. } => None,
        }
    }

    /// True if `point` lies inside the hull circle
    #[inline]
    pub fn hull_contains(&self, point: Vec2) -> bool {
        circle_contains(self.pos, self.radius, point)
    }

    /// Where a cannonball fired right now would appear
    #[inline]
    pub fn muzzle_position(&self, muzzle_offset: f32) -> Vec2 {
        self.pos + heading_vector(self.heading) * (self.radius + muzzle_offset)
    }
}

/// A cannonball. Its heading is fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannonball {
    pub id: u32,
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub radius: f32,
    pub fired_by: Side,
}

impl Cannonball {
    /// Whether this ball may hit a ship on `side`
    #[inline]
    pub fn can_hit(&self, side: Side) -> bool {
        self.fired_by.opponent() == side
    }
}

/// Static circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub pos: Vec2,
    pub radius: f32,
}

impl Island {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius,
        }
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        circle_contains(self.pos, self.radius, point)
    }
}

/// Collectible treasure chest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

impl Treasure {
    /// True if a ship centred at `point` is close enough to collect this
    #[inline]
    pub fn in_reach(&self, point: Vec2, margin: f32) -> bool {
        distance(self.pos, point) < self.radius + margin
    }
}

/// Discrete notifications for audio/UI layers. Nothing in the simulation
/// depends on them being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CannonFired { side: Side, id: u32 },
    EnemyDestroyed { id: u32, pos: Vec2 },
    PlayerHit { damage: u32, health: u32 },
    TreasureCollected { id: u32, pos: Vec2 },
    GameEnded { score: u64, enemies_destroyed: u32 },
}

/// Everything needed to build a world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    pub tuning: Tuning,
    pub layout: Layout,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct World {
    /// Balance values this world was built with
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Enemy AI randomness (retargets, fire trials)
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Ship,
    /// Enemy ships (sorted by id)
    pub enemies: Vec<Ship>,
    /// Cannonballs in flight (sorted by id)
    pub cannonballs: Vec<Cannonball>,
    pub islands: Vec<Island>,
    /// Uncollected treasure (sorted by id)
    pub treasures: Vec<Treasure>,
    pub score: u64,
    pub enemies_destroyed: u32,
    pub treasures_collected: u32,
    next_id: u32,
}

impl World {
    /// Build a world from a layout. Enemy starting headings come from the
    /// seeded RNG, so the same config and seed always give the same world.
    ///
    /// Both halves of the config are validated first; a world that exists
    /// can always be ticked.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        let WorldConfig { tuning, layout } = config;
        tuning.validate()?;
        layout.validate(&tuning)?;

        let mut rng = Pcg32::seed_from_u64(seed);

        let mut next_id = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let player = Ship::new_player(alloc(), layout.player_spawn, &tuning);

        let enemies = layout
            .enemy_spawns
            .iter()
            .map(|&pos| {
                let heading = rng.random_range(0..360) as f32;
                Ship::new_enemy(alloc(), pos, heading, &tuning)
            })
            .collect();

        let treasures = layout
            .treasure_spawns
            .iter()
            .map(|&pos| Treasure {
                id: alloc(),
                pos,
                radius: tuning.treasure_radius,
            })
            .collect();

        log::debug!(
            "World created: seed={} islands={} enemies={} treasures={}",
            seed,
            layout.islands.len(),
            layout.enemy_spawns.len(),
            layout.treasure_spawns.len()
        );

        Ok(Self {
            tuning,
            seed,
            rng,
            time_ticks: 0,
            phase: GamePhase::Running,
            player,
            enemies,
            cannonballs: Vec::new(),
            islands: layout.islands,
            treasures,
            score: 0,
            enemies_destroyed: 0,
            treasures_collected: 0,
            next_id,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn player_health(&self) -> u32 {
        self.player.health().unwrap_or(0)
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|s| s.id);
        self.cannonballs.sort_by_key(|c| c.id);
        self.treasures.sort_by_key(|t| t.id);
    }

    /// Read-only view for presentation layers
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.time_ticks,
            phase: self.phase,
            width: self.tuning.world_width,
            height: self.tuning.world_height,
            player: self.player.clone(),
            health: self.player_health(),
            enemies: self.enemies.clone(),
            cannonballs: self.cannonballs.clone(),
            islands: self.islands.clone(),
            treasures: self.treasures.clone(),
            score: self.score,
            enemies_destroyed: self.enemies_destroyed,
            treasures_collected: self.treasures_collected,
        }
    }
}

/// Serializable copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub player: Ship,
    pub health: u32,
    pub enemies: Vec<Ship>,
    pub cannonballs: Vec<Cannonball>,
    pub islands: Vec<Island>,
    pub treasures: Vec<Treasure>,
    pub score: u64,
    pub enemies_destroyed: u32,
    pub treasures_collected: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_from_default_layout() {
        let world = World::new(WorldConfig::default(), 42).expect("default config");
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.player_health(), 100);
        assert_eq!(world.islands.len(), 5);
        assert_eq!(world.enemies.len(), 4);
        assert_eq!(world.treasures.len(), 7);
        assert!(world.cannonballs.is_empty());

        // IDs are unique and ascending
        let mut ids: Vec<u32> = std::iter::once(world.player.id)
            .chain(world.enemies.iter().map(|s| s.id))
            .chain(world.treasures.iter().map(|t| t.id))
            .collect();
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_same_seed_same_enemy_headings() {
        let a = World::new(WorldConfig::default(), 7).expect("default config");
        let b = World::new(WorldConfig::default(), 7).expect("default config");
        let headings_a: Vec<f32> = a.enemies.iter().map(|s| s.heading).collect();
        let headings_b: Vec<f32> = b.enemies.iter().map(|s| s.heading).collect();
        assert_eq!(headings_a, headings_b);
    }

    #[test]
    fn test_rejects_out_of_range_fire_chance() {
        let config: WorldConfig = serde_json::from_str(
            r#"{
                "tuning": { "enemy_fire_chance": 1.5 },
                "layout": { "player_spawn": [600.0, 250.0] }
            }"#,
        )
        .expect("well-formed JSON");
        let err = World::new(config, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy_fire_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_ship_larger_than_world() {
        let config = WorldConfig {
            tuning: Tuning {
                player_radius: 500.0,
                ..Default::default()
            },
            layout: Layout::default(),
        };
        let err = World::new(config, 1).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "player_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_layout_outside_world() {
        let mut layout = Layout::default();
        layout.enemy_spawns.push(Vec2::new(-50.0, 400.0));
        let config = WorldConfig {
            tuning: Tuning::default(),
            layout,
        };
        assert!(matches!(
            World::new(config, 1),
            Err(ConfigError::Invalid {
                field: "enemy_spawns",
                ..
            })
        ));
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let tuning = Tuning::default();
        let mut ship = Ship::new_player(1, Vec2::ZERO, &tuning);
        assert_eq!(ship.take_damage(30), Some(70));
        assert_eq!(ship.take_damage(500), Some(0));
        assert_eq!(ship.take_damage(10), Some(0));

        let mut enemy = Ship::new_enemy(2, Vec2::ZERO, 0.0, &tuning);
        assert_eq!(enemy.take_damage(10), None);
    }

    #[test]
    fn test_cannonball_target_filter() {
        let ball = Cannonball {
            id: 1,
            pos: Vec2::ZERO,
            heading: 0.0,
            speed: 8.0,
            radius: 5.0,
            fired_by: Side::Player,
        };
        assert!(ball.can_hit(Side::Enemy));
        assert!(!ball.can_hit(Side::Player));
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(WorldConfig::default(), 1).expect("default config");
        let json = serde_json::to_string(&world.snapshot()).expect("serialize");
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"phase\":\"Running\""));
    }
}
