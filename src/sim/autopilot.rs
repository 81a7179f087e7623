//! Idle/demo mode - AI plays the game
//!
//! Hunts the nearest enemy, falls back to collecting treasure once the sea is
//! clear, and steers away from islands straight ahead. Purely a function of
//! the snapshot, so runs stay deterministic.

use glam::Vec2;

use super::geometry::{distance, nearest};
use super::session::InputSource;
use super::state::WorldSnapshot;
use super::tick::TickInput;
use crate::{angle_delta, heading_to, heading_vector};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Fire when the target is within this many degrees of the bow
    pub aim_tolerance: f32,
    /// Don't turn for deltas smaller than this (prevents wiggling)
    pub dead_zone: f32,
    /// Stop closing in on an enemy once this near
    pub standoff: f32,
    /// How far ahead to probe for islands
    pub lookahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            aim_tolerance: 6.0,
            dead_zone: 1.5,
            standoff: 150.0,
            lookahead: 60.0,
        }
    }
}

enum Target {
    Enemy(Vec2),
    Treasure(Vec2),
}

impl Autopilot {
    fn pick_target(&self, snapshot: &WorldSnapshot) -> Option<Target> {
        let from = snapshot.player.pos;
        let treasure = || nearest(from, snapshot.treasures.iter().map(|t| t.pos));
        nearest(from, snapshot.enemies.iter().map(|s| s.pos))
            .map(Target::Enemy)
            .or_else(|| treasure().map(Target::Treasure))
    }

    fn island_ahead(&self, snapshot: &WorldSnapshot) -> bool {
        let player = &snapshot.player;
        let probe = player.pos + heading_vector(player.heading) * (player.radius + self.lookahead);
        snapshot.islands.iter().any(|i| i.contains(probe))
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &WorldSnapshot) -> TickInput {
        let player = &snapshot.player;
        let mut input = TickInput::default();

        if self.island_ahead(snapshot) {
            // Always turn the same way to avoid dithering at an island face
            input.left = true;
            input.back = player.speed > 0.0;
            return input;
        }

        let Some(target) = self.pick_target(snapshot) else {
            return input;
        };

        let (goal, hunting) = match target {
            Target::Enemy(pos) => (pos, true),
            Target::Treasure(pos) => (pos, false),
        };

        let delta = angle_delta(player.heading, heading_to(player.pos, goal));
        input.left = delta > self.dead_zone;
        input.right = delta < -self.dead_zone;

        let range = distance(player.pos, goal);
        input.forward = !hunting || range > self.standoff;
        input.fire = hunting && delta.abs() <= self.aim_tolerance && player.fire_cooldown == 0;

        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::Layout;
    use crate::sim::session::Session;
    use crate::sim::state::{Island, World, WorldConfig};
    use crate::tuning::Tuning;

    fn world(layout: Layout) -> World {
        World::new(
            WorldConfig {
                tuning: Tuning {
                    enemy_fire_chance: 0.0,
                    ..Default::default()
                },
                layout,
            },
            11,
        )
        .expect("valid config")
    }

    #[test]
    fn test_fires_at_enemy_dead_ahead() {
        let mut layout = Layout::empty(Vec2::new(300.0, 400.0));
        layout.enemy_spawns.push(Vec2::new(700.0, 400.0));
        let w = world(layout);

        let input = Autopilot::default().poll(&w.snapshot());
        assert!(input.fire);
        assert!(input.forward);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_turns_toward_target() {
        let mut layout = Layout::empty(Vec2::new(300.0, 400.0));
        // Straight "up" from the player: counter-clockwise from heading 0
        layout.treasure_spawns.push(Vec2::new(300.0, 100.0));
        let w = world(layout);

        let input = Autopilot::default().poll(&w.snapshot());
        assert!(input.left);
        assert!(!input.fire);
    }

    #[test]
    fn test_avoids_island_ahead() {
        let mut layout = Layout::empty(Vec2::new(300.0, 400.0));
        layout.islands.push(Island::new(400.0, 400.0, 40.0));
        let w = world(layout);

        let input = Autopilot::default().poll(&w.snapshot());
        assert!(input.left);
        assert!(!input.forward);
    }

    #[test]
    fn test_collects_everything_on_open_sea() {
        let mut layout = Layout::empty(Vec2::new(600.0, 400.0));
        layout.treasure_spawns.push(Vec2::new(800.0, 400.0));
        layout.treasure_spawns.push(Vec2::new(600.0, 200.0));
        let mut session = Session::new(world(layout));

        let summary = session.run(&mut Autopilot::default(), 3_000, |_| {});
        assert_eq!(summary.treasures_collected, 2);
        assert_eq!(summary.score, 100);
    }
}
