//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one step.

use rand::Rng;

use super::collision::resolve_collisions;
use super::kinematics::{advance_cannonball, can_fire, fire, update_enemy, update_player};
use super::state::{GameEvent, GamePhase, Side, World};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thrust held
    pub forward: bool,
    /// Reverse held (ignored while `forward` is held)
    pub back: bool,
    /// Turn counter-clockwise held
    pub left: bool,
    /// Turn clockwise held
    pub right: bool,
    /// Fire pressed this tick (edge, not level)
    pub fire: bool,
    /// Quit requested. The world ignores this; the session driver stops at
    /// the next tick boundary.
    pub quit: bool,
}

/// Advance the world by one fixed timestep.
///
/// Order: player shot, player movement, each enemy's movement and fire
/// trial, cannonball flight, collisions, then the end-of-game check.
/// Returns the events raised during the tick. Once the game has ended this
/// is a no-op.
pub fn tick(world: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if world.is_ended() {
        return events;
    }

    world.time_ticks += 1;

    // Player shot goes first so the reload starts counting down this tick
    if input.fire && can_fire(&world.player) {
        let id = world.next_entity_id();
        let ball = fire(&mut world.player, id, &world.tuning);
        log::debug!("Player fired cannonball {} heading {:.0}", id, ball.heading);
        world.cannonballs.push(ball);
        events.push(GameEvent::CannonFired {
            side: Side::Player,
            id,
        });
    }

    update_player(&mut world.player, input, &world.islands, &world.tuning);

    for idx in 0..world.enemies.len() {
        update_enemy(
            &mut world.enemies[idx],
            &world.islands,
            &world.tuning,
            &mut world.rng,
        );

        // Draw every tick so the random stream doesn't depend on reload state
        let wants_to_fire = world.rng.random_bool(world.tuning.enemy_fire_chance);
        if wants_to_fire && can_fire(&world.enemies[idx]) {
            let id = world.next_entity_id();
            let ball = fire(&mut world.enemies[idx], id, &world.tuning);
            log::debug!("Enemy {} fired cannonball {}", world.enemies[idx].id, id);
            world.cannonballs.push(ball);
            events.push(GameEvent::CannonFired {
                side: Side::Enemy,
                id,
            });
        }
    }

    for ball in &mut world.cannonballs {
        advance_cannonball(ball);
    }

    resolve_collisions(world, &mut events);

    if world.player_health() == 0 {
        world.phase = GamePhase::Ended;
        log::info!(
            "Player ship sunk after {} ticks: score {}, enemies destroyed {}",
            world.time_ticks,
            world.score,
            world.enemies_destroyed
        );
        events.push(GameEvent::GameEnded {
            score: world.score,
            enemies_destroyed: world.enemies_destroyed,
        });
    }

    // Ensure deterministic ordering
    world.normalize_order();

    events
}
