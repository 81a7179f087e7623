//! Collision detection and resolution
//!
//! Runs once per tick after all movement. Each cannonball resolves against at
//! most one thing, the first match in this order: world edge, islands (in
//! order), then ships on the opposing side (in id order). Removals are only
//! marked during the scan and applied afterwards in one compaction pass, so a
//! ship sunk by one ball can't be sunk again by another ball in the same tick.

use super::geometry::out_of_bounds;
use super::state::{Cannonball, GameEvent, Island, Ship, Side, World};

/// What a single cannonball ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Still flying
    None,
    /// Left the world
    OutOfBounds,
    /// Hit the island at this index
    Island(usize),
    /// Hit the enemy ship at this index
    Enemy(usize),
    /// Hit the player ship
    Player,
}

/// Find the first thing `ball` hits.
///
/// `sunk[i]` marks enemies already destroyed earlier in this tick; they are
/// skipped. Player balls only test enemies and enemy balls only test the
/// player.
pub fn cannonball_impact(
    ball: &Cannonball,
    islands: &[Island],
    player: &Ship,
    enemies: &[Ship],
    sunk: &[bool],
    width: f32,
    height: f32,
) -> Impact {
    if out_of_bounds(ball.pos, width, height) {
        return Impact::OutOfBounds;
    }

    if let Some(i) = islands.iter().position(|island| island.contains(ball.pos)) {
        return Impact::Island(i);
    }

    match ball.fired_by {
        Side::Player => enemies
            .iter()
            .enumerate()
            .find(|&(i, enemy)| {
                !sunk.get(i).copied().unwrap_or(false)
                    && ball.can_hit(enemy.side())
                    && enemy.hull_contains(ball.pos)
            })
            .map_or(Impact::None, |(i, _)| Impact::Enemy(i)),
        Side::Enemy => {
            if ball.can_hit(player.side()) && player.hull_contains(ball.pos) {
                Impact::Player
            } else {
                Impact::None
            }
        }
    }
}

/// Indices of treasures the player is close enough to collect
pub fn treasures_in_reach(world: &World) -> Vec<usize> {
    let margin = world.tuning.treasure_pickup_margin;
    world
        .treasures
        .iter()
        .enumerate()
        .filter(|(_, t)| t.in_reach(world.player.pos, margin))
        .map(|(i, _)| i)
        .collect()
}

/// Resolve every cannonball and treasure pickup for this tick.
///
/// Applies damage, scoring and removals to `world` and appends the resulting
/// events. Does not change the game phase.
pub fn resolve_collisions(world: &mut World, events: &mut Vec<GameEvent>) {
    let width = world.tuning.world_width;
    let height = world.tuning.world_height;

    let mut spent = vec![false; world.cannonballs.len()];
    let mut sunk = vec![false; world.enemies.len()];

    for (i, ball) in world.cannonballs.iter().enumerate() {
        let impact = cannonball_impact(
            ball,
            &world.islands,
            &world.player,
            &world.enemies,
            &sunk,
            width,
            height,
        );

        match impact {
            Impact::None => {}
            Impact::OutOfBounds | Impact::Island(_) => spent[i] = true,
            Impact::Enemy(e) => {
                spent[i] = true;
                sunk[e] = true;
                let enemy = &world.enemies[e];
                world.score += world.tuning.enemy_reward;
                world.enemies_destroyed += 1;
                log::info!(
                    "Enemy {} sunk at ({:.0}, {:.0}), score {}",
                    enemy.id,
                    enemy.pos.x,
                    enemy.pos.y,
                    world.score
                );
                events.push(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    pos: enemy.pos,
                });
            }
            Impact::Player => {
                spent[i] = true;
                let damage = world.tuning.cannonball_damage;
                let health = world.player.take_damage(damage).unwrap_or(0);
                log::info!("Player hit for {damage}, health {health}");
                events.push(GameEvent::PlayerHit { damage, health });
            }
        }
    }

    let collected = treasures_in_reach(world);
    let mut taken = vec![false; world.treasures.len()];
    for i in collected {
        taken[i] = true;
        let treasure = &world.treasures[i];
        world.score += world.tuning.treasure_reward;
        world.treasures_collected += 1;
        log::info!("Treasure {} collected, score {}", treasure.id, world.score);
        events.push(GameEvent::TreasureCollected {
            id: treasure.id,
            pos: treasure.pos,
        });
    }

    compact(&mut world.cannonballs, &spent);
    compact(&mut world.enemies, &sunk);
    compact(&mut world.treasures, &taken);
}

/// Drop every item whose mark is set, keeping order.
///
/// Items past the end of `marks` are kept, and marking the same index twice
/// is the same as marking it once.
pub fn compact<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !marks.get(i).copied().unwrap_or(false);
        i += 1;
        keep
    });
}
