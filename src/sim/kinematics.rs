//! Per-entity motion rules
//!
//! Speeds are in world units per tick and angles in degrees; everything here
//! runs once per fixed tick.

use rand::Rng;

use super::geometry::{clamp_inside, in_bounds_open};
use super::state::{Cannonball, Island, PatrolState, Ship, ShipKind};
use super::tick::TickInput;
use crate::tuning::Tuning;
use crate::{angle_delta, heading_vector, normalize_degrees};

/// Headings closer than this are considered aligned
const HEADING_EPSILON: f32 = 1e-3;

/// Advance the player ship one tick from held controls.
///
/// Returns `false` when the move was rejected because the ship would have
/// ended up inside an island. A rejected move also kills all speed.
pub fn update_player(
    ship: &mut Ship,
    input: &TickInput,
    islands: &[Island],
    tuning: &Tuning,
) -> bool {
    // Left and right both held cancel out
    if input.left {
        ship.heading += tuning.player_turn_rate;
    }
    if input.right {
        ship.heading -= tuning.player_turn_rate;
    }

    let accel = tuning.player_acceleration;
    let max_speed = tuning.player_max_speed;
    let min_speed = tuning.player_min_speed();

    ship.speed = if input.forward {
        (ship.speed + accel).min(max_speed)
    } else if input.back {
        (ship.speed - accel).max(min_speed)
    } else if ship.speed > 0.0 {
        // Coasting: drag is half the thrust
        (ship.speed - accel / 2.0).max(0.0)
    } else if ship.speed < 0.0 {
        (ship.speed + accel / 2.0).min(0.0)
    } else {
        0.0
    };
    ship.speed = ship.speed.clamp(min_speed, max_speed);

    let tentative = ship.pos + heading_vector(ship.heading) * ship.speed;

    let moved = if islands.iter().any(|island| island.contains(tentative)) {
        ship.speed = 0.0;
        false
    } else {
        ship.pos = clamp_inside(tentative, ship.radius, tuning.world_width, tuning.world_height);
        true
    };

    tick_cooldown(ship);
    moved
}

/// Advance an enemy ship one tick of patrol AI.
///
/// The ship steers toward its target heading and sails at constant speed.
/// Every `enemy_retarget_ticks` it picks a new random heading. If the next
/// position would leave the world or hit an island it stays put and turns
/// around instead. Returns `false` when the move was rejected.
pub fn update_enemy<R: Rng>(
    ship: &mut Ship,
    islands: &[Island],
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    let ShipKind::Enemy {
        target_heading,
        patrol_ticks,
        patrol,
    } = &mut ship.kind
    else {
        return false;
    };

    *patrol_ticks += 1;
    if *patrol_ticks > tuning.enemy_retarget_ticks {
        *target_heading = rng.random_range(0..360) as f32;
        *patrol_ticks = 0;
        *patrol = PatrolState::Cruising;
    }

    let turn = tuning.enemy_turn_rate;
    let delta = angle_delta(ship.heading, *target_heading);
    ship.heading = normalize_degrees(ship.heading + delta.clamp(-turn, turn));

    if *patrol == PatrolState::Reversing
        && angle_delta(ship.heading, *target_heading).abs() < HEADING_EPSILON
    {
        *patrol = PatrolState::Cruising;
    }

    let tentative = ship.pos + heading_vector(ship.heading) * ship.speed;
    let blocked = !in_bounds_open(tentative, tuning.world_width, tuning.world_height)
        || islands.iter().any(|island| island.contains(tentative));

    if blocked {
        *target_heading = normalize_degrees(ship.heading + 180.0);
        *patrol = PatrolState::Reversing;
        log::debug!(
            "Enemy {} blocked at ({:.1}, {:.1}), reversing to {:.0}",
            ship.id,
            ship.pos.x,
            ship.pos.y,
            *target_heading
        );
    } else {
        ship.pos = tentative;
    }

    tick_cooldown(ship);
    !blocked
}

/// Move a cannonball along its fixed heading
#[inline]
pub fn advance_cannonball(ball: &mut Cannonball) {
    ball.pos += heading_vector(ball.heading) * ball.speed;
}

/// True if the ship's guns are loaded
#[inline]
pub fn can_fire(ship: &Ship) -> bool {
    ship.fire_cooldown == 0
}

/// Fire from the ship's bow and start the reload.
///
/// Callers check [`can_fire`] first; this never refuses.
pub fn fire(ship: &mut Ship, id: u32, tuning: &Tuning) -> Cannonball {
    let side = ship.side();
    ship.fire_cooldown = match ship.kind {
        ShipKind::Player { .. } => tuning.player_fire_cooldown,
        ShipKind::Enemy { .. } => tuning.enemy_fire_cooldown,
    };

    Cannonball {
        id,
        pos: ship.muzzle_position(tuning.muzzle_offset),
        heading: ship.heading,
        speed: tuning.cannonball_speed,
        radius: tuning.cannonball_radius,
        fired_by: side,
    }
}

fn tick_cooldown(ship: &mut Ship) {
    if ship.fire_cooldown > 0 {
        ship.fire_cooldown -= 1;
    }
}
