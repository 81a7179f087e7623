//! Pirate Battles - top-down naval combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, world state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas longer than this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Upper bound for player health
    pub const MAX_HEALTH: u32 = 100;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed turn from `from` to `to`, in degrees, within (-180, 180]
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unit motion vector for a heading in degrees.
///
/// This is the only place headings are converted to radians. World `y` grows
/// downward, so a heading of 90 degrees points toward decreasing `y`.
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees, [0, 360), that points from `from` toward `to`
#[inline]
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    normalize_degrees((-d.y).atan2(d.x).to_degrees())
}
