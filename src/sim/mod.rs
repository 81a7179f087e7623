//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod kinematics;
pub mod layout;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Impact, cannonball_impact, compact, resolve_collisions};
pub use geometry::{circle_contains, distance};
pub use layout::Layout;
pub use session::{InputSource, ScriptedInput, Session, SessionOutcome, SessionSummary};
pub use state::{
    Cannonball, GameEvent, GamePhase, Island, PatrolState, Ship, ShipKind, Side, Treasure, World,
    WorldConfig, WorldSnapshot,
};
pub use tick::{TickInput, tick};
