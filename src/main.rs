//! Pirate Battles headless entry point
//!
//! Runs one session with the autopilot at the helm and prints the final
//! statistics. Window, input and audio layers live outside this crate.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use pirate_battles::Tuning;
use pirate_battles::sim::{Autopilot, GameEvent, Layout, Session, World, WorldConfig};

// Runtime settings (not gameplay tuning).

fn seed() -> u64 {
    env::var("PIRATE_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64
        })
}

fn max_ticks() -> u64 {
    env::var("PIRATE_MAX_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        // Five minutes at 60 Hz
        .unwrap_or(5 * 60 * 60)
}

fn tuning() -> Tuning {
    let Ok(path) = env::var("PIRATE_TUNING") else {
        return Tuning::default();
    };
    match Tuning::load(&path) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {path}: {e}");
            Tuning::default()
        }
    }
}

fn layout(tuning: &Tuning) -> Layout {
    let Ok(path) = env::var("PIRATE_LAYOUT") else {
        return Layout::default();
    };
    match Layout::load(&path).and_then(|layout| layout.validate(tuning).map(|()| layout)) {
        Ok(layout) => {
            log::info!("Loaded layout from {path}");
            layout
        }
        Err(e) => {
            log::warn!("Ignoring layout file {path}: {e}");
            Layout::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Pirate Battles (headless) starting...");

    let tuning = tuning();
    let layout = layout(&tuning);
    let seed = seed();
    log::info!("Game initialized with seed: {}", seed);

    let world = match World::new(WorldConfig { tuning, layout }, seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Cannot start with this config: {e}");
            std::process::exit(1);
        }
    };
    let mut session = Session::new(world);

    let summary = session.run(&mut Autopilot::default(), max_ticks(), |event| match event {
        GameEvent::CannonFired { .. } => log::trace!("{event:?}"),
        _ => log::debug!("{event:?}"),
    });

    println!("=== GAME OVER ===");
    println!("Final Score: {}", summary.score);
    println!("Enemies Destroyed: {}", summary.enemies_destroyed);
    println!("Treasure Collected: {}", summary.treasures_collected);
    println!("Ticks: {}", summary.ticks);

    match serde_json::to_string(&summary) {
        Ok(json) => log::info!("Summary: {json}"),
        Err(e) => log::warn!("Could not serialize summary: {e}"),
    }
}
