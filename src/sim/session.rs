//! Session driver
//!
//! Turns wall-clock frame time into fixed ticks and owns the quit/tick-limit
//! bookkeeping that the world itself knows nothing about.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, World, WorldSnapshot};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Where per-tick controls come from (keyboard, AI, recorded script)
pub trait InputSource {
    /// Controls for the next tick, given the current world
    fn poll(&mut self, snapshot: &WorldSnapshot) -> TickInput;
}

/// Plays back a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    /// Hold the same input for `ticks` ticks
    pub fn repeat(input: TickInput, ticks: usize) -> Self {
        Self::new(vec![input; ticks])
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &WorldSnapshot) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Player health reached zero
    Sunk,
    /// The input source asked to quit
    Quit,
    /// `run` hit its tick budget
    TickLimit,
}

/// Final statistics shown when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: Option<SessionOutcome>,
    pub score: u64,
    pub enemies_destroyed: u32,
    pub treasures_collected: u32,
    pub ticks: u64,
    pub health: u32,
}

/// A world plus fixed-step timing
#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    accumulator: f32,
    quit: bool,
}

impl Session {
    pub fn new(world: World) -> Self {
        Self {
            world,
            accumulator: 0.0,
            quit: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// True once the world has ended or a quit was requested
    pub fn is_over(&self) -> bool {
        self.quit || self.world.is_ended()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        if self.world.is_ended() {
            Some(SessionOutcome::Sunk)
        } else if self.quit {
            Some(SessionOutcome::Quit)
        } else {
            None
        }
    }

    /// Run exactly one tick. A quit request stops the session before the
    /// tick runs.
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if input.quit {
            self.quit = true;
        }
        if self.is_over() {
            return Vec::new();
        }
        tick(&mut self.world, input)
    }

    /// Feed one rendered frame's worth of time.
    ///
    /// Runs as many whole ticks as the accumulated time allows (at most
    /// `MAX_SUBSTEPS`). The fire edge only applies to the first of them.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.quit {
            self.quit = true;
        }
        if self.is_over() {
            return events;
        }

        // A NaN frame time would poison the accumulator for good
        if !frame_dt.is_finite() {
            return events;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut input = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.world, &input));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire = false;

            if self.world.is_ended() {
                self.accumulator = 0.0;
                break;
            }
        }

        events
    }

    /// Drive the session from `source` until the player is sunk, the source
    /// quits, or `max_ticks` more ticks have run. Every event is handed to
    /// `on_event` in order.
    pub fn run<S, F>(&mut self, source: &mut S, max_ticks: u64, mut on_event: F) -> SessionSummary
    where
        S: InputSource,
        F: FnMut(&GameEvent),
    {
        let mut ran = 0;
        let outcome = loop {
            if let Some(outcome) = self.outcome() {
                break outcome;
            }
            if ran >= max_ticks {
                break SessionOutcome::TickLimit;
            }

            let input = source.poll(&self.world.snapshot());
            for event in self.step(&input) {
                on_event(&event);
            }
            if !input.quit {
                ran += 1;
            }
        };

        let mut summary = self.summary();
        summary.outcome = Some(outcome);
        log::info!(
            "Session over ({:?}): score {}, enemies destroyed {}, treasure {}, {} ticks",
            outcome,
            summary.score,
            summary.enemies_destroyed,
            summary.treasures_collected,
            summary.ticks
        );
        summary
    }

    /// Statistics so far
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            outcome: self.outcome(),
            score: self.world.score,
            enemies_destroyed: self.world.enemies_destroyed,
            treasures_collected: self.world.treasures_collected,
            ticks: self.world.time_ticks,
            health: self.world.player_health(),
        }
    }
}
