//! Single-writer signal queue
//!
//! Host callbacks (frame, interval timer, input, resize) never touch the
//! state directly. They enqueue a `Signal`, and `pump` applies queued signals
//! to the state one at a time, in arrival order.

use std::collections::VecDeque;

use super::state::{GameEvent, GameState};
use super::tick::{activate, resize, spawn, tick};

/// Input into the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Activate,
    Tick,
    Spawn,
    Resize { width: f32, height: f32 },
}

/// Apply one signal to the state
pub fn apply(state: &mut GameState, signal: Signal) {
    match signal {
        Signal::Activate => activate(state),
        Signal::Tick => tick(state),
        Signal::Spawn => {
            spawn(state);
        }
        Signal::Resize { width, height } => resize(state, width, height),
    }
}

/// FIFO of signals awaiting application
#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    pending: VecDeque<Signal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Signal) {
        self.pending.push_back(signal);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every queued signal in order and return the events they produced
    pub fn pump(&mut self, state: &mut GameState) -> Vec<GameEvent> {
        if !self.is_empty() {
            log::trace!("Applying {} queued signals", self.len());
        }
        while let Some(signal) = self.pending.pop_front() {
            apply(state, signal);
        }
        state.drain_events()
    }
}
