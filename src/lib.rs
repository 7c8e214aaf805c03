//! Flappy Gates - A gravity-and-gates arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, obstacle stream, collisions, scoring)
//! - `settings`: Data-driven tuning of the simulation constants
//! - `highscores`: In-memory best score across sessions
//! - `platform`: Browser/native host helpers

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{ScoringMode, Tuning};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration added to the avatar velocity every tick (units/tick²)
    pub const GRAVITY: f32 = 0.2;
    /// Magnitude of the upward impulse applied on activate (units/tick)
    pub const JUMP_STRENGTH: f32 = 6.0;

    /// Avatar box: fixed horizontal position and square size
    pub const AVATAR_X: f32 = 50.0;
    pub const AVATAR_SIZE: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    pub const OBSTACLE_SPEED: f32 = 2.9;
    /// Minimum thickness of each gate segment
    pub const GAP_MARGIN: f32 = 100.0;

    /// Wall-clock interval between obstacle spawns
    pub const SPAWN_INTERVAL_MS: u32 = 4000;

    /// Host frame rate assumed by headless runners
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
