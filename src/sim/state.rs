//! Game state and core simulation types
//!
//! One owned `GameState` holds everything the simulation mutates. Hosts read
//! it through `Snapshot` and drive it through the functions in `tick`.

use serde::Serialize;

use super::obstacle::{Obstacle, ObstacleStream};
use crate::highscores::HighScore;
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu / between sessions, waiting for activate
    Idle,
    /// Session in progress
    Active,
}

/// Host viewport in screen units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The falling avatar. `position` is the top edge, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Avatar {
    pub position: f32,
    pub velocity: f32,
}

impl Avatar {
    /// Resting at the vertical center of the viewport
    pub fn centered(viewport: Viewport) -> Self {
        Self {
            position: viewport.height / 2.0,
            velocity: 0.0,
        }
    }
}

/// Notifications for the toast/log collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted,
    HighScoreReached { score: u32 },
    GameOver { final_score: u32 },
}

/// Complete game state (deterministic for a given seed and signal sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the obstacle RNG
    pub seed: u64,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    /// Score of the current (or last) session
    pub score: u32,
    pub high_score: HighScore,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
    /// Events not yet drained by the host
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        Self {
            seed,
            tuning,
            viewport,
            phase: GamePhase::Idle,
            avatar: Avatar::centered(viewport),
            obstacles: ObstacleStream::new(seed),
            score: 0,
            high_score: HighScore::new(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Lowest allowed avatar position (top edge) for the current viewport
    #[inline]
    pub fn max_avatar_position(&self) -> f32 {
        (self.viewport.height - self.tuning.avatar_size).max(0.0)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.is_running(),
            score: self.score,
            high_score: self.high_score.best,
            viewport: self.viewport,
            avatar: self.avatar,
            avatar_x: self.tuning.avatar_x,
            avatar_size: self.tuning.avatar_size,
            obstacle_width: self.tuning.obstacle_width,
            obstacle_gap: self.tuning.obstacle_gap,
            obstacles: self.obstacles.iter().copied().collect(),
        }
    }
}

/// Per-frame state handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub running: bool,
    pub score: u32,
    pub high_score: u32,
    pub viewport: Viewport,
    pub avatar: Avatar,
    pub avatar_x: f32,
    pub avatar_size: f32,
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    pub obstacles: Vec<Obstacle>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_centered() {
        let state = GameState::new(1, Tuning::default(), Viewport::new(800.0, 600.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.is_running());
        assert_eq!(state.avatar.position, 300.0);
        assert_eq!(state.avatar.velocity, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.max_avatar_position(), 570.0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(1, Tuning::default(), Viewport::new(800.0, 600.0));
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["running"], false);
        assert_eq!(value["avatar"]["position"], 300.0);
        assert_eq!(value["obstacle_width"], 80.0);
        assert!(value["obstacles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&GameEvent::GameOver { final_score: 7 }).unwrap();
        assert_eq!(json, r#"{"kind":"game_over","final_score":7}"#);
    }
}
