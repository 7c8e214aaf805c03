//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick, no elapsed-time integration
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod signal;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Collision, avatar_box, boundary_collision, gate_boxes, gate_collision};
pub use obstacle::{Obstacle, ObstacleStream, SpawnClock, gap_top_range};
pub use signal::{Signal, SignalQueue, apply};
pub use state::{Avatar, GameEvent, GamePhase, GameState, Snapshot, Viewport};
pub use tick::{activate, resize, spawn, tick};
