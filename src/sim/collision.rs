//! Axis-aligned box geometry and the avatar-versus-gate collision test
//!
//! Screen space: x grows to the right, y grows downward, the viewport spans
//! `[0, width] x [0, height]`.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::state::Avatar;
use crate::settings::Tuning;

/// Axis-aligned bounding box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_edges(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    TopGate,
    BottomGate,
    Ceiling,
    Floor,
}

/// Bounding box of the avatar at its current height
pub fn avatar_box(avatar: &Avatar, tuning: &Tuning) -> Aabb {
    Aabb::from_edges(
        tuning.avatar_x,
        tuning.avatar_x + tuning.avatar_size,
        avatar.position,
        avatar.position + tuning.avatar_size,
    )
}

/// Top and bottom gate boxes for an obstacle
pub fn gate_boxes(obstacle: &Obstacle, tuning: &Tuning, viewport_height: f32) -> (Aabb, Aabb) {
    let left = obstacle.x;
    let right = obstacle.x + tuning.obstacle_width;
    let top_gate = Aabb::from_edges(left, right, 0.0, obstacle.gap_top);
    let bottom_gate = Aabb::from_edges(
        left,
        right,
        obstacle.gap_top + tuning.obstacle_gap,
        viewport_height,
    );
    (top_gate, bottom_gate)
}

/// Avatar touching the top or bottom of the viewport
pub fn boundary_collision(avatar: &Aabb, viewport_height: f32) -> Option<Collision> {
    if avatar.top() <= 0.0 {
        Some(Collision::Ceiling)
    } else if avatar.bottom() >= viewport_height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Avatar overlapping either gate of one obstacle
pub fn gate_collision(
    avatar: &Aabb,
    obstacle: &Obstacle,
    tuning: &Tuning,
    viewport_height: f32,
) -> Option<Collision> {
    let (top_gate, bottom_gate) = gate_boxes(obstacle, tuning, viewport_height);
    if avatar.intersects(&top_gate) {
        Some(Collision::TopGate)
    } else if avatar.intersects(&bottom_gate) {
        Some(Collision::BottomGate)
    } else {
        None
    }
}
