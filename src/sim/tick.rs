//! Fixed-step simulation
//!
//! The host calls `tick` once per display refresh, `spawn` from its interval
//! timer, `activate` on player input and `resize` when the window changes.
//! Every call is O(live obstacles) and never blocks.

use super::collision::{Collision, avatar_box, boundary_collision, gate_collision};
use super::obstacle::Obstacle;
use super::state::{Avatar, GameEvent, GamePhase, GameState, Viewport};
use crate::settings::ScoringMode;

/// Player input. Starts a session while idle, flaps while active.
pub fn activate(state: &mut GameState) {
    match state.phase {
        GamePhase::Idle => start_session(state),
        GamePhase::Active => {
            state.avatar.velocity = -state.tuning.jump_strength;
        }
    }
}

/// Advance the active session by one step
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    // Integrate position with the previous velocity, then apply gravity
    let max_position = state.max_avatar_position();
    state.avatar.position = (state.avatar.position + state.avatar.velocity).clamp(0.0, max_position);
    state.avatar.velocity += state.tuning.gravity;

    let removed = state
        .obstacles
        .advance(state.tuning.obstacle_speed, state.tuning.obstacle_width);
    if removed > 0 {
        log::trace!("Culled {} obstacles", removed);
    }

    match state.tuning.scoring {
        ScoringMode::Legacy => {
            let alignment_x = state.tuning.alignment_x();
            // Exact float comparison: only fires when the speed divides the distance
            if state.obstacles.iter().any(|o| o.x == alignment_x) {
                award_point(state);
            }
        }
        ScoringMode::PassOnce => {
            let width = state.tuning.obstacle_width;
            let avatar_left = state.tuning.avatar_x;
            let mut cleared = 0;
            for obstacle in state.obstacles.iter_mut() {
                if !obstacle.passed && obstacle.trailing_edge(width) < avatar_left {
                    obstacle.passed = true;
                    cleared += 1;
                }
            }
            for _ in 0..cleared {
                award_point(state);
            }
        }
    }

    let avatar = avatar_box(&state.avatar, &state.tuning);
    if let Some(collision) = boundary_collision(&avatar, state.viewport.height) {
        end_session(state, collision);
        return;
    }

    let mut examined = 0;
    let mut hit = None;
    for obstacle in state.obstacles.iter() {
        if let Some(collision) = gate_collision(&avatar, obstacle, &state.tuning, state.viewport.height) {
            hit = Some(collision);
            break;
        }
        examined += 1;
    }

    // Legacy rules pay one point per obstacle cleared by the collision loop
    if state.tuning.scoring == ScoringMode::Legacy {
        state.score += examined;
    }

    if let Some(collision) = hit {
        end_session(state, collision);
    }
}

/// Append a new obstacle at the right edge. Ignored while idle.
pub fn spawn(state: &mut GameState) -> Option<Obstacle> {
    if !state.is_running() {
        log::trace!("Spawn ignored while idle");
        return None;
    }
    let obstacle = state.obstacles.spawn(state.viewport, &state.tuning);
    log::debug!(
        "Spawned obstacle at x={} gap_top={:.1} ({} live)",
        obstacle.x,
        obstacle.gap_top,
        state.obstacles.len()
    );
    Some(obstacle)
}

/// Update the viewport used for clamping and gap randomization
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.viewport = Viewport::new(width, height);
    log::debug!("Viewport resized to {}x{}", width, height);
}

fn start_session(state: &mut GameState) {
    state.avatar = Avatar::centered(state.viewport);
    state.obstacles.clear();
    state.score = 0;
    state.time_ticks = 0;
    state.phase = GamePhase::Active;
    state.emit(GameEvent::SessionStarted);
    log::info!(
        "Session started (high score {}, {} scoring)",
        state.high_score.best,
        state.tuning.scoring.as_str()
    );
}

fn award_point(state: &mut GameState) {
    state.score += 1;
    if state.high_score.offer(state.score) {
        state.emit(GameEvent::HighScoreReached { score: state.score });
        log::info!("New high score: {}", state.score);
    }
}

fn end_session(state: &mut GameState, collision: Collision) {
    let final_score = state.score;
    state.high_score.finish_session(final_score);
    state.obstacles.clear();
    state.phase = GamePhase::Idle;
    state.emit(GameEvent::GameOver { final_score });
    log::info!(
        "Game over ({:?}) after {} ticks, score {}",
        collision,
        state.time_ticks,
        final_score
    );
}
