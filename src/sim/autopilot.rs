//! Idle/demo mode: a simple pilot that plays the game
//!
//! Aims for the middle of the nearest gap still ahead of the avatar and flaps
//! whenever it sinks below that line while falling.

use super::state::GameState;

/// Vertical line the pilot tries to hold
pub fn target_height(state: &GameState) -> f32 {
    let tuning = &state.tuning;
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge(tuning.obstacle_width) >= tuning.avatar_x)
        .map(|o| o.gap_top + tuning.obstacle_gap / 2.0)
        .unwrap_or(state.viewport.height / 2.0)
}

/// Whether the pilot would activate this frame
pub fn wants_flap(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let avatar_center = state.avatar.position + state.tuning.avatar_size / 2.0;
    // Fall a little past the line before flapping so one impulse recenters
    let slack = state.tuning.avatar_size / 2.0;
    state.avatar.velocity > 0.0 && avatar_center > target_height(state) + slack
}
