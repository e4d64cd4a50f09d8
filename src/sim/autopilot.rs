//! Idle/demo mode - the game plays itself
//!
//! Jumps when the nearest approaching obstacle is a fixed number of ticks
//! away from the player's front edge.

use super::state::GameState;

/// How many ticks ahead of contact the autopilot jumps
pub const LEAD_TICKS: f32 = 12.0;

/// Decide whether to jump this tick
pub fn should_jump(state: &GameState) -> bool {
    if !state.is_running() || state.player.jumping {
        return false;
    }

    let front = state.player.pos.x + state.player.size.x;
    let nearest_gap = state
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x > state.player.pos.x)
        .map(|o| o.pos.x - front)
        .fold(f32::INFINITY, f32::min);

    nearest_gap <= state.speed * LEAD_TICKS
}
