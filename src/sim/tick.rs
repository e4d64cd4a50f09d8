//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one step, in this order:
//! session counters, jump input, player physics, spawning, obstacle
//! movement, collision, off-screen removal.

use super::collision::any_overlap;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump request (space/tap/click)
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Ended freezes counters, score and speed until reset
    if state.phase == GamePhase::Ended {
        return;
    }

    let now = state.time_ticks;
    state.time_ticks += 1;
    state.score = state.time_ticks / state.tuning.score_divisor;
    state.speed += state.tuning.speed_increment;

    if input.jump && state.player.jump(state.tuning.jump_impulse) {
        state.push_event(GameEvent::Jumped);
    }

    let ground_line = state.tuning.ground_line();
    if state.player.integrate(state.tuning.gravity, ground_line) {
        state.push_event(GameEvent::Landed);
    }

    if state.spawner.poll(now, &mut state.rng) {
        let id = state.spawn_obstacle();
        log::debug!("Spawned obstacle {} at tick {}", id, now);
        state.push_event(GameEvent::ObstacleSpawned { id });
    }

    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
    }

    if any_overlap(&state.player.rect(), &state.obstacles) {
        state.phase = GamePhase::Ended;
        let score = state.score;
        state.push_event(GameEvent::GameOver { score });
    }

    // Spawn order is preserved, so removal keeps the set stable
    state.obstacles.retain(|o| !o.is_off_screen());
}
