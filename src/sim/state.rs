//! Game state and core simulation types
//!
//! The whole session context lives in [`GameState`]; nothing in the
//! simulation reads ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance, score and speed ramp
    Running,
    /// Collision happened; everything is frozen until reset
    Ended,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleSpawned { id: u32 },
    GameOver { score: u64 },
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, pixels/tick (negative is up)
    pub vel_y: f32,
    pub jumping: bool,
}

impl Player {
    /// A grounded player at rest
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_line()),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
            jumping: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Apply the jump impulse. Ignored while airborne (no double jump).
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.vel_y = impulse;
        self.jumping = true;
        true
    }

    /// Integrate one tick of gravity and clamp to the ground line.
    ///
    /// Returns true on the tick the player lands from a jump.
    pub fn integrate(&mut self, gravity: f32, ground_line: f32) -> bool {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        if self.pos.y >= ground_line {
            let landed = self.jumping;
            self.pos.y = ground_line;
            self.vel_y = 0.0;
            self.jumping = false;
            return landed;
        }
        false
    }
}

/// A ground obstacle scrolling left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Fully past the left edge of the canvas
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the spawn RNG was created from (for logs)
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    /// Current scroll speed, pixels/tick
    pub speed: f32,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new running session with the given spawn seed.
    ///
    /// Tuning that fails [`Tuning::validate`] is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning, using defaults: {}", e);
                Tuning::default()
            }
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            score: 0,
            speed: tuning.base_speed,
            phase: GamePhase::Running,
            player: Player::grounded(&tuning),
            obstacles: Vec::new(),
            spawner: Spawner::new(tuning.spawn_min_ticks, tuning.spawn_max_ticks),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Re-initialize everything but the RNG stream and tuning
    pub fn reset(&mut self) {
        self.time_ticks = 0;
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.phase = GamePhase::Running;
        self.player = Player::grounded(&self.tuning);
        self.obstacles.clear();
        self.spawner.reset();
        self.events.clear();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Append an obstacle at the right edge, standing on the ground
    pub fn spawn_obstacle(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(self.tuning.canvas_width, self.tuning.obstacle_y()),
            size: Vec2::new(self.tuning.obstacle_width, self.tuning.obstacle_height),
        });
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_only_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);

        assert!(player.jump(tuning.jump_impulse));
        assert_eq!(player.vel_y, tuning.jump_impulse);
        assert!(player.jumping);

        // Mid-air jumps are ignored, velocity untouched
        player.integrate(tuning.gravity, tuning.ground_line());
        let vel = player.vel_y;
        assert!(!player.jump(tuning.jump_impulse));
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_landing_clears_jump() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        player.jump(tuning.jump_impulse);

        let mut landed_at = None;
        for t in 0..200 {
            if player.integrate(tuning.gravity, tuning.ground_line()) {
                landed_at = Some(t);
                break;
            }
        }

        assert!(landed_at.is_some());
        assert_eq!(player.pos.y, tuning.ground_line());
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn test_resting_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        for _ in 0..10 {
            assert!(!player.integrate(tuning.gravity, tuning.ground_line()));
        }
        assert_eq!(player.pos.y, tuning.ground_line());
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_obstacle_off_screen() {
        let mut obstacle = Obstacle {
            id: 1,
            pos: Vec2::new(5.0, 150.0),
            size: Vec2::new(20.0, 30.0),
        };
        obstacle.advance(24.0);
        // x = -19, right edge still at +1
        assert!(!obstacle.is_off_screen());
        obstacle.advance(2.0);
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_invalid_tuning_uses_defaults() {
        let broken = [
            Tuning {
                score_divisor: 0,
                ..Tuning::default()
            },
            Tuning {
                gravity: 0.0,
                ..Tuning::default()
            },
            Tuning {
                base_speed: 0.0,
                speed_increment: 0.0,
                ..Tuning::default()
            },
        ];
        for tuning in broken {
            let mut state = GameState::new(tuning, 3);
            assert_eq!(state.tuning, Tuning::default());
            assert_eq!(state.speed, state.tuning.base_speed);

            // A jump comes back down and the divide in the tick is safe
            state.player.pos.x = -10_000.0;
            let mut landed = false;
            for i in 0..200 {
                crate::sim::tick(&mut state, &crate::sim::TickInput { jump: i == 0 });
                landed |= state.drain_events().contains(&GameEvent::Landed);
            }
            assert!(landed);
            assert_eq!(state.player.pos.y, state.tuning.ground_line());
        }
    }

    #[test]
    fn test_spawn_obstacle_at_right_edge() {
        let mut state = GameState::new(Tuning::default(), 7);
        let id = state.spawn_obstacle();
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.id, id);
        assert_eq!(obstacle.pos.x, state.tuning.canvas_width);
        // Bottom edge sits on the ground
        assert_eq!(
            obstacle.pos.y + obstacle.size.y,
            state.tuning.canvas_height - state.tuning.ground_height
        );
    }
}
