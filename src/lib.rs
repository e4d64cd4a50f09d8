//! Dino Dash - A single-screen endless runner
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (player physics, spawning, collisions)
//! - `clock`: Render-callback to fixed-tick conversion
//! - `session`: Running/Ended state machine and collaborator wiring
//! - `renderer`: Render sink abstraction (Canvas2D on web)
//! - `platform`: Browser storage, prompt and fetch glue
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod citations;
pub mod clock;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod prompt;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreRecord, HighScoreStore};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Milliseconds per simulation tick
    pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND as f64;

    /// Canvas dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 200.0;
    /// Thickness of the ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Downward acceleration, pixels/tick²
    pub const GRAVITY: f32 = 0.6;
    /// Upward velocity applied on jump, pixels/tick
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;

    /// Scroll speed at session start, pixels/tick
    pub const BASE_SPEED: f32 = 6.0;
    /// Linear speed ramp, pixels/tick added every tick
    pub const SPEED_INCREMENT: f32 = 0.002;
    /// Ticks per score point
    pub const SCORE_DIVISOR: u64 = 6;

    /// Spawn delay range in ticks (~1s to ~2.5s at 60 Hz)
    pub const SPAWN_MIN_TICKS: u64 = 60;
    pub const SPAWN_MAX_TICKS: u64 = 150;

    /// Name stored with a record when the player gives none
    pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";
    /// Longest name kept for a record
    pub const MAX_NAME_LEN: usize = 24;
}
