//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]; a JSON document can override any
//! subset of fields (LocalStorage on web, a file path on native).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Every physics, spawn and score constant the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_height: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,

    pub base_speed: f32,
    pub speed_increment: f32,
    pub score_divisor: u64,

    pub spawn_min_ticks: u64,
    pub spawn_max_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            score_divisor: SCORE_DIVISOR,

            spawn_min_ticks: SPAWN_MIN_TICKS,
            spawn_max_ticks: SPAWN_MAX_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            self.canvas_width,
            self.canvas_height,
            self.ground_height,
            self.player_x,
            self.player_width,
            self.player_height,
            self.gravity,
            self.jump_impulse,
            self.obstacle_width,
            self.obstacle_height,
            self.base_speed,
            self.speed_increment,
        ];
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(TuningError::Invalid("values must be finite"));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::Invalid("canvas size must be positive"));
        }
        if self.player_width <= 0.0
            || self.player_height <= 0.0
            || self.obstacle_width <= 0.0
            || self.obstacle_height <= 0.0
        {
            return Err(TuningError::Invalid("body sizes must be positive"));
        }
        if self.score_divisor == 0 {
            return Err(TuningError::Invalid("score_divisor must be non-zero"));
        }
        if self.spawn_min_ticks > self.spawn_max_ticks {
            return Err(TuningError::Invalid("spawn_min_ticks exceeds spawn_max_ticks"));
        }
        if self.ground_height < 0.0 {
            return Err(TuningError::Invalid("ground_height must not be negative"));
        }
        if self.base_speed <= 0.0 {
            return Err(TuningError::Invalid("base_speed must be positive"));
        }
        if self.speed_increment < 0.0 {
            return Err(TuningError::Invalid("speed must not ramp down"));
        }
        // Screen y grows downward: the jump goes up, gravity pulls back down
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if self.jump_impulse >= 0.0 {
            return Err(TuningError::Invalid("jump_impulse must be negative"));
        }
        Ok(())
    }

    /// Resting y of the player's top edge
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.canvas_height - self.ground_height - self.player_height
    }

    /// Top edge of a freshly spawned obstacle, standing on the ground
    #[inline]
    pub fn obstacle_y(&self) -> f32 {
        self.canvas_height - self.ground_height - self.obstacle_height
    }
}
