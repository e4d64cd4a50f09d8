//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, any_overlap};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, tick};
