//! Rendering module
//!
//! The session hands a borrowed [`FrameView`] to a [`RenderSink`] once per
//! animation frame. On web the sink paints with Canvas2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::citations::Citation;
use crate::highscores::HighScoreRecord;
use crate::sim::{GamePhase, GameState};

/// Everything a renderer may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub state: &'a GameState,
    pub high_score: &'a HighScoreRecord,
    /// Shown on the game-over screen when loaded
    pub citation: Option<&'a Citation>,
    pub autopilot: bool,
    pub awaiting_name: bool,
    /// The run that just ended beat the stored high score
    pub new_record: bool,
}

pub trait RenderSink {
    fn render(&mut self, view: &FrameView<'_>);
}

pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn high_score_text(record: &HighScoreRecord) -> String {
    format!("Best: {} ({})", record.score, record.name)
}

pub fn game_over_text(score: u64, new_record: bool) -> String {
    if new_record {
        format!("New record! {}", score)
    } else {
        "Game Over!".to_string()
    }
}

/// Records what it was asked to draw; used natively and in tests
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_score: u64,
    pub last_phase: Option<GamePhase>,
    pub last_autopilot: bool,
    pub last_citation: Option<Citation>,
    /// Game-over banner of the last frame, if one was shown
    pub last_banner: Option<String>,
}

impl RenderSink for HeadlessRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        self.last_score = view.state.score;
        self.last_autopilot = view.autopilot;
        self.last_citation = view.citation.cloned();
        self.last_banner = (!view.state.is_running())
            .then(|| game_over_text(view.state.score, view.new_record));

        let phase = view.state.phase;
        if self.last_phase != Some(phase) {
            log::debug!("Frame {}: phase {:?}", self.frames, phase);
        }
        self.last_phase = Some(phase);
    }
}
