//! Session orchestration
//!
//! [`Session`] owns the game state and every collaborator. The platform
//! calls [`Session::frame`] once per animation frame; that is the only
//! way the simulation advances.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::citations::{Citation, CitationBook};
use crate::clock::FixedStepClock;
use crate::highscores::{HighScoreRecord, HighScoreStore};
use crate::input::{InputQueue, InputSignal};
use crate::prompt::{NamePrompt, PromptStatus, resolve_name};
use crate::renderer::{FrameView, RenderSink};
use crate::sim::{GameEvent, GameState, TickInput, autopilot, tick};
use crate::tuning::Tuning;

/// Stream used for game-over flourishes, kept apart from spawning
const FLOURISH_STREAM: u64 = 0x5eed_c17e;

pub struct Session {
    state: GameState,
    clock: FixedStepClock,
    input: InputQueue,
    store: Box<dyn HighScoreStore>,
    prompt: Box<dyn NamePrompt>,
    high_score: HighScoreRecord,
    /// Score waiting for a name before it is saved
    pending_record: Option<u64>,
    /// Last run beat the stored best, named or not
    new_record: bool,
    citations: CitationBook,
    citation: Option<Citation>,
    flourish_rng: Pcg32,
    autopilot: bool,
    frames: u64,
}

impl Session {
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        prompt: Box<dyn NamePrompt>,
    ) -> Self {
        let high_score = store.load();
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(tuning, seed),
            clock: FixedStepClock::default(),
            input: InputQueue::new(),
            store,
            prompt,
            high_score,
            pending_record: None,
            new_record: false,
            citations: CitationBook::default(),
            citation: None,
            flourish_rng: Pcg32::seed_from_u64(seed ^ FLOURISH_STREAM),
            autopilot: false,
            frames: 0,
        }
    }

    /// Swap the clock (tests use a coarse step)
    pub fn with_clock(mut self, clock: FixedStepClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> &HighScoreRecord {
        &self.high_score
    }

    /// Citation picked when the last session ended
    pub fn citation(&self) -> Option<&Citation> {
        self.citation.as_ref()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn awaiting_name(&self) -> bool {
        self.pending_record.is_some()
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn push_input(&mut self, signal: InputSignal) {
        self.input.push(signal);
    }

    /// Install citations once the asynchronous load finishes
    pub fn set_citations(&mut self, citations: Vec<Citation>) {
        self.citations.replace(citations);
    }

    /// Handle one animation frame: inputs, at most one tick, one render.
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn RenderSink) {
        if self.input.take_autopilot_toggle() {
            self.autopilot = !self.autopilot;
            log::info!("Autopilot: {}", self.autopilot);
        }

        if self.input.take_reset() {
            self.reset();
        }

        self.poll_prompt();

        if !self.state.is_running() && self.input.take_jump() {
            log::debug!("Jump ignored, game over");
        }

        let gated = !self.state.is_running();
        if self.clock.advance(now_ms, gated) {
            let jump = self.input.take_jump()
                || (self.autopilot && autopilot::should_jump(&self.state));
            tick(&mut self.state, &TickInput { jump });
            self.handle_events();
        }

        sink.render(&self.view());
        self.frames += 1;
    }

    /// Borrowed snapshot handed to the renderer
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            state: &self.state,
            high_score: &self.high_score,
            citation: self.citation.as_ref(),
            autopilot: self.autopilot,
            awaiting_name: self.pending_record.is_some(),
            new_record: self.new_record,
        }
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                self.end_session(score);
            }
        }
    }

    fn end_session(&mut self, score: u64) {
        log::info!(
            "Game over at tick {} with score {}",
            self.state.time_ticks,
            score
        );

        if self.high_score.is_beaten_by(score) {
            log::info!("New high score: {} (was {})", score, self.high_score.score);
            self.pending_record = Some(score);
            self.new_record = true;
            self.prompt.request(score);
            // Synchronous prompts answer right away
            self.poll_prompt();
        }

        self.citation = self.citations.pick(&mut self.flourish_rng).cloned();
    }

    fn poll_prompt(&mut self) {
        let Some(score) = self.pending_record else {
            return;
        };
        match self.prompt.poll() {
            PromptStatus::Answered(answer) => self.commit_record(score, resolve_name(answer)),
            PromptStatus::Pending | PromptStatus::Idle => {}
        }
    }

    fn commit_record(&mut self, score: u64, name: String) {
        let record = HighScoreRecord::new(score, name);
        self.store.save(&record);
        self.high_score = record;
        self.pending_record = None;
    }

    fn reset(&mut self) {
        if self.state.is_running() {
            log::debug!("Reset ignored while running");
            return;
        }

        if let Some(score) = self.pending_record {
            log::info!("Reset before a name was given, saving record with default name");
            self.commit_record(score, resolve_name(None));
        }

        self.state.reset();
        // Next frame becomes the new baseline, so the reset frame never ticks
        self.clock.reset_baseline();
        self.input.clear();
        self.citation = None;
        self.new_record = false;
        log::info!("Session reset");
    }
}
