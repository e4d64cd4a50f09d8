//! Edge-triggered input signals
//!
//! Platform event handlers push signals; the session drains them once per
//! frame. Repeated signals of the same kind collapse (latest wins).

/// A discrete input edge with no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Jump,
    Reset,
    ToggleAutopilot,
}

#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    jump: bool,
    reset: bool,
    toggle_autopilot: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: InputSignal) {
        match signal {
            InputSignal::Jump => self.jump = true,
            InputSignal::Reset => self.reset = true,
            // Two toggles in one frame cancel out
            InputSignal::ToggleAutopilot => self.toggle_autopilot = !self.toggle_autopilot,
        }
    }

    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset)
    }

    pub fn take_autopilot_toggle(&mut self) -> bool {
        std::mem::take(&mut self.toggle_autopilot)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
