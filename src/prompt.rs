//! Player name prompt
//!
//! Asking for a name is a request/response capability: the session calls
//! `request` once and polls every frame until an answer arrives. The
//! simulation never waits on it.

use crate::consts::{DEFAULT_PLAYER_NAME, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStatus {
    /// Nothing was requested
    Idle,
    /// Waiting for the player
    Pending,
    /// Player answered; `None` means cancelled
    Answered(Option<String>),
}

pub trait NamePrompt {
    fn request(&mut self, score: u64);
    /// Returns `Answered` at most once per request
    fn poll(&mut self) -> PromptStatus;
}

/// Turn a raw answer into a storable name
pub fn resolve_name(answer: Option<String>) -> String {
    let name = answer.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    name.chars().take(MAX_NAME_LEN).collect()
}

/// Answers every request immediately with the same value
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt {
    answer: Option<String>,
    requested: bool,
}

impl FixedPrompt {
    pub fn new(answer: Option<String>) -> Self {
        Self {
            answer,
            requested: false,
        }
    }
}

impl NamePrompt for FixedPrompt {
    fn request(&mut self, score: u64) {
        log::debug!("Name requested for score {}", score);
        self.requested = true;
    }

    fn poll(&mut self) -> PromptStatus {
        if std::mem::take(&mut self.requested) {
            PromptStatus::Answered(self.answer.clone())
        } else {
            PromptStatus::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve_name(Some("  Rex ".into())), "Rex");
        assert_eq!(resolve_name(Some("   ".into())), DEFAULT_PLAYER_NAME);
        assert_eq!(resolve_name(None), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_resolve_name_truncates() {
        let long = "x".repeat(100);
        assert_eq!(resolve_name(Some(long)).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_fixed_prompt_answers_once() {
        let mut prompt = FixedPrompt::new(Some("Bot".into()));
        assert_eq!(prompt.poll(), PromptStatus::Idle);
        prompt.request(10);
        assert_eq!(prompt.poll(), PromptStatus::Answered(Some("Bot".into())));
        assert_eq!(prompt.poll(), PromptStatus::Idle);
    }
}
