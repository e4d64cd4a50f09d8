//! Browser implementations (WASM only)

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::citations::{Citation, CitationError, parse_citations};
use crate::prompt::{NamePrompt, PromptStatus};
use crate::tuning::Tuning;

/// LocalStorage key for balance overrides
const TUNING_KEY: &str = "dino_dash_tuning";

/// `window.prompt` based name entry.
///
/// The browser call blocks inside `request`, so the answer is ready by the
/// next poll.
#[derive(Debug, Default)]
pub struct BrowserPrompt {
    answer: Option<Option<String>>,
}

impl NamePrompt for BrowserPrompt {
    fn request(&mut self, score: u64) {
        let message = format!("New high score: {}! Enter your name:", score);
        let answer = web_sys::window()
            .and_then(|w| w.prompt_with_message_and_default(&message, "").ok())
            .flatten();
        self.answer = Some(answer);
    }

    fn poll(&mut self) -> PromptStatus {
        match self.answer.take() {
            Some(answer) => PromptStatus::Answered(answer),
            None => PromptStatus::Idle,
        }
    }
}

/// Fetch and parse the citation list
pub async fn fetch_citations(url: &str) -> Result<Vec<Citation>, CitationError> {
    let window = web_sys::window().ok_or_else(|| CitationError::Fetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| CitationError::Fetch(format!("{:?}", e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| CitationError::Fetch("not a Response".into()))?;
    if !response.ok() {
        return Err(CitationError::Fetch(format!("HTTP {}", response.status())));
    }

    let text = response
        .text()
        .map_err(|e| CitationError::Fetch(format!("{:?}", e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| CitationError::Fetch(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| CitationError::Fetch("body is not text".into()))?;

    parse_citations(&text)
}

/// Balance override from LocalStorage, defaults otherwise
pub fn load_tuning() -> Tuning {
    let raw = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .and_then(|s| s.get_item(TUNING_KEY).ok())
        .flatten();

    match raw {
        Some(json) => Tuning::from_json_or_default(&json),
        None => Tuning::default(),
    }
}
