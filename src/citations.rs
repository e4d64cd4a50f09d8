//! Citations shown on the game-over screen
//!
//! Loaded asynchronously at startup. If the list never arrives the
//! game-over flourish is simply skipped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CitationError {
    #[error("citation list is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to fetch citations: {0}")]
    Fetch(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub quote: String,
    /// Link to where the quote came from
    #[serde(alias = "link", alias = "url")]
    pub source: String,
}

pub fn parse_citations(json: &str) -> Result<Vec<Citation>, CitationError> {
    Ok(serde_json::from_str(json)?)
}

/// Loaded citations, empty until the fetch completes
#[derive(Debug, Clone, Default)]
pub struct CitationBook {
    entries: Vec<Citation>,
}

impl CitationBook {
    pub fn new(entries: Vec<Citation>) -> Self {
        Self { entries }
    }

    pub fn replace(&mut self, entries: Vec<Citation>) {
        log::info!("Loaded {} citations", entries.len());
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly random citation, if any are loaded
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Citation> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        self.entries.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_parse() {
        let json = r#"[
            { "quote": "Life finds a way.", "source": "https://example.org/a" },
            { "quote": "Clever girl.", "link": "https://example.org/b" }
        ]"#;
        let list = parse_citations(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].source, "https://example.org/b");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_citations(r#"{"quote": "x"}"#),
            Err(CitationError::Json(_))
        ));
    }

    #[test]
    fn test_empty_book_picks_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(CitationBook::default().pick(&mut rng).is_none());
    }

    #[test]
    fn test_pick_from_loaded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut book = CitationBook::default();
        book.replace(vec![Citation {
            quote: "Hold on to your butts.".into(),
            source: "https://example.org/c".into(),
        }]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.pick(&mut rng).map(|c| c.quote.as_str()), Some("Hold on to your butts."));
    }
}
