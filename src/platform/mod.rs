//! Platform abstraction layer
//!
//! Browser glue the core calls through narrow interfaces:
//! - Name prompt (`window.prompt`)
//! - Citation fetch
//! - Tuning override lookup (LocalStorage)
//!
//! High score storage lives with the record type in `highscores`.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
use crate::tuning::Tuning;

/// Native tuning override: optional JSON file given as the first argument
#[cfg(not(target_arch = "wasm32"))]
pub fn load_tuning(path: Option<&std::path::Path>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Tuning::from_json_or_default(&json),
        Err(e) => {
            log::warn!("Cannot read tuning file {}: {}", path.display(), e);
            Tuning::default()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::path::Path::new("/nonexistent/dino-dash/tuning.json");
        assert_eq!(load_tuning(Some(path)), Tuning::default());
        assert_eq!(load_tuning(None), Tuning::default());
    }
}
