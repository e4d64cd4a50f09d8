//! High score record
//!
//! One best score with the name of whoever set it, persisted to
//! LocalStorage on web. A missing or corrupt entry reads as the default
//! record and is never surfaced as an error.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_PLAYER_NAME;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("stored high score is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

/// The best score so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u64,
    pub name: String,
}

impl Default for HighScoreRecord {
    fn default() -> Self {
        Self {
            score: 0,
            name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

impl HighScoreRecord {
    pub fn new(score: u64, name: impl Into<String>) -> Self {
        Self {
            score,
            name: name.into(),
        }
    }

    /// Only a strictly better score replaces the record
    #[inline]
    pub fn is_beaten_by(&self, score: u64) -> bool {
        score > self.score
    }
}

pub fn encode_record(record: &HighScoreRecord) -> Result<String, StorageError> {
    Ok(serde_json::to_string(record)?)
}

pub fn decode_record(json: &str) -> Result<HighScoreRecord, StorageError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a raw stored value, substituting the default on any failure
pub fn decode_or_default(raw: Option<&str>) -> HighScoreRecord {
    let Some(json) = raw else {
        log::info!("No high score found, starting fresh");
        return HighScoreRecord::default();
    };

    match decode_record(json) {
        Ok(record) => {
            log::info!("Loaded high score {} by {}", record.score, record.name);
            record
        }
        Err(e) => {
            log::warn!("{}; using default record", e);
            HighScoreRecord::default()
        }
    }
}

/// Where the record lives between sessions
pub trait HighScoreStore {
    /// Never fails; returns the default record when nothing usable is stored
    fn load(&self) -> HighScoreRecord;
    /// Called only when a finished session set a new record
    fn save(&mut self, record: &HighScoreRecord);
}

#[derive(Debug, Default)]
struct MemoryInner {
    raw: Option<String>,
    saves: usize,
}

/// In-memory store for native runs and tests.
///
/// Clones share the same backing cell, so a test can keep a handle after
/// moving one into a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw stored value (may be garbage)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().raw = Some(raw.into());
        store
    }

    pub fn with_record(record: &HighScoreRecord) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().raw = encode_record(record).ok();
        store
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> HighScoreRecord {
        decode_or_default(self.inner.borrow().raw.as_deref())
    }

    fn save(&mut self, record: &HighScoreRecord) {
        let mut inner = self.inner.borrow_mut();
        match encode_record(record) {
            Ok(json) => {
                inner.raw = Some(json);
                inner.saves += 1;
            }
            Err(e) => log::warn!("Failed to encode high score: {}", e),
        }
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dino_dash_highscore";

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> HighScoreRecord {
        let raw = match Self::storage() {
            Ok(storage) => storage.get_item(Self::STORAGE_KEY).ok().flatten(),
            Err(e) => {
                log::warn!("{}; using default record", e);
                None
            }
        };
        decode_or_default(raw.as_deref())
    }

    fn save(&mut self, record: &HighScoreRecord) {
        let result = Self::storage().and_then(|storage| {
            let json = encode_record(record)?;
            storage
                .set_item(Self::STORAGE_KEY, &json)
                .map_err(|_| StorageError::Unavailable)
        });
        match result {
            Ok(()) => log::info!("High score saved ({} by {})", record.score, record.name),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_improvement_only() {
        let record = HighScoreRecord::new(100, "Ada");
        assert!(!record.is_beaten_by(99));
        assert!(!record.is_beaten_by(100));
        assert!(record.is_beaten_by(101));
        assert!(!HighScoreRecord::default().is_beaten_by(0));
    }

    #[test]
    fn test_missing_reads_default() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), HighScoreRecord::default());
        assert_eq!(store.load().name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_corrupt_reads_default() {
        let store = MemoryStore::with_raw("{\"score\": \"lots\"");
        assert_eq!(store.load(), HighScoreRecord::default());
        assert!(matches!(
            decode_record("not json"),
            Err(StorageError::Malformed(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let handle = store.clone();
        store.save(&HighScoreRecord::new(321, "Grace"));

        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.load(), HighScoreRecord::new(321, "Grace"));
    }

    #[test]
    fn test_stored_format() {
        let json = encode_record(&HighScoreRecord::new(7, "Lin")).unwrap();
        assert_eq!(json, r#"{"score":7,"name":"Lin"}"#);
    }
}
