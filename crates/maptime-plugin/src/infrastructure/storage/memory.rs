//! In-memory [`ConfigStore`].
//!
//! Keeps the encoded XML document rather than a `Config`, so every load and
//! save goes through the same codec as the file store.  Used by tests and
//! by the binary's `--dry-run` mode.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use maptime_core::{decode_document, encode_document, Config};
use tracing::warn;

use crate::application::config_store::{ConfigStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
    saves: AtomicU32,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// An empty store; the first load writes the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `document` verbatim.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            ..Self::default()
        }
    }

    /// A store holding the encoding of `config`.  Does not count as a save.
    /// If `config` cannot be encoded the store starts empty.
    pub fn with_config(config: &Config) -> Self {
        Self {
            document: Mutex::new(encode_document(config).ok()),
            ..Self::default()
        }
    }

    /// The stored document, if any.
    pub fn document(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Replaces the stored document, as a hand edit of the file would.
    pub fn set_document(&self, document: impl Into<String>) {
        *self.lock() = Some(document.into());
    }

    /// Number of successful saves, including regenerations.
    pub fn save_count(&self) -> u32 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Makes subsequent saves fail.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a complete document.
        self.document
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn regenerate(&self) -> Result<Config, StoreError> {
        let config = Config::default();
        self.save(&config).map_err(|e| StoreError::Initialize {
            path: "<memory>".into(),
            source: Box::new(e),
        })?;
        Ok(config)
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Config, StoreError> {
        let Some(document) = self.document() else {
            return self.regenerate();
        };

        match decode_document(&document) {
            Ok((config, report)) => {
                for repair in &report.repairs {
                    warn!("store repaired: {repair}");
                }
                Ok(config)
            }
            Err(e) => {
                warn!("store unusable ({e}), regenerating");
                self.regenerate()
            }
        }
    }

    fn save(&self, config: &Config) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: "<memory>".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "saves disabled"),
            });
        }

        let document = encode_document(config)?;
        *self.lock() = Some(document);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let store = MemoryStore::new();

        let cfg = store.load().unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(store.save_count(), 1);
        assert!(store.document().unwrap().contains("<maptime>"));
    }

    #[test]
    fn test_hand_edit_is_picked_up_on_next_load() {
        let store = MemoryStore::with_config(&Config::default());
        let mut edited = Config::new(9.0, true, true);
        edited.upsert_override("X", 1.5);

        store.set_document(encode_document(&edited).unwrap());

        assert_eq!(store.load().unwrap(), edited);
    }

    #[test]
    fn test_failed_save_keeps_previous_document() {
        let store = MemoryStore::with_config(&Config::default());
        let before = store.document();
        store.set_fail_saves(true);

        let result = store.save(&Config::new(1.0, false, false));

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.document(), before);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_regeneration_failure_is_initialize_error() {
        let store = MemoryStore::with_document("not xml");
        store.set_fail_saves(true);

        assert!(matches!(store.load(), Err(StoreError::Initialize { .. })));
    }
}
