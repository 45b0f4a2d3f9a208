//! `maptime.xml` persistence.
//!
//! # Self-healing
//!
//! The file is meant to be edited by hand, so it is read fresh on every call
//! to [`ConfigStore::load`].  What happens to a file that cannot be used:
//!
//! | Situation                         | Result                               |
//! |-----------------------------------|--------------------------------------|
//! | file does not exist               | default store written, returned      |
//! | not UTF-8 / not XML / field absent| default store written, warning      |
//! | bad entry, bad flag, bad default  | entry repaired, warning per repair   |
//! | other read error (permissions...) | [`StoreError::Io`]                   |
//!
//! # Atomic save
//!
//! Saves write `<file>.tmp` next to the store and rename it over the original,
//! so a crash mid-write leaves either the old or the new document on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use maptime_core::{decode_document, encode_document, Config};
use tracing::{info, warn};

use crate::application::config_store::{ConfigStore, StoreError};

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "maptime.xml";

/// File-backed [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct XmlFileStore {
    path: PathBuf,
}

impl XmlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces an unusable file with the default store.
    fn regenerate(&self) -> Result<Config, StoreError> {
        let config = Config::default();
        self.save(&config).map_err(|e| StoreError::Initialize {
            path: self.path.clone(),
            source: Box::new(e),
        })?;
        info!(path = %self.path.display(), "default maptime store written");
        Ok(config)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigStore for XmlFileStore {
    fn load(&self) -> Result<Config, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.regenerate(),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %self.path.display(), "store is not valid UTF-8, regenerating");
                return self.regenerate();
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };

        match decode_document(&content) {
            Ok((config, report)) => {
                for repair in &report.repairs {
                    warn!(path = %self.path.display(), "store repaired: {repair}");
                }
                Ok(config)
            }
            Err(e) => {
                warn!(path = %self.path.display(), "store unusable ({e}), regenerating");
                self.regenerate()
            }
        }
    }

    fn save(&self, config: &Config) -> Result<(), StoreError> {
        let document = encode_document(config)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, document).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
