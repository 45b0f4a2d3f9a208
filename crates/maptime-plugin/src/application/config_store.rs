//! Persistence port for the override store.
//!
//! Use cases reload the store on every command and lifecycle event, so that
//! edits made to the file by hand between two events are always picked up.
//! Implementations must therefore not cache.

use std::path::PathBuf;

use maptime_core::{Config, DocumentError};
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config could not be encoded.
    #[error("failed to encode store: {0}")]
    Encode(#[from] DocumentError),

    /// The store was missing or unusable and a fresh one could not be written.
    #[error("could not create store at {path}: {source}")]
    Initialize {
        path: PathBuf,
        #[source]
        source: Box<StoreError>,
    },
}

/// Loads and saves the complete [`Config`].
pub trait ConfigStore: Send + Sync {
    /// Reads the persisted store.
    ///
    /// A missing or unusable store is replaced by `Config::default()`, which
    /// is persisted before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Initialize`] if the replacement cannot be written,
    /// and [`StoreError::Io`] for read failures other than a missing file.
    fn load(&self) -> Result<Config, StoreError>;

    /// Replaces the persisted store with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or writing fails.  The persisted
    /// store is left unchanged in that case.
    fn save(&self, config: &Config) -> Result<(), StoreError>;
}
