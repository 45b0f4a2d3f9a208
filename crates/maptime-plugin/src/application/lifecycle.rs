//! LifecycleHooks: applies limits when a map ends and when the server stops.
//!
//! A time limit only takes effect when a map is loaded, so the limit for the
//! upcoming map is staged while the current one is ending.  On shutdown the
//! server default is restored so a fresh start never inherits a per-map
//! override.

use std::sync::Arc;

use maptime_core::{format_minutes, MapInfo};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::apply_limit::{resolve_effective_limit, Applied, LimitEngine};
use crate::application::config_store::{ConfigStore, StoreError};
use crate::application::host::HostError;
use crate::application::resolve_map::{MapQuery, MapResolver};

/// Error type for lifecycle hooks.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Where an applied limit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    Override,
    Default,
}

/// The limit a hook applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitChange {
    /// The map the limit was staged for; `None` on shutdown or when the next
    /// map could not be determined.
    pub map: Option<MapInfo>,
    pub minutes: f64,
    pub source: LimitSource,
    pub applied: Applied,
}

#[derive(Clone)]
pub struct LifecycleHooks {
    store: Arc<dyn ConfigStore>,
    resolver: MapResolver,
    engine: LimitEngine,
}

impl LifecycleHooks {
    pub fn new(store: Arc<dyn ConfigStore>, resolver: MapResolver, engine: LimitEngine) -> Self {
        Self {
            store,
            resolver,
            engine,
        }
    }

    /// Stages the next map's limit.
    ///
    /// If the next map cannot be determined the server default is applied.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] if the store cannot be loaded and
    /// [`LifecycleError::Host`] if the settings cannot be published.
    pub fn on_end_map(&self) -> Result<LimitChange, LifecycleError> {
        let config = self.store.load()?;

        let (map, found) = match self.resolver.resolve(&config, MapQuery::Next) {
            Ok(resolution) => (Some(resolution.map), resolution.found),
            Err(e) => {
                warn!("next map unknown, applying default limit: {e}");
                (None, None)
            }
        };

        let minutes = resolve_effective_limit(&config, found.as_ref());
        let applied = self.engine.apply(minutes)?;

        let source = if found.is_some() {
            if let Some(map) = &map {
                info!(
                    map = %map.file_name,
                    "custom limit of {}min staged for next map",
                    format_minutes(minutes)
                );
            }
            LimitSource::Override
        } else {
            LimitSource::Default
        };

        Ok(LimitChange {
            map,
            minutes,
            source,
            applied,
        })
    }

    /// Restores the server default limit.
    ///
    /// # Errors
    ///
    /// Same as [`Self::on_end_map`].
    pub fn on_shutdown(&self) -> Result<LimitChange, LifecycleError> {
        let config = self.store.load()?;
        let minutes = config.default_limit_minutes;
        let applied = self.engine.apply(minutes)?;

        info!("default limit of {}min restored", format_minutes(minutes));
        Ok(LimitChange {
            map: None,
            minutes,
            source: LimitSource::Default,
            applied,
        })
    }
}
