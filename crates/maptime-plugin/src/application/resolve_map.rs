//! MapResolver: finds the override that applies to the current or next map.
//!
//! Two different maps matter at two different moments:
//!
//! - `/limit` commands edit the map **in progress**, so they resolve
//!   [`MapQuery::Current`].
//! - Limits only take effect on a map change, so when a map ends the limit
//!   for the **upcoming** map has to be staged.  End-of-map therefore
//!   resolves [`MapQuery::Next`].

use std::sync::Arc;

use maptime_core::{Config, MapInfo, Override};

use crate::application::host::{HostError, MapDirectory};

/// Which map to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapQuery {
    Current,
    Next,
}

/// A map and the override stored for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub map: MapInfo,
    pub found: Option<Override>,
}

/// Resolves maps against a [`Config`].
#[derive(Clone)]
pub struct MapResolver {
    maps: Arc<dyn MapDirectory>,
}

impl MapResolver {
    pub fn new(maps: Arc<dyn MapDirectory>) -> Self {
        Self { maps }
    }

    /// Asks the host for the current or next map.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the host query fails or the map has a blank
    /// file name, which the store cannot key an override on.
    pub fn query(&self, which: MapQuery) -> Result<MapInfo, HostError> {
        let (query, map) = match which {
            MapQuery::Current => ("current_map", self.maps.current_map()?),
            MapQuery::Next => ("next_map", self.maps.next_map()?),
        };
        if map.file_name.trim().is_empty() {
            return Err(HostError::Query {
                query,
                reason: format!("map {:?} has no file name", map.plain_name()),
            });
        }
        Ok(map)
    }

    /// Queries the map and looks up its override in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the host query fails.
    pub fn resolve(&self, config: &Config, which: MapQuery) -> Result<Resolution, HostError> {
        let map = self.query(which)?;
        let found = config.find_override(&map.file_name).cloned();
        Ok(Resolution { map, found })
    }
}
