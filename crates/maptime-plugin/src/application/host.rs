//! Collaborator traits provided by the game server host.
//!
//! Server controllers differ in how they query maps, store mode settings and
//! look up admins.  Each controller gets an adapter implementing these traits;
//! the use cases only ever see the traits.  The repository ships one adapter,
//! [`crate::infrastructure::host::simulated::SimulatedServer`].

use std::sync::Arc;

use maptime_core::{GameMode, LimitUnit, MapInfo, Notice, Role};
use thiserror::Error;

/// Error type for host calls.
#[derive(Debug, Error)]
pub enum HostError {
    /// A query to the server failed or returned an unusable reply.
    #[error("host query {query} failed: {reason}")]
    Query { query: &'static str, reason: String },

    /// Publishing changed game settings failed.
    #[error("failed to publish game settings: {0}")]
    Publish(String),
}

/// Access to the map rotation.
#[cfg_attr(test, mockall::automock)]
pub trait MapDirectory: Send + Sync {
    /// The map being played right now.
    fn current_map(&self) -> Result<MapInfo, HostError>;

    /// The map that will be loaded after the current one ends.
    fn next_map(&self) -> Result<MapInfo, HostError>;
}

/// Access to the game mode settings.
#[cfg_attr(test, mockall::automock)]
pub trait ModeSettings: Send + Sync {
    /// The mode the server is running.
    fn active_mode(&self) -> GameMode;

    /// The unit this host expects for time-limit values.
    fn limit_unit(&self) -> LimitUnit;

    /// Stages a new time limit for `mode`.  Takes effect after [`Self::publish`].
    fn write_time_limit(&self, mode: GameMode, value: i64);

    /// Pushes staged settings to the server.
    fn publish(&self) -> Result<(), HostError>;
}

/// Role lookup for players issuing commands.
#[cfg_attr(test, mockall::automock)]
pub trait Authority: Send + Sync {
    fn role_of(&self, login: &str) -> Role;
}

/// Chat output.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Sends a notice to every connected player.
    fn send_to_all(&self, notice: &Notice);

    /// Sends a notice to one player only.
    fn send_to(&self, login: &str, notice: &Notice);
}

/// The full set of host collaborators, as handed to the plugin.
#[derive(Clone)]
pub struct HostServices {
    pub maps: Arc<dyn MapDirectory>,
    pub settings: Arc<dyn ModeSettings>,
    pub authority: Arc<dyn Authority>,
    pub notifier: Arc<dyn Notifier>,
}

impl HostServices {
    /// Uses one object for every collaborator role.
    pub fn from_single<H>(host: Arc<H>) -> Self
    where
        H: MapDirectory + ModeSettings + Authority + Notifier + 'static,
    {
        Self {
            maps: Arc::clone(&host) as Arc<dyn MapDirectory>,
            settings: Arc::clone(&host) as Arc<dyn ModeSettings>,
            authority: Arc::clone(&host) as Arc<dyn Authority>,
            notifier: host as Arc<dyn Notifier>,
        }
    }
}
