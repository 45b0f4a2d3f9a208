//! LimitEngine: turns a limit in minutes into a game setting.
//!
//! Each timed game mode (TimeAttack, Laps, TeamAttack, Chase) has its own
//! time-limit setting on the server.  Only the setting of the mode that is
//! currently active is written; the others keep whatever value they had.

use std::sync::Arc;

use maptime_core::{Config, GameMode, LimitUnit, Override};
use tracing::debug;

use crate::application::host::{HostError, ModeSettings};

/// Returns the override's limit if there is one, else the store default.
pub fn resolve_effective_limit(config: &Config, found: Option<&Override>) -> f64 {
    found.map_or(config.default_limit_minutes, |o| o.limit_minutes)
}

/// What [`LimitEngine::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The limit was written to `mode` and published.
    Written {
        mode: GameMode,
        value: i64,
        unit: LimitUnit,
    },
    /// The active mode has no time limit; nothing was written.
    NoTimedMode { mode: GameMode },
}

/// Writes limits into the host's game settings.
#[derive(Clone)]
pub struct LimitEngine {
    settings: Arc<dyn ModeSettings>,
}

impl LimitEngine {
    pub fn new(settings: Arc<dyn ModeSettings>) -> Self {
        Self { settings }
    }

    /// Converts `minutes` to the host unit and writes it to the active mode.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Publish`] if the host rejects the settings change.
    pub fn apply(&self, minutes: f64) -> Result<Applied, HostError> {
        let mode = self.settings.active_mode();
        if !mode.has_time_limit() {
            debug!(?mode, "active game mode has no time limit, nothing to apply");
            return Ok(Applied::NoTimedMode { mode });
        }

        let unit = self.settings.limit_unit();
        let value = unit.from_minutes(minutes);
        self.settings.write_time_limit(mode, value);
        self.settings.publish()?;

        debug!(?mode, value, ?unit, "time limit written");
        Ok(Applied::Written { mode, value, unit })
    }
}
