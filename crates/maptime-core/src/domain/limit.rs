//! Game modes and time-limit unit conversion.
//!
//! Limits are stored in minutes because that is what operators type.  Game
//! servers expect whole seconds or milliseconds, and only some game modes
//! have a time limit at all: in Rounds or Cup the round ends when players
//! finish, so there is nothing to write.

use serde::{Deserialize, Serialize};

/// The game mode the server is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Rounds,
    TimeAttack,
    Team,
    Laps,
    Cup,
    TeamAttack,
    Chase,
}

impl GameMode {
    /// Returns `true` for modes that expose an independent time-limit setting.
    pub fn has_time_limit(self) -> bool {
        matches!(
            self,
            GameMode::TimeAttack | GameMode::Laps | GameMode::TeamAttack | GameMode::Chase
        )
    }
}

/// The unit a host expects for time-limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitUnit {
    #[default]
    Seconds,
    Milliseconds,
}

impl LimitUnit {
    /// Converts minutes to this unit, truncating toward zero.
    ///
    /// Out-of-range values saturate at the `i64` bounds.
    pub fn from_minutes(self, minutes: f64) -> i64 {
        let factor = match self {
            LimitUnit::Seconds => 60.0,
            LimitUnit::Milliseconds => 60.0 * 1000.0,
        };
        (minutes * factor).trunc() as i64
    }
}

/// Formats a limit the way it is shown to players and written to the store:
/// shortest decimal form, no trailing `.0`.
pub fn format_minutes(minutes: f64) -> String {
    if minutes == 0.0 {
        // Avoids printing "-0".
        return "0".to_string();
    }
    format!("{minutes}")
}
