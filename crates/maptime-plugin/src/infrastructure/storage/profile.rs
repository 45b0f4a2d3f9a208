//! TOML server profile for the `maptime` binary.
//!
//! The profile describes the simulated server the plugin runs against: the
//! map rotation, the game mode, the unit the server expects time limits in,
//! and which logins hold which role.  Example:
//!
//! ```toml
//! store_path = "maptime.xml"
//! log_level = "info"
//! mode = "time_attack"
//! limit_unit = "milliseconds"
//!
//! [[maps]]
//! file_name = "Campaign/A01.Map.Gbx"
//! name = "$fffA01"
//!
//! [roles]
//! master_admins = ["owner"]
//! admins = ["alice"]
//! operators = ["bob"]
//! ```
//!
//! Every field is optional; a missing profile file gives the defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use maptime_core::{GameMode, LimitUnit, MapInfo, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::storage::xml_store::DEFAULT_STORE_FILE;

/// Error type for profile loading.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A file system I/O error occurred.
    #[error("I/O error reading profile at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse profile TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Profile schema ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerProfile {
    /// Location of the override store.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_mode")]
    pub mode: GameMode,
    #[serde(default)]
    pub limit_unit: LimitUnit,
    /// Map rotation, in play order.
    #[serde(default = "default_maps")]
    pub maps: Vec<MapEntry>,
    #[serde(default)]
    pub roles: RolesConfig,
}

/// One map of the rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapEntry {
    pub file_name: String,
    /// Display name, may contain style codes.  Defaults to the file name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Logins per role.  Logins not listed are players.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RolesConfig {
    #[serde(default)]
    pub master_admins: Vec<String>,
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub operators: Vec<String>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_mode() -> GameMode {
    GameMode::TimeAttack
}
fn default_maps() -> Vec<MapEntry> {
    ["A", "B", "C"]
        .into_iter()
        .map(|id| MapEntry {
            file_name: format!("{id}.Map.Gbx"),
            name: Some(format!("$o{id}")),
        })
        .collect()
}

impl Default for ServerProfile {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            log_level: default_log_level(),
            mode: default_mode(),
            limit_unit: LimitUnit::default(),
            maps: default_maps(),
            roles: RolesConfig::default(),
        }
    }
}

impl ServerProfile {
    /// The rotation as host map records.
    pub fn rotation(&self) -> Vec<MapInfo> {
        self.maps
            .iter()
            .map(|m| {
                let name = m.name.clone().unwrap_or_else(|| m.file_name.clone());
                MapInfo::new(m.file_name.clone(), name)
            })
            .collect()
    }
}

impl RolesConfig {
    /// Flattens the lists into a login lookup.  A login listed under several
    /// roles gets the highest one.
    pub fn to_lookup(&self) -> HashMap<String, Role> {
        let mut lookup = HashMap::new();
        let groups = [
            (&self.operators, Role::Operator),
            (&self.admins, Role::Admin),
            (&self.master_admins, Role::MasterAdmin),
        ];
        for (logins, role) in groups {
            for login in logins {
                lookup.insert(login.clone(), role);
            }
        }
        lookup
    }
}

/// Loads the profile at `path`, or the defaults if `path` is `None` or the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ProfileError::Io`] for read failures other than "not found",
/// and [`ProfileError::Parse`] if the TOML is malformed.
pub fn load_profile(path: Option<&Path>) -> Result<ServerProfile, ProfileError> {
    let Some(path) = path else {
        return Ok(ServerProfile::default());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerProfile::default()),
        Err(e) => Err(ProfileError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
