//! The override store model.
//!
//! A [`Config`] is the whole persisted state of Maptime: the server-wide
//! default limit, two permission flags, and an ordered list of per-map
//! [`Override`]s.
//!
//! # Uniqueness
//!
//! A map identifier appears at most once.  The override list is private so the
//! only way to add an entry is [`Config::upsert_override`], which updates an
//! existing entry in place instead of appending a duplicate.
//!
//! # Ordering
//!
//! Overrides keep insertion order.  The list is scanned linearly on lookup;
//! a server rotation holds tens to a few hundred maps, so a `Vec` is both
//! simpler and faster than a map here, and it serializes deterministically.

use crate::domain::permission::Permissions;

/// Server-wide limit used when no store exists yet, in minutes.
pub const DEFAULT_LIMIT_MINUTES: f64 = 5.0;

/// Returns `true` when `minutes` may be stored as a time limit.
pub fn is_valid_limit(minutes: f64) -> bool {
    minutes.is_finite() && minutes >= 0.0
}

/// A custom time limit for one map.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    /// Opaque, case-sensitive map key as reported by the server (file path).
    pub map_identifier: String,
    /// Limit in minutes.  Fractions are allowed (`3.5` = 3m30s).
    pub limit_minutes: f64,
}

/// Result of [`Config::upsert_override`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upsert {
    /// No entry existed; a new one was appended.
    Inserted,
    /// An entry existed; its limit was replaced.
    Updated { previous_minutes: f64 },
}

/// The complete persisted state.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Limit applied to every map without an override, in minutes.
    pub default_limit_minutes: f64,
    /// Whether admins (below master admins) may run `/limit`.
    pub allow_admins: bool,
    /// Whether operators may run `/limit`.
    pub allow_operators: bool,
    overrides: Vec<Override>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit_minutes: DEFAULT_LIMIT_MINUTES,
            allow_admins: true,
            allow_operators: false,
            overrides: Vec::new(),
        }
    }
}

impl Config {
    /// Creates an empty store with the given default and permission flags.
    pub fn new(default_limit_minutes: f64, allow_admins: bool, allow_operators: bool) -> Self {
        Self {
            default_limit_minutes,
            allow_admins,
            allow_operators,
            overrides: Vec::new(),
        }
    }

    /// All overrides in insertion order.
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// The permission flags as a policy value.
    pub fn permissions(&self) -> Permissions {
        Permissions {
            allow_admins: self.allow_admins,
            allow_operators: self.allow_operators,
        }
    }

    /// Finds the override for `map_identifier` by exact string comparison.
    pub fn find_override(&self, map_identifier: &str) -> Option<&Override> {
        self.overrides
            .iter()
            .find(|o| o.map_identifier == map_identifier)
    }

    /// Sets the limit for `map_identifier`, inserting an entry if none exists.
    pub fn upsert_override(&mut self, map_identifier: &str, limit_minutes: f64) -> Upsert {
        if let Some(existing) = self
            .overrides
            .iter_mut()
            .find(|o| o.map_identifier == map_identifier)
        {
            let previous_minutes = existing.limit_minutes;
            existing.limit_minutes = limit_minutes;
            return Upsert::Updated { previous_minutes };
        }

        self.overrides.push(Override {
            map_identifier: map_identifier.to_string(),
            limit_minutes,
        });
        Upsert::Inserted
    }

    /// Removes the override for `map_identifier`, returning it if present.
    pub fn remove_override(&mut self, map_identifier: &str) -> Option<Override> {
        let index = self
            .overrides
            .iter()
            .position(|o| o.map_identifier == map_identifier)?;
        Some(self.overrides.remove(index))
    }

    /// Removes every override and returns how many there were.
    pub fn clear_overrides(&mut self) -> usize {
        let count = self.overrides.len();
        self.overrides.clear();
        count
    }
}
