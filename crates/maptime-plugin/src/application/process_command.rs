//! CommandProcessor: the `/limit` chat command.
//!
//! Every invocation runs the same sequence:
//!
//! ```text
//! load store ──► permission gate ──► parse ──► mutate ──► save ──► confirm
//!                     │                 │                   │
//!                  denied            usage              save failed
//!               (issuer only)     (issuer only)          (discarded)
//! ```
//!
//! Confirmations are broadcast only after the store has been written, so
//! players never see a change that was not persisted.  Denied, invalid and
//! no-op commands never write the store.

use std::sync::Arc;

use maptime_core::domain::config::Upsert;
use maptime_core::{format_minutes, Config, LimitCommand, MapInfo, Notice, Override, Role};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::config_store::{ConfigStore, StoreError};
use crate::application::host::{Authority, HostError, Notifier};
use crate::application::resolve_map::{MapQuery, MapResolver};

/// Error type for the command use case.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// What a processed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The current map's limit was inserted or updated.
    LimitSet {
        map: MapInfo,
        minutes: f64,
        upsert: Upsert,
    },
    /// The current map's override was removed.
    LimitRemoved { map: MapInfo, removed: Override },
    /// `remove` on a map without an override.  Nothing happened.
    NothingToRemove { map: MapInfo },
    /// Every override was removed.
    AllRemoved { count: usize },
    /// The server default changed.
    DefaultSet { minutes: f64, previous_minutes: f64 },
    /// The parameters were not understood.
    Usage,
    /// The issuer may not edit limits.
    Denied { role: Role },
}

/// Handles `/limit` commands.
#[derive(Clone)]
pub struct CommandProcessor {
    store: Arc<dyn ConfigStore>,
    resolver: MapResolver,
    authority: Arc<dyn Authority>,
    notifier: Arc<dyn Notifier>,
}

impl CommandProcessor {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        resolver: MapResolver,
        authority: Arc<dyn Authority>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            resolver,
            authority,
            notifier,
        }
    }

    /// Runs `/limit <params>` on behalf of `login`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Store`] if the store cannot be read or the
    /// change cannot be written (the change is discarded), and
    /// [`CommandError::Host`] if the current map cannot be queried.
    pub fn process(&self, login: &str, params: &str) -> Result<CommandOutcome, CommandError> {
        let mut config = self.store.load()?;

        let role = self.authority.role_of(login);
        if !config.permissions().permits(role) {
            debug!(login, ?role, "limit command denied");
            self.notify(login, &Notice::PermissionDenied);
            return Ok(CommandOutcome::Denied { role });
        }

        match LimitCommand::parse(params) {
            LimitCommand::Remove => self.remove(login, &mut config),
            LimitCommand::RemoveAll => self.remove_all(login, &mut config),
            LimitCommand::Set { minutes } => self.set(login, &mut config, minutes),
            LimitCommand::SetDefault { minutes } => self.set_default(login, &mut config, minutes),
            LimitCommand::Invalid => {
                debug!(login, params, "invalid limit command");
                self.notify(login, &Notice::Usage);
                Ok(CommandOutcome::Usage)
            }
        }
    }

    fn remove(&self, login: &str, config: &mut Config) -> Result<CommandOutcome, CommandError> {
        let map = self.resolver.query(MapQuery::Current)?;
        let Some(removed) = config.remove_override(&map.file_name) else {
            return Ok(CommandOutcome::NothingToRemove { map });
        };

        self.store.save(config)?;
        info!(map = %map.file_name, "custom limit reverted to default");
        self.notify(
            login,
            &Notice::LimitRemoved {
                map_name: map.plain_name(),
            },
        );
        Ok(CommandOutcome::LimitRemoved { map, removed })
    }

    fn remove_all(&self, login: &str, config: &mut Config) -> Result<CommandOutcome, CommandError> {
        let count = config.clear_overrides();

        self.store.save(config)?;
        info!(count, "all custom limits reverted to default");
        self.notify(login, &Notice::AllLimitsRemoved);
        Ok(CommandOutcome::AllRemoved { count })
    }

    fn set(
        &self,
        login: &str,
        config: &mut Config,
        minutes: f64,
    ) -> Result<CommandOutcome, CommandError> {
        let map = self.resolver.query(MapQuery::Current)?;
        let upsert = config.upsert_override(&map.file_name, minutes);

        self.store.save(config)?;
        match upsert {
            Upsert::Inserted => info!(
                map = %map.file_name,
                "limit of {}min set",
                format_minutes(minutes)
            ),
            Upsert::Updated { previous_minutes } => info!(
                map = %map.file_name,
                "limit updated from {}min to {}min",
                format_minutes(previous_minutes),
                format_minutes(minutes)
            ),
        }
        self.notify(
            login,
            &Notice::LimitSet {
                minutes,
                map_name: map.plain_name(),
            },
        );
        Ok(CommandOutcome::LimitSet {
            map,
            minutes,
            upsert,
        })
    }

    fn set_default(
        &self,
        login: &str,
        config: &mut Config,
        minutes: f64,
    ) -> Result<CommandOutcome, CommandError> {
        let previous_minutes = config.default_limit_minutes;
        config.default_limit_minutes = minutes;

        self.store.save(config)?;
        info!("default limit of {}min set", format_minutes(minutes));
        self.notify(login, &Notice::DefaultSet { minutes });
        Ok(CommandOutcome::DefaultSet {
            minutes,
            previous_minutes,
        })
    }

    /// Private notices go to the issuer, the rest to every player.
    fn notify(&self, issuer: &str, notice: &Notice) {
        if notice.is_private() {
            self.notifier.send_to(issuer, notice);
        } else {
            self.notifier.send_to_all(notice);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
