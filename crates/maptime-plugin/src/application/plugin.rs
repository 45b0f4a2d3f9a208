//! MaptimePlugin: the object a server controller registers.
//!
//! The controller forwards three kinds of events: chat commands, map ends
//! and shutdown.  Each is routed to the use case that handles it.  Errors
//! are logged here, and only here, then returned so a controller that wants
//! to react to them can.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::apply_limit::LimitEngine;
use crate::application::config_store::{ConfigStore, StoreError};
use crate::application::host::HostServices;
use crate::application::lifecycle::{LifecycleError, LifecycleHooks, LimitChange};
use crate::application::process_command::{CommandError, CommandOutcome, CommandProcessor};
use crate::application::resolve_map::MapResolver;

pub struct MaptimePlugin {
    commands: CommandProcessor,
    lifecycle: LifecycleHooks,
}

impl MaptimePlugin {
    /// Chat command name, without the leading slash.
    pub const COMMAND: &'static str = "limit";

    /// Wires the plugin and loads the store once.
    ///
    /// Loading at startup creates the store file if it is missing, so a
    /// store location that cannot be written is reported before any player
    /// issues a command.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be loaded or created.
    pub fn new(store: Arc<dyn ConfigStore>, host: HostServices) -> Result<Self, StoreError> {
        let config = store.load()?;
        info!(
            overrides = config.overrides().len(),
            default = config.default_limit_minutes,
            "maptime store loaded"
        );

        let resolver = MapResolver::new(host.maps);
        Ok(Self {
            commands: CommandProcessor::new(
                Arc::clone(&store),
                resolver.clone(),
                host.authority,
                host.notifier,
            ),
            lifecycle: LifecycleHooks::new(store, resolver, LimitEngine::new(host.settings)),
        })
    }

    /// Handles `/limit <params>` from `login`.
    pub fn on_chat_command(&self, login: &str, params: &str) -> Result<CommandOutcome, CommandError> {
        self.commands.process(login, params).map_err(|e| {
            match &e {
                CommandError::Store(_) => {
                    error!(login, "limit command failed, change discarded: {e}")
                }
                CommandError::Host(_) => error!(login, "limit command failed: {e}"),
            }
            e
        })
    }

    /// Handles the end of the current map.
    pub fn on_end_map(&self) -> Result<LimitChange, LifecycleError> {
        self.lifecycle.on_end_map().map_err(|e| {
            error!("failed to apply limit for next map: {e}");
            e
        })
    }

    /// Handles server shutdown.
    pub fn on_shutdown(&self) -> Result<LimitChange, LifecycleError> {
        self.lifecycle.on_shutdown().map_err(|e| {
            error!("failed to restore default limit: {e}");
            e
        })
    }
}
