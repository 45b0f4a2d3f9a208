//! `maptime`: runs the plugin against a simulated game server.
//!
//! Reads console events from stdin (see
//! [`maptime_plugin::infrastructure::console`]) and prints chat output to
//! stdout.  The override store is a real `maptime.xml`, so this binary is
//! also a convenient way to inspect or edit a server's store.
//!
//! # Usage
//!
//! ```text
//! maptime [OPTIONS]
//!
//! Options:
//!   --profile <PATH>  Server profile (TOML)       [env: MAPTIME_PROFILE]
//!   --store   <PATH>  Override store location     [env: MAPTIME_STORE]
//!   --dry-run         Keep the store in memory, never write to disk
//! ```
//!
//! # Example session
//!
//! ```text
//! $ printf 'owner /limit 3.5\nendmap\nstatus\n' | maptime --profile server.toml
//! [all] Custom time limit of 3.5min set for A01
//! ...
//! ```

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use maptime_plugin::application::config_store::ConfigStore;
use maptime_plugin::application::host::HostServices;
use maptime_plugin::infrastructure::console::{parse_line, ConsoleEvent};
use maptime_plugin::infrastructure::host::simulated::SimulatedServer;
use maptime_plugin::infrastructure::storage::memory::MemoryStore;
use maptime_plugin::infrastructure::storage::profile::load_profile;
use maptime_plugin::infrastructure::storage::xml_store::XmlFileStore;
use maptime_plugin::MaptimePlugin;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Per-map time limits for a simulated dedicated server.
#[derive(Debug, Parser)]
#[command(name = "maptime", about = "Per-map time-limit overrides", version)]
struct Cli {
    /// Server profile: map rotation, game mode, roles.
    ///
    /// A missing file is not an error; built-in defaults are used.
    #[arg(long, env = "MAPTIME_PROFILE")]
    profile: Option<PathBuf>,

    /// Override store location.  Takes precedence over the profile's
    /// `store_path`.
    #[arg(long, env = "MAPTIME_STORE")]
    store: Option<PathBuf>,

    /// Keep the store in memory; nothing is written to disk.
    #[arg(long)]
    dry_run: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let profile = load_profile(cli.profile.as_deref()).context("failed to load server profile")?;

    // Level is overridden by `RUST_LOG`.  Logs go to stderr so stdout carries
    // chat only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&profile.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = Arc::new(
        SimulatedServer::new(profile.rotation(), profile.mode, profile.limit_unit)
            .with_roles(profile.roles.to_lookup()),
    );

    let store: Arc<dyn ConfigStore> = if cli.dry_run {
        info!("dry run, store kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        let path = cli.store.unwrap_or(profile.store_path);
        info!(path = %path.display(), "using maptime store");
        Arc::new(XmlFileStore::new(path))
    };

    let plugin = MaptimePlugin::new(store, HostServices::from_single(Arc::clone(&server)))
        .context("failed to initialise maptime store")?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;

        let event = match parse_line(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        match event {
            ConsoleEvent::Chat { login, params } => {
                match plugin.on_chat_command(&login, &params) {
                    Ok(outcome) => debug!(?outcome, "limit command handled"),
                    // MaptimePlugin has already logged the error.
                    Err(_) => {}
                }
            }
            ConsoleEvent::EndMap => {
                match plugin.on_end_map() {
                    Ok(change) => debug!(?change, "end of map handled"),
                    // MaptimePlugin has already logged the error.
                    Err(_) => {}
                }
                if let Some(map) = server.advance_map() {
                    info!(map = %map.file_name, "next map started");
                }
            }
            ConsoleEvent::Status => print_status(&server),
            ConsoleEvent::Shutdown => break,
            ConsoleEvent::Ignore => {}
        }
        print_chat(&server);
    }

    match plugin.on_shutdown() {
        Ok(change) => debug!(?change, "shutdown handled"),
        // MaptimePlugin has already logged the error.
        Err(_) => {}
    }
    print_chat(&server);
    info!("maptime stopped");
    Ok(())
}

fn print_chat(server: &SimulatedServer) {
    for line in server.take_chat() {
        println!("{line}");
    }
}

fn print_status(server: &SimulatedServer) {
    let status = server.status();
    let name = |m: Option<maptime_core::MapInfo>| {
        m.map_or_else(|| "-".to_string(), |m| format!("{} ({})", m.plain_name(), m.file_name))
    };
    println!("current: {}", name(status.current));
    println!("next:    {}", name(status.next));
    println!("mode:    {:?} ({:?})", status.mode, status.unit);
    for (mode, value) in status.published {
        println!("limit:   {mode:?} = {value}");
    }
}
