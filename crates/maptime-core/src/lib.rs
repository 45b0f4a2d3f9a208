//! # maptime-core
//!
//! Shared library for Maptime containing the override store model, the
//! `/limit` command grammar, and the XML document codec used to persist the
//! store.
//!
//! This crate has zero dependencies on the file system, the game server, or
//! any chat transport.  Everything here can be unit-tested in isolation.
//!
//! # Architecture overview (for beginners)
//!
//! Maptime lets server operators give individual maps their own round time
//! limit.  When a map ends, the limit for the *upcoming* map is looked up and
//! written into the active game mode's settings; when the server shuts down
//! the server-wide default is restored.
//!
//! This crate (`maptime-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The `Config` / `Override` store model, player roles and the
//!   permission policy, game modes and time-limit unit conversion, and map
//!   display-name handling.
//!
//! - **`command`** – Parsing of `/limit` parameters into a typed
//!   [`LimitCommand`], plus the [`Notice`] messages sent back to players.
//!
//! - **`document`** – How a `Config` becomes bytes on disk and back again.
//!   The store is an XML document whose map identifiers are percent-encoded.

pub mod command;
pub mod document;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `maptime_core::Config` instead of `maptime_core::domain::config::Config`.
pub use command::notice::Notice;
pub use command::{parse_minutes, LimitCommand};
pub use document::codec::{decode_document, encode_document, DecodeReport, DocumentError};
pub use domain::config::{Config, Override, DEFAULT_LIMIT_MINUTES};
pub use domain::limit::{format_minutes, GameMode, LimitUnit};
pub use domain::map::{strip_styles, MapInfo};
pub use domain::permission::{Permissions, Role};
