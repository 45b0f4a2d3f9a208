//! Application layer use cases for the maptime plugin.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `maptime-core`) and the infrastructure (files, the
//! game server, the console).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil an operator goal (e.g., "give
//!   this map a 3.5 minute limit").
//! - **Depend on abstractions** (traits in [`host`] and [`config_store`])
//!   rather than concrete implementations, so a different game server
//!   controller can be plugged in without changing this code.
//! - **Contain no OS calls, no network I/O, no file system access**.
//!
//! # Sub-modules
//!
//! - **`host`** – Collaborator traits the game server must provide.
//! - **`config_store`** – The persistence port for the override store.
//! - **`resolve_map`** – Looks up the current or next map and its override.
//! - **`apply_limit`** – Computes the effective limit and writes it into the
//!   active game mode's settings.
//! - **`process_command`** – The `/limit` chat command with permission gating.
//! - **`lifecycle`** – End-of-map and shutdown triggers.
//! - **`plugin`** – The facade a host registers its callbacks against.

pub mod apply_limit;
pub mod config_store;
pub mod host;
pub mod lifecycle;
pub mod plugin;
pub mod process_command;
pub mod resolve_map;
