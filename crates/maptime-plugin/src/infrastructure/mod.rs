//! Infrastructure layer for the plugin.
//!
//! Contains the adapters behind the application ports: the XML store file,
//! the server profile, the simulated game server and the stdin console.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `maptime_core`, but application code MUST NOT import it outside tests.

pub mod console;
pub mod host;
pub mod storage;
