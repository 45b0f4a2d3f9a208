//! Storage infrastructure.
//!
//! - `xml_store`: the `maptime.xml` override store on disk.
//! - `memory`: the same store kept in memory, for tests and dry runs.
//! - `profile`: the TOML server profile read by the `maptime` binary.

pub mod memory;
pub mod profile;
pub mod xml_store;
