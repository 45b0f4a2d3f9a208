//! Domain entities for Maptime.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application.  Domain code holds the rules that
//! make the system what it is (here: "a map has at most one custom limit",
//! "admins may edit limits only when the store allows it") and never imports
//! file-system, network or game-server APIs.  Outer layers depend on it; it
//! depends on nothing but the standard library.

/// The override store: default limit, permission flags, per-map overrides.
pub mod config;

/// Game modes and conversion of minutes into host time-limit units.
pub mod limit;

/// Map identity and display names.
pub mod map;

/// Issuer roles and the policy deciding who may edit limits.
pub mod permission;
