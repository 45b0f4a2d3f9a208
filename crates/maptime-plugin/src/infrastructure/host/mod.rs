//! Host adapters.
//!
//! Only the in-process [`simulated::SimulatedServer`] ships here.  Adapters
//! for real server controllers implement the same traits from
//! [`crate::application::host`].

pub mod simulated;
