//! Werewolf prop firmware library.
//!
//! Everything except the binary's wiring lives here so the sequence,
//! motion and sensor logic can be exercised on the host.  ESP-IDF-only
//! code is guarded by `#[cfg(target_os = "espidf")]`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod motion;
pub mod phase;
pub mod pins;
pub mod sensors;
