//! Application core: pure domain logic, zero I/O.
//!
//! The behavior sequence and its orchestration.  All interaction with
//! hardware happens through the **port traits** in [`ports`].

pub mod events;
pub mod ports;
pub mod service;
