//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below exercises one part of the prop against mock hardware.
//! All tests run on the host with no real hardware required.

mod mock_hw;
mod sequence_tests;
mod startup_tests;
