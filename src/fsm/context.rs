//! Shared mutable context threaded through every phase handler.
//!
//! `SequenceContext` is the blackboard the handlers read from and write to:
//! the latest range sample, the actuator levels they want applied, the
//! sequence timings and trigger window, and a step counter that lets a
//! handler walk through its own sub-steps.

use crate::config::{SequenceTimings, TriggerWindow};
use crate::sensors::DistanceSample;

// ---------------------------------------------------------------------------
// Actuator commands (written by phase handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Logical on/off request for each body actuator.  Polarity is applied
/// later by the driver, so `true` always means "doing its thing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorCommands {
    /// Lift solenoid energised: body raised.
    pub lift: bool,
    /// Breathing motor running.
    pub breathing: bool,
    /// Howl sound playing.
    pub howl: bool,
}

impl ActuatorCommands {
    /// Everything at rest.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// SequenceContext
// ---------------------------------------------------------------------------

pub struct SequenceContext {
    // -- Timing --
    /// Completed handler steps since the current phase was entered.
    pub step_in_phase: u32,
    pub timings: SequenceTimings,

    // -- Sensor data --
    /// Latest sample, or `None` if the sensor was not polled this step.
    pub sample: Option<DistanceSample>,
    pub window: TriggerWindow,

    // -- Actuator outputs --
    pub commands: ActuatorCommands,

    /// Set when Lowering finishes; Panning consumes it as a one-off hold
    /// before the sensor is trusted again.
    pub cooldown_pending: bool,
}

impl SequenceContext {
    pub fn new(timings: SequenceTimings, window: TriggerWindow) -> Self {
        Self {
            step_in_phase: 0,
            timings,
            sample: None,
            window,
            commands: ActuatorCommands::all_off(),
            cooldown_pending: false,
        }
    }

    /// True when the latest sample is a real reading inside the window.
    pub fn target_in_range(&self) -> bool {
        self.sample
            .is_some_and(|s| s.is_valid() && self.window.contains(s.inches))
    }
}

impl Default for SequenceContext {
    fn default() -> Self {
        Self::new(SequenceTimings::DEFAULT, TriggerWindow::DEFAULT)
    }
}
