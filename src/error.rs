//! Unified error types for the werewolf firmware.
//!
//! `Error` is what bring-up returns.  `SensorTimeout` stays inside the range
//! sensor, where every variant collapses to a zero-width sample.  All types
//! are `Copy` so the echo busy-wait and bring-up never allocate.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Errors that stop the firmware before the sequence can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An actuator channel could not be acquired or driven.
    Actuator(ActuatorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor timeouts
// ---------------------------------------------------------------------------

/// Why an echo measurement produced no width.  Never propagated past the
/// range sensor: every variant degrades to a zero-width sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorTimeout {
    /// Echo was still high from a previous ping when the budget ran out.
    StalePulse,
    /// Echo never went high after the trigger pulse.
    NeverStarted,
    /// Echo stayed high longer than the budget (out of range or faulty).
    PulseTooLong,
    /// The trigger or echo pin reported a HAL error.
    PinFault,
}

impl fmt::Display for SensorTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StalePulse => write!(f, "previous echo pulse still in progress"),
            Self::NeverStarted => write!(f, "echo pulse never started"),
            Self::PulseTooLong => write!(f, "echo pulse maxed out"),
            Self::PinFault => write!(f, "trigger/echo pin fault"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The board driver refused to open the channel (rc or reason attached).
    ChannelOpen(&'static str),
    /// The channel's peripherals were already handed out.
    ChannelUnavailable(&'static str),
    /// A GPIO level write failed.
    GpioWriteFailed,
    /// A PWM duty write failed.
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelOpen(name) => write!(f, "{name} did not open"),
            Self::ChannelUnavailable(name) => write!(f, "{name} already taken"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
