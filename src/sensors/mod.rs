//! Sensor subsystem.
//!
//! The prop has a single input: an HC-SR04 style ultrasonic ranger.  The
//! driver lives in [`ultrasonic`]; this module holds the sample type that
//! the state machine consumes and the clock seam the driver times echoes
//! with.

pub mod ultrasonic;

use crate::config::ECHO_US_PER_INCH;

/// One range measurement.
///
/// `width == 0` means the sensor timed out.  It is *not* a zero distance
/// and [`is_valid`](Self::is_valid) is false for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DistanceSample {
    /// Echo pulse width in microseconds.
    pub width: u32,
    /// Distance to the target in whole inches.
    pub inches: u32,
}

impl DistanceSample {
    pub const TIMEOUT: Self = Self { width: 0, inches: 0 };

    /// Convert an echo width to a sample.  The echo travels out and back,
    /// hence the halving.
    pub const fn from_width(width: u32) -> Self {
        Self {
            width,
            inches: width / ECHO_US_PER_INCH / 2,
        }
    }

    /// Sample whose width corresponds exactly to `inches`.
    pub const fn from_inches(inches: u32) -> Self {
        Self::from_width(inches * ECHO_US_PER_INCH * 2)
    }

    pub const fn is_valid(&self) -> bool {
        self.width > 0
    }
}

/// Free-running microsecond counter used to time the echo pulse.
pub trait EchoClock {
    /// Microseconds since an arbitrary epoch.  Must be monotonic; wrapping
    /// is tolerated.
    fn now_us(&mut self) -> u64;
}
