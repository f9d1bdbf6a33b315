//! Ultrasonic range sensor (HC-SR04 and clones).
//!
//! A 10 µs high pulse on TRIG starts a ping; the sensor answers with a high
//! pulse on ECHO whose width is the round-trip time of flight.  The trigger
//! fires first, then ECHO is watched.
//!
//! The echo is watched by busy-waiting, so a measurement blocks the calling
//! task.  Each of the three wait loops gives up after
//! [`MAX_ECHO_LOOPS`](crate::config::MAX_ECHO_LOOPS) polls; any give-up
//! collapses to a zero-width sample.
//!
//! The status LED is lit for the duration of each measurement.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, warn};

use super::{DistanceSample, EchoClock};
use crate::app::ports::RangePort;
use crate::config::{self, MAX_ECHO_LOOPS, TRIGGER_PULSE_US, TRIGGER_SETTLE_US};
use crate::error::SensorTimeout;

pub struct UltrasonicRanger<T, E, L, D, C> {
    trigger: T,
    echo: E,
    indicator: L,
    delay: D,
    clock: C,
    max_loops: u32,
}

impl<T, E, L, D, C> UltrasonicRanger<T, E, L, D, C>
where
    T: OutputPin,
    E: InputPin,
    L: OutputPin,
    D: DelayNs,
    C: EchoClock,
{
    pub fn new(trigger: T, echo: E, indicator: L, delay: D, clock: C) -> Self {
        Self {
            trigger,
            echo,
            indicator,
            delay,
            clock,
            max_loops: MAX_ECHO_LOOPS,
        }
    }

    /// Override the per-phase spin budget.
    pub fn with_max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops;
        self
    }

    /// Ping once and convert the echo to a distance.  Never fails: a timeout
    /// yields [`DistanceSample::TIMEOUT`].
    pub fn measure(&mut self) -> DistanceSample {
        if self.indicator.set_high().is_err() {
            debug!("status LED write failed");
        }
        let width = match self.try_ping() {
            Ok(w) => w,
            Err(e) => {
                if config::LOG_RANGE_SENSOR {
                    warn!("range: {e}");
                }
                0
            }
        };
        if self.indicator.set_low().is_err() {
            debug!("status LED write failed");
        }

        DistanceSample::from_width(width)
    }

    /// Fire the trigger, then time the echo with the configured budget.
    pub fn try_ping(&mut self) -> Result<u32, SensorTimeout> {
        self.fire_trigger()?;
        self.try_pulse_width(self.max_loops)
    }

    /// Echo width in µs, or 0 if any wait phase exhausted `max_loops`.
    /// Only reads ECHO; the caller fires the trigger.
    pub fn pulse_width(&mut self, max_loops: u32) -> u32 {
        match self.try_pulse_width(max_loops) {
            Ok(w) => w,
            Err(e) => {
                if config::LOG_RANGE_SENSOR {
                    warn!("range: {e}");
                }
                0
            }
        }
    }

    /// Time one echo pulse, with the reason for any failure.  Does not
    /// touch TRIG.
    pub fn try_pulse_width(&mut self, max_loops: u32) -> Result<u32, SensorTimeout> {
        // A: let any echo already in progress finish.
        self.spin_while(true, max_loops, SensorTimeout::StalePulse)?;

        // B: wait for the echo to start.
        self.spin_while(false, max_loops, SensorTimeout::NeverStarted)?;
        let rise = self.clock.now_us();

        // C: time the echo.
        self.spin_while(true, max_loops, SensorTimeout::PulseTooLong)?;
        let fall = self.clock.now_us();

        let width = fall.wrapping_sub(rise).min(u64::from(u32::MAX)) as u32;
        // A pulse too short for the clock to resolve still counts as a
        // real echo.
        Ok(width.max(1))
    }

    pub fn release(self) -> (T, E, L, D, C) {
        (self.trigger, self.echo, self.indicator, self.delay, self.clock)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn fire_trigger(&mut self) -> Result<(), SensorTimeout> {
        self.trigger.set_low().map_err(|_| SensorTimeout::PinFault)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high().map_err(|_| SensorTimeout::PinFault)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| SensorTimeout::PinFault)
    }

    /// Poll ECHO until it leaves `level`, or fail with `timeout` after
    /// `max_loops` polls.
    fn spin_while(
        &mut self,
        level: bool,
        max_loops: u32,
        timeout: SensorTimeout,
    ) -> Result<(), SensorTimeout> {
        let mut loops = 0u32;
        while self.echo.is_high().map_err(|_| SensorTimeout::PinFault)? == level {
            loops += 1;
            if loops >= max_loops {
                return Err(timeout);
            }
        }
        Ok(())
    }
}

impl<T, E, L, D, C> RangePort for UltrasonicRanger<T, E, L, D, C>
where
    T: OutputPin,
    E: InputPin,
    L: OutputPin,
    D: DelayNs,
    C: EchoClock,
{
    fn measure(&mut self) -> DistanceSample {
        UltrasonicRanger::measure(self)
    }
}
