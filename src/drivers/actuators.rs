//! Body actuator bank: lift solenoid, breathing motor, howl relay.
//!
//! Each output is a plain `embedded-hal` [`OutputPin`] with a fixed
//! [`ActiveLevel`].  Callers speak in logical terms (`true` = active); the
//! bank turns that into the right electrical level.  Output only, there is
//! no read-back.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::ActuatorPort;
use crate::error::ActuatorError;
use crate::pins::{self, ActiveLevel};

struct Channel<P> {
    pin: P,
    active: ActiveLevel,
    name: &'static str,
}

impl<P: OutputPin> Channel<P> {
    fn set(&mut self, active: bool) {
        let high = self.active.level_for(active);
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("{}: {}", self.name, ActuatorError::GpioWriteFailed);
        }
    }
}

pub struct ActuatorBank<L, B, H> {
    lift: Channel<L>,
    breathing: Channel<B>,
    howl: Channel<H>,
}

impl<L, B, H> ActuatorBank<L, B, H>
where
    L: OutputPin,
    B: OutputPin,
    H: OutputPin,
{
    /// Wrap the three pins using the board polarities from [`pins`] and
    /// drive every output to its inactive level.
    pub fn new(lift: L, breathing: B, howl: H) -> Self {
        Self::with_levels(
            (lift, pins::LIFT_ACTIVE),
            (breathing, pins::BREATHING_ACTIVE),
            (howl, pins::HOWL_ACTIVE),
        )
    }

    pub fn with_levels(
        lift: (L, ActiveLevel),
        breathing: (B, ActiveLevel),
        howl: (H, ActiveLevel),
    ) -> Self {
        let mut bank = Self {
            lift: Channel { pin: lift.0, active: lift.1, name: "lift" },
            breathing: Channel { pin: breathing.0, active: breathing.1, name: "breathing" },
            howl: Channel { pin: howl.0, active: howl.1, name: "howl" },
        };
        bank.all_inactive();
        bank
    }

    pub fn all_inactive(&mut self) {
        self.lift.set(false);
        self.breathing.set(false);
        self.howl.set(false);
    }

    pub fn release(self) -> (L, B, H) {
        (self.lift.pin, self.breathing.pin, self.howl.pin)
    }
}

impl<L, B, H> ActuatorPort for ActuatorBank<L, B, H>
where
    L: OutputPin,
    B: OutputPin,
    H: OutputPin,
{
    fn set_lift(&mut self, active: bool) {
        self.lift.set(active);
    }

    fn set_breathing(&mut self, active: bool) {
        self.breathing.set(active);
    }

    fn set_howl(&mut self, active: bool) {
        self.howl.set(active);
    }
}
