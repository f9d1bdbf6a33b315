//! PWM hobby-servo channel.
//!
//! Servos read the *width* of the high pulse, not the duty ratio, so the
//! channel is configured with a fixed period and the duty is expressed in
//! microseconds of that period.  Any `embedded-hal` [`SetDutyCycle`]
//! channel works; on the board it is an LEDC channel.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::ServoPort;
use crate::error::ActuatorError;

pub struct PwmServo<P> {
    pwm: P,
    period_us: u16,
    name: &'static str,
}

impl<P: SetDutyCycle> PwmServo<P> {
    pub fn new(pwm: P, period_us: u16, name: &'static str) -> Self {
        Self {
            pwm,
            period_us,
            name,
        }
    }

    pub fn period_us(&self) -> u16 {
        self.period_us
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> ServoPort for PwmServo<P> {
    fn set_duty_us(&mut self, duty_us: u16) {
        let duty = duty_us.min(self.period_us);
        if self
            .pwm
            .set_duty_cycle_fraction(duty, self.period_us)
            .is_err()
        {
            warn!("{}: {} ({}us)", self.name, ActuatorError::PwmWriteFailed, duty);
        }
    }
}
