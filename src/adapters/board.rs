//! ESP32-S3 board adapter.
//!
//! Implements [`BoardPort`] over `esp-idf-hal`: GPIO through `PinDriver`,
//! servos through one LEDC timer + channel each.  Every peripheral is taken
//! out of `Peripherals` once at construction and handed out at most once;
//! a second request gets [`ActuatorError::ChannelUnavailable`].

use esp_idf_hal::gpio::{
    AnyInputPin, AnyOutputPin, Input, InputPin as _, Output, OutputPin as _, PinDriver,
};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::EspError;
use log::{info, warn};

use crate::drivers::hw_init::{BoardPort, OutputChannel, ServoChannel};
use crate::drivers::servo::PwmServo;
use crate::error::ActuatorError;
use crate::pins;

/// 14 bits at 333 Hz gives roughly 0.18 µs per count.
const SERVO_RESOLUTION: Resolution = Resolution::Bits14;

type ServoOpener = Box<dyn FnOnce(u16) -> Result<LedcDriver<'static>, EspError>>;

/// Capture one LEDC timer, channel and pin in an opener.  The timer driver
/// is leaked: it must outlive the channel, which runs forever.
macro_rules! servo_opener {
    ($timer:expr, $channel:expr, $pin:expr) => {{
        let (timer, channel, pin) = ($timer, $channel, $pin);
        Box::new(move |period_us: u16| {
            let freq = Hertz(1_000_000 / u32::from(period_us.max(1)));
            let cfg = TimerConfig::new().frequency(freq).resolution(SERVO_RESOLUTION);
            let timer: &'static _ = Box::leak(Box::new(LedcTimerDriver::new(timer, &cfg)?));
            LedcDriver::new(channel, timer, pin)
        }) as ServoOpener
    }};
}

pub struct EspBoard {
    outputs: [Option<AnyOutputPin>; 5],
    echo: Option<AnyInputPin>,
    servos: [Option<ServoOpener>; 3],
}

impl EspBoard {
    pub fn new(p: Peripherals) -> Self {
        let pins = p.pins;
        let ledc = p.ledc;
        Self {
            // Indexed by `output_index`.
            outputs: [
                Some(pins.gpio1.downgrade_output()),
                Some(pins.gpio2.downgrade_output()),
                Some(pins.gpio3.downgrade_output()),
                Some(pins.gpio5.downgrade_output()),
                Some(pins.gpio8.downgrade_output()),
            ],
            echo: Some(pins.gpio6.downgrade_input()),
            // Indexed by `servo_index`.
            servos: [
                Some(servo_opener!(ledc.timer0, ledc.channel0, pins.gpio4)),
                Some(servo_opener!(ledc.timer1, ledc.channel1, pins.gpio7)),
                Some(servo_opener!(ledc.timer2, ledc.channel2, pins.gpio9)),
            ],
        }
    }
}

const fn output_index(ch: OutputChannel) -> (usize, i32) {
    match ch {
        OutputChannel::Lift => (0, pins::LIFT_GATE_GPIO),
        OutputChannel::Breathing => (1, pins::BREATHING_GPIO),
        OutputChannel::Howl => (2, pins::HOWL_GPIO),
        OutputChannel::Trigger => (3, pins::TRIGGER_GPIO),
        OutputChannel::StatusLed => (4, pins::STATUS_LED_GPIO),
    }
}

const fn servo_index(ch: ServoChannel) -> (usize, i32) {
    match ch {
        ServoChannel::HeadTurn => (0, pins::HEAD_TURN_SERVO_GPIO),
        ServoChannel::HeadLift => (1, pins::HEAD_LIFT_SERVO_GPIO),
        ServoChannel::Mouth => (2, pins::MOUTH_SERVO_GPIO),
    }
}

impl BoardPort for EspBoard {
    type Output = PinDriver<'static, AnyOutputPin, Output>;
    type Input = PinDriver<'static, AnyInputPin, Input>;
    type Servo = PwmServo<LedcDriver<'static>>;

    fn open_output(&mut self, ch: OutputChannel) -> Result<Self::Output, ActuatorError> {
        let (idx, gpio) = output_index(ch);
        let pin = self.outputs[idx]
            .take()
            .ok_or(ActuatorError::ChannelUnavailable(ch.name()))?;
        let driver = PinDriver::output(pin).map_err(|e| {
            warn!("board: {} (GPIO{}): {}", ch.name(), gpio, e);
            ActuatorError::ChannelOpen(ch.name())
        })?;
        info!("board: {} on GPIO{}", ch.name(), gpio);
        Ok(driver)
    }

    fn open_echo(&mut self) -> Result<Self::Input, ActuatorError> {
        let pin = self
            .echo
            .take()
            .ok_or(ActuatorError::ChannelUnavailable("range echo"))?;
        let driver = PinDriver::input(pin).map_err(|e| {
            warn!("board: range echo (GPIO{}): {}", pins::ECHO_GPIO, e);
            ActuatorError::ChannelOpen("range echo")
        })?;
        info!("board: range echo on GPIO{}", pins::ECHO_GPIO);
        Ok(driver)
    }

    fn open_servo(
        &mut self,
        ch: ServoChannel,
        period_us: u16,
    ) -> Result<Self::Servo, ActuatorError> {
        let (idx, gpio) = servo_index(ch);
        let opener = self.servos[idx]
            .take()
            .ok_or(ActuatorError::ChannelUnavailable(ch.name()))?;
        let ledc = opener(period_us).map_err(|e| {
            warn!("board: {} (GPIO{}): {}", ch.name(), gpio, e);
            ActuatorError::ChannelOpen(ch.name())
        })?;
        info!("board: {} on GPIO{}, period {}us", ch.name(), gpio, period_us);
        Ok(PwmServo::new(ledc, period_us, ch.name()))
    }
}
