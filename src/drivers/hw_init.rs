//! One-shot hardware bring-up.
//!
//! [`bring_up`] opens every channel the prop needs through a [`BoardPort`]
//! and hands back a [`Rig`] of ready drivers.  Actuator and servo channels
//! are opened first; if any of them fails, bring-up stops there and the
//! range sensor pins are never touched.  `main` treats the error as fatal.

use log::{error, info};

use super::actuators::ActuatorBank;
use crate::app::ports::ServoPort;
use crate::config;
use crate::error::{ActuatorError, Error};
use embedded_hal::digital::{InputPin, OutputPin};

// ── Channel identities ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Lift,
    Breathing,
    Howl,
    Trigger,
    StatusLed,
}

impl OutputChannel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lift => "lift gate",
            Self::Breathing => "breathing motor",
            Self::Howl => "howl relay",
            Self::Trigger => "range trigger",
            Self::StatusLed => "status LED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoChannel {
    HeadTurn,
    HeadLift,
    Mouth,
}

impl ServoChannel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HeadTurn => "head-turn servo",
            Self::HeadLift => "head-lift servo",
            Self::Mouth => "mouth servo",
        }
    }
}

// ── Board port ────────────────────────────────────────────────

/// Something that can hand out the board's pins and PWM channels.  Each
/// channel may be opened at most once.
pub trait BoardPort {
    type Output: OutputPin;
    type Input: InputPin;
    type Servo: ServoPort;

    fn open_output(&mut self, ch: OutputChannel) -> Result<Self::Output, ActuatorError>;
    fn open_echo(&mut self) -> Result<Self::Input, ActuatorError>;
    fn open_servo(&mut self, ch: ServoChannel, period_us: u16)
    -> Result<Self::Servo, ActuatorError>;
}

/// Which optional servo generators to bring up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledServos {
    pub head_turn: bool,
    pub head_lift: bool,
    pub mouth: bool,
}

impl EnabledServos {
    pub const FROM_CONFIG: Self = Self {
        head_turn: config::HEAD_TURN_ACTIVE,
        head_lift: config::HEAD_LIFT_ACTIVE,
        mouth: config::MOUTH_ACTIVE,
    };
}

// ── Result of bring-up ────────────────────────────────────────

pub struct Rig<B: BoardPort> {
    pub actuators: ActuatorBank<B::Output, B::Output, B::Output>,
    pub head_turn: Option<B::Servo>,
    pub head_lift: Option<B::Servo>,
    pub mouth: Option<B::Servo>,
    pub trigger: B::Output,
    pub echo: B::Input,
    pub status_led: B::Output,
}

pub fn bring_up<B: BoardPort>(board: &mut B, servos: EnabledServos) -> Result<Rig<B>, Error> {
    let lift = open_output(board, OutputChannel::Lift)?;
    let breathing = open_output(board, OutputChannel::Breathing)?;
    let howl = open_output(board, OutputChannel::Howl)?;
    let actuators = ActuatorBank::new(lift, breathing, howl);

    let head_turn = open_servo(board, ServoChannel::HeadTurn, servos.head_turn)?;
    let head_lift = open_servo(board, ServoChannel::HeadLift, servos.head_lift)?;
    let mouth = open_servo(board, ServoChannel::Mouth, servos.mouth)?;

    let trigger = open_output(board, OutputChannel::Trigger)?;
    let echo = board.open_echo().map_err(|e| fail("range echo", e))?;
    let status_led = open_output(board, OutputChannel::StatusLed)?;

    info!("hw_init: all channels open");
    Ok(Rig {
        actuators,
        head_turn,
        head_lift,
        mouth,
        trigger,
        echo,
        status_led,
    })
}

fn open_output<B: BoardPort>(board: &mut B, ch: OutputChannel) -> Result<B::Output, Error> {
    board.open_output(ch).map_err(|e| fail(ch.name(), e))
}

fn open_servo<B: BoardPort>(
    board: &mut B,
    ch: ServoChannel,
    enabled: bool,
) -> Result<Option<B::Servo>, Error> {
    if !enabled {
        info!("hw_init: {} disabled", ch.name());
        return Ok(None);
    }
    board
        .open_servo(ch, config::SERVO_PERIOD_US)
        .map(Some)
        .map_err(|e| fail(ch.name(), e))
}

fn fail(what: &str, e: ActuatorError) -> Error {
    error!("hw_init: {what}: {e}");
    e.into()
}
