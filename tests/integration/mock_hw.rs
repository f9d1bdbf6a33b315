//! Mock hardware for integration tests.
//!
//! Records every actuator, servo and delay call so tests can assert on the
//! full command history without touching real GPIO or LEDC registers.

use core::convert::Infallible;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use werewolf::app::events::PropEvent;
use werewolf::app::ports::{ActuatorPort, EventSink, RangePort, ServoPort};
use werewolf::drivers::hw_init::{BoardPort, OutputChannel, ServoChannel};
use werewolf::error::ActuatorError;
use werewolf::sensors::{DistanceSample, EchoClock};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Lift(bool),
    Breathing(bool),
    Howl(bool),
}

#[derive(Default)]
pub struct MockActuators {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn lift_on(&self) -> bool {
        self.latest(|c| match c {
            ActuatorCall::Lift(v) => Some(v),
            _ => None,
        })
    }

    pub fn breathing_on(&self) -> bool {
        self.latest(|c| match c {
            ActuatorCall::Breathing(v) => Some(v),
            _ => None,
        })
    }

    pub fn howl_on(&self) -> bool {
        self.latest(|c| match c {
            ActuatorCall::Howl(v) => Some(v),
            _ => None,
        })
    }

    fn latest(&self, pick: impl Fn(ActuatorCall) -> Option<bool>) -> bool {
        self.calls.iter().rev().find_map(|&c| pick(c)).unwrap_or(false)
    }
}

impl ActuatorPort for MockActuators {
    fn set_lift(&mut self, active: bool) {
        self.calls.push(ActuatorCall::Lift(active));
    }
    fn set_breathing(&mut self, active: bool) {
        self.calls.push(ActuatorCall::Breathing(active));
    }
    fn set_howl(&mut self, active: bool) {
        self.calls.push(ActuatorCall::Howl(active));
    }
}

// ── Range sensor ──────────────────────────────────────────────

/// Plays back a queue of samples, then keeps returning `fallback`.
pub struct ScriptedRange {
    queue: VecDeque<DistanceSample>,
    fallback: DistanceSample,
    pub polls: usize,
}

#[allow(dead_code)]
impl ScriptedRange {
    pub fn always(sample: DistanceSample) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: sample,
            polls: 0,
        }
    }

    pub fn then(mut self, sample: DistanceSample) -> Self {
        self.queue.push_back(sample);
        self
    }

    pub fn set_fallback(&mut self, sample: DistanceSample) {
        self.fallback = sample;
    }
}

impl RangePort for ScriptedRange {
    fn measure(&mut self) -> DistanceSample {
        self.polls += 1;
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Never sleeps; totals what it was asked to sleep.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub sleeps_ms: Vec<u32>,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<PropEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PropEvent) {
        self.events.push(*event);
    }
}

// ── GPIO ──────────────────────────────────────────────────────

/// Output that records levels; as an input it replays a script and then
/// sticks at its last level.
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
    pub script: VecDeque<bool>,
    pub idle: bool,
}

#[allow(dead_code)]
impl MockPin {
    pub fn echo(runs: &[(bool, usize)], idle: bool) -> Self {
        let mut script = VecDeque::new();
        for &(level, n) in runs {
            script.extend(std::iter::repeat_n(level, n));
        }
        Self {
            levels: Vec::new(),
            script,
            idle,
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.script.pop_front().unwrap_or(self.idle))
    }
    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

/// Clock that moves forward by `step_us` on every read.
pub struct TickClock {
    pub now: u64,
    pub step_us: u64,
}

impl EchoClock for TickClock {
    fn now_us(&mut self) -> u64 {
        self.now += self.step_us;
        self.now
    }
}

// ── Servo ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockServo {
    pub duties: Vec<u16>,
}

impl ServoPort for MockServo {
    fn set_duty_us(&mut self, duty_us: u16) {
        self.duties.push(duty_us);
    }
}

// ── Board ─────────────────────────────────────────────────────

/// Hands out mock channels and records the order they were opened in.
/// One named channel can be made to fail.
#[derive(Default)]
pub struct MockBoard {
    pub opened: Vec<&'static str>,
    pub fail: Option<&'static str>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn failing(name: &'static str) -> Self {
        Self {
            opened: Vec::new(),
            fail: Some(name),
        }
    }

    fn open(&mut self, name: &'static str) -> Result<(), ActuatorError> {
        if self.fail == Some(name) {
            return Err(ActuatorError::ChannelOpen(name));
        }
        self.opened.push(name);
        Ok(())
    }
}

impl BoardPort for MockBoard {
    type Output = MockPin;
    type Input = MockPin;
    type Servo = MockServo;

    fn open_output(&mut self, ch: OutputChannel) -> Result<MockPin, ActuatorError> {
        self.open(ch.name()).map(|()| MockPin::default())
    }

    fn open_echo(&mut self) -> Result<MockPin, ActuatorError> {
        self.open("range echo").map(|()| MockPin::default())
    }

    fn open_servo(
        &mut self,
        ch: ServoChannel,
        _period_us: u16,
    ) -> Result<MockServo, ActuatorError> {
        self.open(ch.name()).map(|()| MockServo::default())
    }
}
