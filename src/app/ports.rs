//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BehaviorService / ServoTask (domain)
//! ```
//!
//! Drivers (ranger, actuator bank, PWM servos) and event sinks implement
//! these traits.  The domain consumes them through generics, so the
//! sequence logic never touches hardware directly and runs unchanged
//! against the mocks in `tests/integration`.

use crate::sensors::DistanceSample;

// ───────────────────────────────────────────────────────────────
// Range port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the state machine calls this once per poll.
pub trait RangePort {
    /// Take one measurement.  Timeouts come back as an invalid sample,
    /// never as an error.
    fn measure(&mut self) -> DistanceSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the three binary body actuators.  Arguments are
/// logical (`true` = active); the adapter owns pin polarity.
pub trait ActuatorPort {
    fn set_lift(&mut self, active: bool);
    fn set_breathing(&mut self, active: bool);
    fn set_howl(&mut self, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Servo port (domain → PWM channel)
// ───────────────────────────────────────────────────────────────

/// One PWM servo channel.  Duty is pulse width in microseconds.
pub trait ServoPort {
    fn set_duty_us(&mut self, duty_us: u16);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`PropEvent`](super::events::PropEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PropEvent);
}

/// Sink that drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::PropEvent) {}
}
