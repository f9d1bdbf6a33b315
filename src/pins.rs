//! GPIO / peripheral pin assignments for the werewolf controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers or polarities.

// ---------------------------------------------------------------------------
// Active-level polarity
// ---------------------------------------------------------------------------

/// Electrical level that means "on" for a binary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// Pin level (`true` = high) that realises the logical state `active`.
    pub const fn level_for(self, active: bool) -> bool {
        match self {
            Self::High => active,
            Self::Low => !active,
        }
    }
}

// ---------------------------------------------------------------------------
// Ultrasonic range sensor (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: trigger pulse.
pub const TRIGGER_GPIO: i32 = 5;
/// Digital input: echo pulse, width proportional to distance.
pub const ECHO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Body actuators
// ---------------------------------------------------------------------------

/// Digital output: MOSFET gate for the lift solenoid.
pub const LIFT_GATE_GPIO: i32 = 1;
pub const LIFT_ACTIVE: ActiveLevel = ActiveLevel::High;

/// Digital output: breathing motor.
pub const BREATHING_GPIO: i32 = 2;
pub const BREATHING_ACTIVE: ActiveLevel = ActiveLevel::High;

/// Digital output: howl sound-board relay.  Pulling low plays the howl.
pub const HOWL_GPIO: i32 = 3;
pub const HOWL_ACTIVE: ActiveLevel = ActiveLevel::Low;

/// Digital output: on-board status LED, lit while the sensor is ranging.
pub const STATUS_LED_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Servos (LEDC PWM)
// ---------------------------------------------------------------------------

pub const HEAD_TURN_SERVO_GPIO: i32 = 4;
pub const HEAD_LIFT_SERVO_GPIO: i32 = 7;
pub const MOUTH_SERVO_GPIO: i32 = 9;
