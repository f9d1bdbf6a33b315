//! System configuration parameters
//!
//! All tunable parameters for the werewolf prop.  Everything here is a
//! compile-time constant: adjust, rebuild, reflash.  Durations are in
//! milliseconds, servo duties in microseconds of pulse width.

// ---------------------------------------------------------------------------
// Feature flags
// ---------------------------------------------------------------------------

/// Run the head side-to-side servo.
pub const HEAD_TURN_ACTIVE: bool = true;
/// Run the head up/down servo.
pub const HEAD_LIFT_ACTIVE: bool = true;
/// Run the mouth servo (hardware not fitted on the current build).
pub const MOUTH_ACTIVE: bool = false;

// ---------------------------------------------------------------------------
// Diagnostic log flags
// ---------------------------------------------------------------------------

pub const LOG_RANGE_SENSOR: bool = true;
pub const LOG_HEAD_TURN: bool = false;
pub const LOG_HEAD_LIFT: bool = false;
pub const LOG_MOUTH: bool = false;

// ---------------------------------------------------------------------------
// Range sensor
// ---------------------------------------------------------------------------

/// Spin budget for each of the three echo wait phases.
///
/// Phase C must outlast an echo from the far edge of the trigger window,
/// [`FAR_EDGE_ECHO_US`].  The budget counts polls, not time, so it covers
/// that echo only while ECHO is polled no faster than
/// [`MAX_ECHO_POLLS_PER_US`].  Raise it for a faster GPIO path or a wider
/// window; the const check below fails the build otherwise.
pub const MAX_ECHO_LOOPS: u32 = 100_000;

/// Round-trip echo time for a target at `TriggerWindow::DEFAULT.max_in`.
pub const FAR_EDGE_ECHO_US: u32 = TriggerWindow::DEFAULT.max_in * 2 * ECHO_US_PER_INCH;

/// Fastest ECHO poll rate the budget still covers (one poll per ~111 ns).
pub const MAX_ECHO_POLLS_PER_US: u32 = 9;

const _: () = assert!(
    MAX_ECHO_LOOPS >= FAR_EDGE_ECHO_US * MAX_ECHO_POLLS_PER_US,
    "MAX_ECHO_LOOPS too small to time an echo from the far edge of the trigger window"
);

/// Round-trip echo time per inch of distance.  Nominal for sound at room
/// temperature; recalibrate against a tape measure on each new board.
pub const ECHO_US_PER_INCH: u32 = 74;

/// Low time before the trigger pulse so the sensor sees a clean edge.
pub const TRIGGER_SETTLE_US: u32 = 2;
/// High time of the trigger pulse (HC-SR04 needs at least 10 µs).
pub const TRIGGER_PULSE_US: u32 = 10;

/// Distance band (inches, inclusive) that starts a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerWindow {
    pub min_in: u32,
    pub max_in: u32,
}

impl TriggerWindow {
    pub const DEFAULT: Self = Self {
        min_in: 10,
        max_in: 72,
    };

    pub fn contains(&self, inches: u32) -> bool {
        inches >= self.min_in && inches <= self.max_in
    }
}

impl Default for TriggerWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Behavior sequence
// ---------------------------------------------------------------------------

/// Hold times for each step of the rise / howl / lower / reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTimings {
    /// Sensor poll period while panning.
    pub poll_interval_ms: u32,
    /// Time spent in Rising, start to finish.
    pub rise_ms: u32,
    /// Time to raise the head before the howl starts.
    pub howl_delay_ms: u32,
    /// Length of the howl sound.
    pub howl_ms: u32,
    /// Hold after the howl before lowering.
    pub howl_hold_ms: u32,
    /// Time spent in Lowering, start to finish.
    pub lower_ms: u32,
    /// Time after re-entering Panning before the sensor may re-trigger.
    pub cooldown_ms: u32,
}

impl SequenceTimings {
    pub const DEFAULT: Self = Self {
        poll_interval_ms: 500,
        rise_ms: 6000,
        howl_delay_ms: 3000,
        howl_ms: 6000,
        howl_hold_ms: 6000,
        lower_ms: 5000,
        cooldown_ms: 5000,
    };

    /// Total time in Howling.
    pub fn howling_ms(&self) -> u32 {
        self.howl_delay_ms + self.howl_ms + self.howl_hold_ms
    }

    /// Time from entering Rising until the sensor may be polled again.
    pub fn sequence_ms(&self) -> u32 {
        self.rise_ms + self.howling_ms() + self.lower_ms + self.cooldown_ms
    }
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Servo motion
// ---------------------------------------------------------------------------

/// PWM period for every servo channel.
pub const SERVO_PERIOD_US: u16 = 3000;

/// Triangle-wave sweep between two duty bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceProfile {
    pub lower: u16,
    pub upper: u16,
    pub start: u16,
    pub step: i16,
    pub period_ms: u32,
}

/// Head side to side: full left shoulder to full right shoulder.
pub const HEAD_TURN_PROFILE: BounceProfile = BounceProfile {
    lower: 750,
    upper: 2000,
    start: 1500,
    step: 10,
    period_ms: 40,
};

/// Mouth open/close.
pub const MOUTH_PROFILE: BounceProfile = BounceProfile {
    lower: 750,
    upper: 2000,
    start: 750,
    step: 10,
    period_ms: 40,
};

/// Two-position servo with a ramp between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftProfile {
    /// Head up: panning and howling.
    pub up: u16,
    /// Head down: looking at the victim while rising.
    pub down: u16,
    pub step: u16,
    pub period_ms: u32,
}

pub const HEAD_LIFT_PROFILE: LiftProfile = LiftProfile {
    up: 1700,
    down: 700,
    step: 10,
    period_ms: 40,
};
