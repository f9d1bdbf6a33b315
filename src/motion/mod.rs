//! Servo motion generators.
//!
//! Each servo gets its own periodic task ([`task::ServoTask`]) that reads
//! the shared [`Phase`] and asks a [`MotionGenerator`] what to output this
//! tick.  Generators are pure: no I/O, no clock, so they are tested by
//! feeding them phase sequences.

pub mod bounce;
pub mod lift;
pub mod task;

use crate::phase::Phase;

pub use bounce::BounceGenerator;
pub use lift::LiftGenerator;
pub use task::ServoTask;

pub trait MotionGenerator {
    /// Advance one tick.  `Some(duty)` is written to the servo; `None`
    /// leaves it where it is.
    fn tick(&mut self, phase: Phase) -> Option<u16>;

    /// Current internal duty, whether or not it was output.
    fn duty(&self) -> u16;
}

/// Move `from` toward `to` by at most `step`, never overshooting.
pub(crate) fn approach(from: u16, to: u16, step: u16) -> u16 {
    if from < to {
        from.saturating_add(step).min(to)
    } else {
        from.saturating_sub(step).max(to)
    }
}
