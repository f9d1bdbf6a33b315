//! Triangle-wave sweep between two duty bounds.
//!
//! Used for the head side-to-side motion and the mouth.  Only moves while
//! panning; in any other phase the servo is left at its last position.

use super::MotionGenerator;
use crate::config::BounceProfile;
use crate::phase::Phase;

#[derive(Debug, Clone)]
pub struct BounceGenerator {
    duty: u16,
    step: i16,
    lower: u16,
    upper: u16,
}

impl BounceGenerator {
    pub fn new(profile: &BounceProfile) -> Self {
        Self {
            duty: profile.start.clamp(profile.lower, profile.upper),
            step: profile.step,
            lower: profile.lower,
            upper: profile.upper,
        }
    }

    pub fn step(&self) -> i16 {
        self.step
    }

    fn advance(&mut self) {
        let mut next = i32::from(self.duty) + i32::from(self.step);
        if next > i32::from(self.upper) || next < i32::from(self.lower) {
            self.step = -self.step;
            next += i32::from(self.step);
        }
        self.duty = next.clamp(i32::from(self.lower), i32::from(self.upper)) as u16;
    }
}

impl MotionGenerator for BounceGenerator {
    fn tick(&mut self, phase: Phase) -> Option<u16> {
        if phase != Phase::Panning {
            return None;
        }
        let out = self.duty;
        self.advance();
        Some(out)
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}
