//! Head up/down: two resting positions with a ramp between them.
//!
//! | Phase    | Behavior                                         |
//! |----------|--------------------------------------------------|
//! | Panning  | snap to `up`, re-asserted every tick             |
//! | Rising   | ramp toward `down` (look at the victim), stop    |
//! | Howling  | ramp back toward `up` (head thrown back), stop   |
//! | Lowering | hold                                             |

use log::debug;

use super::{MotionGenerator, approach};
use crate::config::{self, LiftProfile};
use crate::phase::Phase;

#[derive(Debug, Clone)]
pub struct LiftGenerator {
    duty: u16,
    up: u16,
    down: u16,
    step: u16,
}

impl LiftGenerator {
    pub fn new(profile: &LiftProfile) -> Self {
        Self {
            duty: profile.up,
            up: profile.up,
            down: profile.down,
            step: profile.step.max(1),
        }
    }

    fn ramp_to(&mut self, target: u16) -> Option<u16> {
        if self.duty == target {
            return None;
        }
        self.duty = approach(self.duty, target, self.step);
        if config::LOG_HEAD_LIFT && self.duty == target {
            debug!("head-lift: reached {}", target);
        }
        Some(self.duty)
    }
}

impl MotionGenerator for LiftGenerator {
    fn tick(&mut self, phase: Phase) -> Option<u16> {
        match phase {
            Phase::Panning => {
                self.duty = self.up;
                Some(self.up)
            }
            Phase::Rising => self.ramp_to(self.down),
            Phase::Howling => self.ramp_to(self.up),
            Phase::Lowering => None,
        }
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}
