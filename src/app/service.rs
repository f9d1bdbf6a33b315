//! Behavior service, the hexagonal core.
//!
//! [`BehaviorService`] owns the sequencer, its context, and the three
//! ports it drives: the range sensor, the actuator bank, and a delay.
//! One call to [`step`](BehaviorService::step) is one handler step: sample
//! (if the phase polls), update, apply actuators, then either sleep or
//! transition.
//!
//! ```text
//!   RangePort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │     BehaviorService     │
//! ActuatorPort ◀──│  Sequencer · Context    │ ──▶ PhaseWriter
//!                 └─────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::{SequenceTimings, TriggerWindow};
use crate::fsm::context::{ActuatorCommands, SequenceContext};
use crate::fsm::states::build_phase_table;
use crate::fsm::{Sequencer, Step};
use crate::phase::{Phase, PhaseWriter};

use super::events::PropEvent;
use super::ports::{ActuatorPort, EventSink, RangePort};

// ───────────────────────────────────────────────────────────────
// BehaviorService
// ───────────────────────────────────────────────────────────────

pub struct BehaviorService<'a, R, A, D> {
    seq: Sequencer<'a>,
    ctx: SequenceContext,
    ranger: R,
    actuators: A,
    delay: D,
    /// Levels last written to the bank; `None` until `start`.
    applied: Option<ActuatorCommands>,
    /// Total time spent sleeping in `Hold` steps.
    elapsed_ms: u64,
}

impl<'a, R, A, D> BehaviorService<'a, R, A, D>
where
    R: RangePort,
    A: ActuatorPort,
    D: DelayNs,
{
    /// Does **not** start the sequence; call [`start`](Self::start) next.
    pub fn new(writer: PhaseWriter<'a>, ranger: R, actuators: A, delay: D) -> Self {
        Self {
            seq: Sequencer::new(build_phase_table(), writer),
            ctx: SequenceContext::default(),
            ranger,
            actuators,
            delay,
            applied: None,
            elapsed_ms: 0,
        }
    }

    pub fn with_timings(mut self, timings: SequenceTimings) -> Self {
        self.ctx.timings = timings;
        self
    }

    pub fn with_window(mut self, window: TriggerWindow) -> Self {
        self.ctx.window = window;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter Panning and drive every actuator to its initial level.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.seq.start(&mut self.ctx);
        self.apply_actuators();
        sink.emit(&PropEvent::Started(self.seq.current_phase()));
        info!("BehaviorService started in {}", self.seq.current_phase());
    }

    /// Run one handler step and return what it asked for.  A `Hold` has
    /// already been slept by the time this returns.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Step {
        let prev = self.seq.current_phase();

        if self.seq.polls_sensor() && !self.ctx.cooldown_pending {
            let sample = self.ranger.measure();
            self.ctx.sample = Some(sample);
            sink.emit(&PropEvent::Measured(sample));
            if self.ctx.target_in_range() {
                sink.emit(&PropEvent::Triggered(sample));
            }
        }

        let step = self.seq.update(&mut self.ctx);
        self.apply_actuators();

        match step {
            Step::Hold(ms) => {
                self.delay.delay_ms(ms);
                self.elapsed_ms += u64::from(ms);
            }
            Step::Advance => sink.emit(&PropEvent::PhaseChanged {
                from: prev,
                to: self.seq.current_phase(),
            }),
        }
        step
    }

    /// Start, then step forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        self.start(sink);
        loop {
            self.step(sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.seq.current_phase()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn commands(&self) -> ActuatorCommands {
        self.ctx.commands
    }

    /// True while the post-sequence cooldown is owed.
    pub fn cooldown_pending(&self) -> bool {
        self.ctx.cooldown_pending
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn ranger_mut(&mut self) -> &mut R {
        &mut self.ranger
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    // ── Internal ──────────────────────────────────────────────

    /// Write the levels that changed since the last apply, lift first.
    fn apply_actuators(&mut self) {
        let want = self.ctx.commands;
        let prev = self.applied;
        let changed = |f: fn(&ActuatorCommands) -> bool| prev.is_none_or(|p| f(&p) != f(&want));

        if changed(|c| c.lift) {
            self.actuators.set_lift(want.lift);
        }
        if changed(|c| c.breathing) {
            self.actuators.set_breathing(want.breathing);
        }
        if changed(|c| c.howl) {
            self.actuators.set_howl(want.howl);
        }
        self.applied = Some(want);
    }
}
