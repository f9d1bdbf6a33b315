//! Function-pointer state machine for the behavior sequence.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  PhaseTable                                                   │
//! │  ┌──────────┬──────────┬──────────┬──────────┬─────────────┐  │
//! │  │ Phase    │ polls    │ on_enter │ on_exit  │ on_update   │  │
//! │  ├──────────┼──────────┼──────────┼──────────┼─────────────┤  │
//! │  │ Panning  │ yes      │ fn(ctx)  │ -        │ fn(ctx)->St │  │
//! │  │ Rising   │ no       │ fn(ctx)  │ -        │ fn(ctx)->St │  │
//! │  │ Howling  │ no       │ -        │ fn(ctx)  │ fn(ctx)->St │  │
//! │  │ Lowering │ no       │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->St │  │
//! │  └──────────┴──────────┴──────────┴──────────┴─────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step the engine calls `on_update` for the current phase.  A handler
//! either asks to [`Step::Hold`] for some milliseconds or to
//! [`Step::Advance`].  It cannot name a target: advancing always moves to
//! [`Phase::next`], so the cycle order is fixed by construction.

pub mod context;
pub mod states;

use crate::phase::{Phase, PhaseWriter};
use context::SequenceContext;
use log::info;

// ---------------------------------------------------------------------------
// Handler signatures
// ---------------------------------------------------------------------------

/// What a phase wants after one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Stay in this phase and wait this many milliseconds.
    Hold(u32),
    /// Leave for the next phase on the cycle.
    Advance,
}

pub type PhaseActionFn = fn(&mut SequenceContext);
pub type PhaseUpdateFn = fn(&mut SequenceContext) -> Step;

/// Static descriptor for one phase.
pub struct PhaseDescriptor {
    pub phase: Phase,
    /// Whether the engine should take a range sample before `on_update`.
    pub polls_sensor: bool,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The behavior state machine.  Owns the only [`PhaseWriter`], so it is the
/// single place the shared phase changes.
pub struct Sequencer<'a> {
    table: [PhaseDescriptor; Phase::COUNT],
    current: Phase,
    writer: PhaseWriter<'a>,
}

impl<'a> Sequencer<'a> {
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], mut writer: PhaseWriter<'a>) -> Self {
        writer.publish(Phase::Panning);
        Self {
            table,
            current: Phase::Panning,
            writer,
        }
    }

    /// Run the initial `on_enter`.  Call once, before the first `update()`.
    pub fn start(&mut self, ctx: &mut SequenceContext) {
        info!("Sequencer starting in phase: {}", self.current);
        ctx.step_in_phase = 0;
        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
    }

    /// Run one handler step.  On [`Step::Advance`] the transition has
    /// already happened by the time this returns.
    pub fn update(&mut self, ctx: &mut SequenceContext) -> Step {
        let step = (self.row().on_update)(ctx);
        match step {
            Step::Hold(_) => ctx.step_in_phase = ctx.step_in_phase.saturating_add(1),
            Step::Advance => self.advance(ctx),
        }
        step
    }

    pub fn current_phase(&self) -> Phase {
        self.current
    }

    /// Whether the current phase wants a fresh range sample.
    pub fn polls_sensor(&self) -> bool {
        self.row().polls_sensor
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn row(&self) -> &PhaseDescriptor {
        &self.table[self.current as usize]
    }

    fn advance(&mut self, ctx: &mut SequenceContext) {
        let next = self.current.next();
        info!("Phase transition: {} -> {}", self.current, next);

        if let Some(exit) = self.row().on_exit {
            exit(ctx);
        }

        self.current = next;
        self.writer.publish(next);
        ctx.step_in_phase = 0;
        ctx.sample = None;

        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
    }
}
