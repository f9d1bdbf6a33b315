//! Concrete phase handler functions and table builder.
//!
//! ```text
//!  PANNING ──[target 10..=72 in]──▶ RISING ──[rise done]──▶ HOWLING
//!     ▲                                                        │
//!     │                                                  [hold done]
//!     │                                                        ▼
//!     └──────────────────[lower done]─────────────────── LOWERING
//!
//!  Re-entering PANNING holds for the cooldown before the sensor is read.
//! ```

use super::context::SequenceContext;
use super::{PhaseDescriptor, Step};
use crate::phase::Phase;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        PhaseDescriptor {
            phase: Phase::Panning,
            polls_sensor: true,
            on_enter: Some(panning_enter),
            on_exit: None,
            on_update: panning_update,
        },
        PhaseDescriptor {
            phase: Phase::Rising,
            polls_sensor: false,
            on_enter: Some(rising_enter),
            on_exit: None,
            on_update: rising_update,
        },
        PhaseDescriptor {
            phase: Phase::Howling,
            polls_sensor: false,
            on_enter: None,
            on_exit: Some(howling_exit),
            on_update: howling_update,
        },
        PhaseDescriptor {
            phase: Phase::Lowering,
            polls_sensor: false,
            on_enter: Some(lowering_enter),
            on_exit: Some(lowering_exit),
            on_update: lowering_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  PANNING: breathing, head sweeping, waiting for a victim
// ═══════════════════════════════════════════════════════════════════════════

fn panning_enter(ctx: &mut SequenceContext) {
    ctx.commands.breathing = true;
}

fn panning_update(ctx: &mut SequenceContext) -> Step {
    if ctx.cooldown_pending {
        ctx.cooldown_pending = false;
        info!("PANNING: cooling down for {} ms", ctx.timings.cooldown_ms);
        return Step::Hold(ctx.timings.cooldown_ms);
    }

    if ctx.target_in_range() {
        if let Some(s) = ctx.sample {
            info!("PANNING: target at {} in, rising", s.inches);
        }
        return Step::Advance;
    }

    Step::Hold(ctx.timings.poll_interval_ms)
}

// ═══════════════════════════════════════════════════════════════════════════
//  RISING: body up, breathing stops, head lowers to look at the victim
// ═══════════════════════════════════════════════════════════════════════════

fn rising_enter(ctx: &mut SequenceContext) {
    ctx.commands.lift = true;
    ctx.commands.breathing = false;
}

fn rising_update(ctx: &mut SequenceContext) -> Step {
    match ctx.step_in_phase {
        0 => Step::Hold(ctx.timings.rise_ms),
        _ => Step::Advance,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  HOWLING: head comes back up, then the howl plays, then a held pose
// ═══════════════════════════════════════════════════════════════════════════

fn howling_update(ctx: &mut SequenceContext) -> Step {
    match ctx.step_in_phase {
        0 => Step::Hold(ctx.timings.howl_delay_ms),
        1 => {
            debug!("HOWLING: howl on");
            ctx.commands.howl = true;
            Step::Hold(ctx.timings.howl_ms)
        }
        2 => {
            debug!("HOWLING: howl off");
            ctx.commands.howl = false;
            Step::Hold(ctx.timings.howl_hold_ms)
        }
        _ => Step::Advance,
    }
}

fn howling_exit(ctx: &mut SequenceContext) {
    ctx.commands.howl = false;
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOWERING: body back down
// ═══════════════════════════════════════════════════════════════════════════

fn lowering_enter(ctx: &mut SequenceContext) {
    ctx.commands.lift = false;
}

fn lowering_update(ctx: &mut SequenceContext) -> Step {
    match ctx.step_in_phase {
        0 => Step::Hold(ctx.timings.lower_ms),
        _ => Step::Advance,
    }
}

fn lowering_exit(ctx: &mut SequenceContext) {
    ctx.cooldown_pending = true;
}
