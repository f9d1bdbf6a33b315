//! The shared behavior phase.
//!
//! One [`PhaseCell`] exists for the life of the firmware.  The behavior
//! state machine holds the only [`PhaseWriter`]; every servo task holds a
//! [`PhaseReader`].
//!
//! ```text
//!                   ┌──────────────┐      ┌─────────────────┐
//!  PhaseWriter ────▶│  PhaseCell   │─────▶│ PhaseReader × N │
//!  (state machine)  │  (AtomicU8)  │      │ (servo tasks)   │
//!                   └──────────────┘      └─────────────────┘
//! ```
//!
//! Readers may see a value up to one of their own tick periods stale.

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// The four behavior modes, in the only order they may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Panning = 0,
    Rising = 1,
    Howling = 2,
    Lowering = 3,
}

impl Phase {
    /// Total number of phases, used to size the state table.
    pub const COUNT: usize = 4;

    /// Successor on the fixed cycle Panning → Rising → Howling → Lowering → Panning.
    pub const fn next(self) -> Self {
        match self {
            Self::Panning => Self::Rising,
            Self::Rising => Self::Howling,
            Self::Howling => Self::Lowering,
            Self::Lowering => Self::Panning,
        }
    }

    pub const fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::Panning),
            1 => Some(Self::Rising),
            2 => Some(Self::Howling),
            3 => Some(Self::Lowering),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Panning => "Panning",
            Self::Rising => "Rising",
            Self::Howling => "Howling",
            Self::Lowering => "Lowering",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Lock-free storage for the current phase.  `const`-constructible so it
/// can live in a `static`.
pub struct PhaseCell {
    value: AtomicU8,
    writer_taken: AtomicBool,
}

impl PhaseCell {
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(Phase::Panning as u8),
            writer_taken: AtomicBool::new(false),
        }
    }

    /// Claim the single writer handle.  Returns `None` on every call after
    /// the first.
    pub fn writer(&self) -> Option<PhaseWriter<'_>> {
        if self.writer_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(PhaseWriter { cell: self })
    }

    /// A read-only view.  Any number may exist.
    pub fn reader(&self) -> PhaseReader<'_> {
        PhaseReader { cell: self }
    }

    fn load(&self) -> Phase {
        let raw = self.value.load(Ordering::Acquire);
        // Only PhaseWriter stores, and it only stores valid discriminants.
        Phase::from_index(raw as usize).unwrap_or(Phase::Panning)
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The one handle allowed to change the phase.  Not `Clone`.
pub struct PhaseWriter<'a> {
    cell: &'a PhaseCell,
}

impl PhaseWriter<'_> {
    pub fn publish(&mut self, phase: Phase) {
        self.cell.value.store(phase as u8, Ordering::Release);
    }

    pub fn current(&self) -> Phase {
        self.cell.load()
    }
}

/// Read-only view of the phase, cheap to copy into every task.
#[derive(Clone, Copy)]
pub struct PhaseReader<'a> {
    cell: &'a PhaseCell,
}

impl PhaseReader<'_> {
    pub fn get(&self) -> Phase {
        self.cell.load()
    }
}
