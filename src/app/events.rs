//! Outbound application events.
//!
//! The [`BehaviorService`](super::service::BehaviorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::phase::Phase;
use crate::sensors::DistanceSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropEvent {
    /// The service has started (carries the initial phase).
    Started(Phase),

    /// The sequence moved on.
    PhaseChanged { from: Phase, to: Phase },

    /// A range measurement was taken while panning.
    Measured(DistanceSample),

    /// A measurement landed inside the trigger window.
    Triggered(DistanceSample),
}
