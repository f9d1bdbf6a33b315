//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing prop events to the `log` facade
//! (UART / USB-CDC on the board, stderr on the host).

use log::{debug, info};

use crate::app::events::PropEvent;
use crate::app::ports::EventSink;
use crate::config;

/// Adapter that logs every [`PropEvent`] to the serial console.
/// Per-measurement lines obey [`config::LOG_RANGE_SENSOR`].
pub struct LogEventSink {
    log_measurements: bool,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self {
            log_measurements: config::LOG_RANGE_SENSOR,
        }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PropEvent) {
        match event {
            PropEvent::Started(phase) => {
                info!("START | initial_phase={}", phase);
            }
            PropEvent::PhaseChanged { from, to } => {
                info!("PHASE | {} -> {}", from, to);
            }
            PropEvent::Measured(s) => {
                if self.log_measurements {
                    if s.is_valid() {
                        debug!("RANGE | width={}us distance={}in", s.width, s.inches);
                    } else {
                        debug!("RANGE | no echo");
                    }
                }
            }
            PropEvent::Triggered(s) => {
                info!("TRIGGER | target at {}in", s.inches);
            }
        }
    }
}
