//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                      |
//! |------------|-------------|----------------------------------|
//! | `board`    | BoardPort   | ESP32-S3 GPIO and LEDC (target)  |
//! | `log_sink` | EventSink   | Serial log output                |
//! | `time`     | EchoClock   | ESP32 system timer / `Instant`   |

#[cfg(target_os = "espidf")]
pub mod board;
pub mod log_sink;
pub mod time;
