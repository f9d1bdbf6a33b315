//! Actuator drivers, hardware bring-up, and task placement.

pub mod actuators;
pub mod hw_init;
pub mod servo;
pub mod task_pin;
