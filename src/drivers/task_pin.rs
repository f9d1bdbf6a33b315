//! Core-pinned thread spawning for the ESP32-S3.
//!
//! ESP-IDF implements `std::thread` on pthreads over FreeRTOS tasks.
//! `esp_pthread_set_cfg()` sets the core, priority and stack for the
//! *next* `pthread_create()` from the calling thread, so the config/spawn
//! pair must not be interleaved with other thread creation on that thread.
//!
//! On the host the core and priority are ignored.

use std::io;
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    Pro = 0,
    App = 1,
}

/// Per-task placement.  Servo tasks sit above the behavior task so a
/// 40 ms tick is not held off by a long echo busy-wait.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
}

pub const BEHAVIOR_TASK: TaskSpec = TaskSpec {
    name: "behavior\0",
    core: Core::App,
    priority: 5,
    stack_kb: 6,
};

pub const HEAD_TURN_TASK: TaskSpec = TaskSpec {
    name: "head-turn\0",
    core: Core::Pro,
    priority: 6,
    stack_kb: 4,
};

pub const HEAD_LIFT_TASK: TaskSpec = TaskSpec {
    name: "head-lift\0",
    core: Core::Pro,
    priority: 6,
    stack_kb: 4,
};

pub const MOUTH_TASK: TaskSpec = TaskSpec {
    name: "mouth\0",
    core: Core::Pro,
    priority: 6,
    stack_kb: 4,
};

/// Spawn `f` as a thread placed according to `spec`.  `spec.name` must be
/// NUL-terminated.
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    spec: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    // SAFETY: the config struct is fully initialised by the IDF default
    // constructor and `name` is a 'static NUL-terminated string.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = spec.core as i32;
        cfg.prio = i32::from(spec.priority);
        cfg.stack_size = (spec.stack_kb * 1024) as i32;
        cfg.thread_name = spec.name.as_ptr().cast();
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = spec.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        spec.core,
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
}

#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    spec: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = spec.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        display_name,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(spec.stack_kb * 1024)
        .spawn(f)
}
