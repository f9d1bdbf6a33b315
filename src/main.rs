//! Werewolf Prop Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspBoard (GPIO + LEDC)   LogEventSink   MonotonicClock        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐   │
//! │  │ BehaviorService          │   │ ServoTask × (1..=3)      │   │
//! │  │ Sequencer · Ranger · Bank│──▶│ Bounce / Lift generators │   │
//! │  └──────────────────────────┘   └──────────────────────────┘   │
//! │             PhaseWriter ──── PhaseCell ──── PhaseReader        │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use werewolf::adapters::board::EspBoard;
use werewolf::adapters::log_sink::LogEventSink;
use werewolf::adapters::time::MonotonicClock;
use werewolf::app::service::BehaviorService;
use werewolf::config::{self, HEAD_LIFT_PROFILE, HEAD_TURN_PROFILE, MOUTH_PROFILE};
use werewolf::drivers::hw_init::{EnabledServos, bring_up};
use werewolf::drivers::task_pin::{
    BEHAVIOR_TASK, HEAD_LIFT_TASK, HEAD_TURN_TASK, MOUTH_TASK, spawn_on_core,
};
use werewolf::motion::{BounceGenerator, LiftGenerator, ServoTask};
use werewolf::phase::PhaseCell;
use werewolf::sensors::ultrasonic::UltrasonicRanger;

static PHASE: PhaseCell = PhaseCell::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Werewolf v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Open every channel ─────────────────────────────────
    let peripherals = Peripherals::take()?;
    let mut board = EspBoard::new(peripherals);
    let rig = match bring_up(&mut board, EnabledServos::FROM_CONFIG) {
        Ok(rig) => rig,
        Err(e) => {
            error!("bring-up failed: {}, halting", e);
            std::process::abort();
        }
    };

    // ── 3. Servo tasks ────────────────────────────────────────
    if let Some(servo) = rig.head_turn {
        spawn_on_core(HEAD_TURN_TASK, move || {
            ServoTask::new(
                "head-turn",
                BounceGenerator::new(&HEAD_TURN_PROFILE),
                servo,
                PHASE.reader(),
                FreeRtos,
                HEAD_TURN_PROFILE.period_ms,
            )
            .with_tick_logging(config::LOG_HEAD_TURN)
            .run()
        })?;
    }

    if let Some(servo) = rig.head_lift {
        spawn_on_core(HEAD_LIFT_TASK, move || {
            ServoTask::new(
                "head-lift",
                LiftGenerator::new(&HEAD_LIFT_PROFILE),
                servo,
                PHASE.reader(),
                FreeRtos,
                HEAD_LIFT_PROFILE.period_ms,
            )
            .with_tick_logging(config::LOG_HEAD_LIFT)
            .run()
        })?;
    }

    if let Some(servo) = rig.mouth {
        spawn_on_core(MOUTH_TASK, move || {
            ServoTask::new(
                "mouth",
                BounceGenerator::new(&MOUTH_PROFILE),
                servo,
                PHASE.reader(),
                FreeRtos,
                MOUTH_PROFILE.period_ms,
            )
            .with_tick_logging(config::LOG_MOUTH)
            .run()
        })?;
    }

    // ── 4. Behavior task ──────────────────────────────────────
    let writer = PHASE
        .writer()
        .ok_or_else(|| anyhow!("phase writer already claimed"))?;
    let ranger = UltrasonicRanger::new(
        rig.trigger,
        rig.echo,
        rig.status_led,
        Ets,
        MonotonicClock::new(),
    );
    let actuators = rig.actuators;

    let behavior = spawn_on_core(BEHAVIOR_TASK, move || {
        let mut service = BehaviorService::new(writer, ranger, actuators, FreeRtos);
        service.run(&mut LogEventSink::new())
    })?;

    behavior
        .join()
        .map_err(|_| anyhow!("behavior task panicked"))
}
