//! Behavior sequence driven end-to-end through `BehaviorService` against
//! mock actuators, a scripted range sensor and a recording delay.

use crate::mock_hw::{
    ActuatorCall, MockActuators, MockDelay, MockPin, MockServo, RecordingSink, ScriptedRange,
    TickClock,
};
use werewolf::app::events::PropEvent;
use werewolf::app::service::BehaviorService;
use werewolf::config::{HEAD_LIFT_PROFILE, HEAD_TURN_PROFILE, SequenceTimings};
use werewolf::fsm::Step;
use werewolf::motion::{BounceGenerator, LiftGenerator, ServoTask};
use werewolf::phase::{Phase, PhaseCell};
use werewolf::sensors::DistanceSample;
use werewolf::sensors::ultrasonic::UltrasonicRanger;

type Service<'a> = BehaviorService<'a, ScriptedRange, MockActuators, MockDelay>;

fn service(cell: &PhaseCell, range: ScriptedRange) -> Service<'_> {
    BehaviorService::new(
        cell.writer().expect("fresh cell"),
        range,
        MockActuators::default(),
        MockDelay::default(),
    )
}

/// Step until the service is back in Panning with the cooldown served.
fn run_to_next_poll(svc: &mut Service<'_>, sink: &mut RecordingSink) {
    for _ in 0..32 {
        svc.step(sink);
        if svc.phase() == Phase::Panning && !svc.cooldown_pending() {
            return;
        }
    }
    panic!("sequence never returned to polling");
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn target_at_fifty_inches_starts_rising() {
    let cell = PhaseCell::new();
    let reader = cell.reader();
    let mut svc = service(&cell, ScriptedRange::always(DistanceSample::from_inches(50)));
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);

    assert_eq!(svc.step(&mut sink), Step::Advance);
    assert_eq!(svc.phase(), Phase::Rising);
    assert_eq!(reader.get(), Phase::Rising);
    assert!(svc.actuators().lift_on());
    assert!(!svc.actuators().breathing_on());
    assert!(sink.events.contains(&PropEvent::PhaseChanged {
        from: Phase::Panning,
        to: Phase::Rising,
    }));
}

#[test]
fn target_too_close_or_too_far_keeps_panning() {
    for inches in [5, 80] {
        let cell = PhaseCell::new();
        let mut svc = service(&cell, ScriptedRange::always(DistanceSample::from_inches(inches)));
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        for _ in 0..20 {
            assert_eq!(svc.step(&mut sink), Step::Hold(500), "{inches} in");
        }
        assert_eq!(svc.phase(), Phase::Panning);
        assert!(svc.actuators().breathing_on());
        assert!(!sink.events.iter().any(|e| matches!(e, PropEvent::Triggered(_))));
    }
}

#[test]
fn sensor_is_not_polled_outside_panning() {
    let cell = PhaseCell::new();
    let mut svc = service(&cell, ScriptedRange::always(DistanceSample::from_inches(50)));
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);
    svc.step(&mut sink);
    assert_eq!(svc.phase(), Phase::Rising);
    assert_eq!(svc.ranger_mut().polls, 1);

    // Target still in range the whole time; only the timer moves Rising on.
    assert_eq!(svc.step(&mut sink), Step::Hold(6000));
    assert_eq!(svc.phase(), Phase::Rising);
    while svc.phase() != Phase::Panning {
        svc.step(&mut sink);
    }
    assert_eq!(svc.ranger_mut().polls, 1);
}

#[test]
fn echo_that_never_rises_is_no_detection() {
    let ranger = UltrasonicRanger::new(
        MockPin::default(),
        MockPin::echo(&[], false),
        MockPin::default(),
        MockDelay::default(),
        TickClock { now: 0, step_us: 1 },
    )
    .with_max_loops(1_000);

    let cell = PhaseCell::new();
    let mut svc = BehaviorService::new(
        cell.writer().unwrap(),
        ranger,
        MockActuators::default(),
        MockDelay::default(),
    );
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);

    assert_eq!(svc.step(&mut sink), Step::Hold(500));
    assert_eq!(svc.phase(), Phase::Panning);
    assert!(sink.events.contains(&PropEvent::Measured(DistanceSample::TIMEOUT)));
}

// ── Timing and ordering ───────────────────────────────────────

#[test]
fn rising_to_next_poll_takes_the_whole_sequence() {
    let cell = PhaseCell::new();
    let range = ScriptedRange::always(DistanceSample::TIMEOUT).then(DistanceSample::from_inches(30));
    let mut svc = service(&cell, range);
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);

    assert_eq!(svc.step(&mut sink), Step::Advance);
    assert_eq!(svc.elapsed_ms(), 0);

    run_to_next_poll(&mut svc, &mut sink);
    assert_eq!(svc.elapsed_ms(), 31_000);
    assert_eq!(
        svc.elapsed_ms(),
        u64::from(SequenceTimings::DEFAULT.sequence_ms())
    );
    assert_eq!(svc.ranger_mut().polls, 1);

    svc.step(&mut sink);
    assert_eq!(svc.ranger_mut().polls, 2);
}

#[test]
fn sleeps_follow_the_sequence_table() {
    let cell = PhaseCell::new();
    let range = ScriptedRange::always(DistanceSample::TIMEOUT).then(DistanceSample::from_inches(30));
    let mut svc = service(&cell, range);
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);
    svc.step(&mut sink);
    run_to_next_poll(&mut svc, &mut sink);

    assert_eq!(svc.delay().sleeps_ms, [6000, 3000, 6000, 6000, 5000, 5000]);
    assert_eq!(svc.delay().total_ms(), 31_000);
}

#[test]
fn actuators_switch_in_order() {
    let cell = PhaseCell::new();
    let range = ScriptedRange::always(DistanceSample::TIMEOUT).then(DistanceSample::from_inches(30));
    let mut svc = service(&cell, range);
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);
    svc.step(&mut sink);
    run_to_next_poll(&mut svc, &mut sink);

    use ActuatorCall::*;
    assert_eq!(
        svc.actuators().calls,
        [
            // start
            Lift(false),
            Breathing(true),
            Howl(false),
            // rising
            Lift(true),
            Breathing(false),
            // howling
            Howl(true),
            Howl(false),
            // lowering
            Lift(false),
            // back to panning
            Breathing(true),
        ]
    );
}

#[test]
fn phase_changes_are_reported_in_cycle_order() {
    let cell = PhaseCell::new();
    let range = ScriptedRange::always(DistanceSample::TIMEOUT).then(DistanceSample::from_inches(30));
    let mut svc = service(&cell, range);
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);
    svc.step(&mut sink);
    run_to_next_poll(&mut svc, &mut sink);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            PropEvent::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (Phase::Panning, Phase::Rising),
            (Phase::Rising, Phase::Howling),
            (Phase::Howling, Phase::Lowering),
            (Phase::Lowering, Phase::Panning),
        ]
    );
    assert_eq!(sink.events.first(), Some(&PropEvent::Started(Phase::Panning)));
}

#[test]
fn second_sequence_needs_a_new_trigger() {
    let cell = PhaseCell::new();
    let range = ScriptedRange::always(DistanceSample::TIMEOUT)
        .then(DistanceSample::from_inches(30))
        .then(DistanceSample::from_inches(20));
    let mut svc = service(&cell, range);
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);
    svc.step(&mut sink);
    run_to_next_poll(&mut svc, &mut sink);

    assert_eq!(svc.step(&mut sink), Step::Advance);
    assert_eq!(svc.phase(), Phase::Rising);
    run_to_next_poll(&mut svc, &mut sink);
    assert_eq!(svc.step(&mut sink), Step::Hold(500));
    assert_eq!(svc.elapsed_ms(), 2 * 31_000 + 500);
}

// ── Servo tasks following the shared phase ────────────────────

#[test]
fn servos_follow_the_published_phase() {
    let cell = PhaseCell::new();
    let mut svc = service(&cell, ScriptedRange::always(DistanceSample::from_inches(30)));
    let mut turn = ServoTask::new(
        "head-turn",
        BounceGenerator::new(&HEAD_TURN_PROFILE),
        MockServo::default(),
        cell.reader(),
        MockDelay::default(),
        HEAD_TURN_PROFILE.period_ms,
    );
    let mut lift = ServoTask::new(
        "head-lift",
        LiftGenerator::new(&HEAD_LIFT_PROFILE),
        MockServo::default(),
        cell.reader(),
        MockDelay::default(),
        HEAD_LIFT_PROFILE.period_ms,
    );
    let mut sink = RecordingSink::default();
    svc.start(&mut sink);

    for _ in 0..5 {
        turn.tick();
        lift.tick();
    }
    assert_eq!(turn.servo().duties, [1500, 1510, 1520, 1530, 1540]);
    assert_eq!(lift.servo().duties, [1700; 5]);

    svc.step(&mut sink);
    assert_eq!(svc.phase(), Phase::Rising);

    for _ in 0..5 {
        assert_eq!(turn.tick(), None);
        lift.tick();
    }
    assert_eq!(turn.servo().duties.len(), 5);
    assert_eq!(&lift.servo().duties[5..], [1690, 1680, 1670, 1660, 1650]);
}
