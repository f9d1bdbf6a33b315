//! Bring-up against a mock board: channel order and fatal open failures.

use crate::mock_hw::MockBoard;
use werewolf::drivers::hw_init::{EnabledServos, bring_up};
use werewolf::error::{ActuatorError, Error};

const ALL_SERVOS: EnabledServos = EnabledServos {
    head_turn: true,
    head_lift: true,
    mouth: true,
};

#[test]
fn actuators_and_servos_open_before_sensor_pins() {
    let mut board = MockBoard::default();
    let rig = bring_up(&mut board, ALL_SERVOS).expect("all channels available");
    assert_eq!(
        board.opened,
        [
            "lift gate",
            "breathing motor",
            "howl relay",
            "head-turn servo",
            "head-lift servo",
            "mouth servo",
            "range trigger",
            "range echo",
            "status LED",
        ]
    );
    assert!(rig.head_turn.is_some());
    assert!(rig.mouth.is_some());
}

#[test]
fn disabled_servos_are_never_opened() {
    let mut board = MockBoard::default();
    let servos = EnabledServos {
        head_turn: true,
        head_lift: false,
        mouth: false,
    };
    let rig = bring_up(&mut board, servos).unwrap();
    assert!(rig.head_lift.is_none());
    assert!(rig.mouth.is_none());
    assert!(!board.opened.contains(&"head-lift servo"));
    assert!(!board.opened.contains(&"mouth servo"));
}

#[test]
fn default_config_leaves_mouth_off() {
    let mut board = MockBoard::default();
    let rig = bring_up(&mut board, EnabledServos::FROM_CONFIG).unwrap();
    assert!(rig.mouth.is_none());
    assert!(rig.head_turn.is_some());
    assert!(rig.head_lift.is_some());
}

#[test]
fn servo_open_failure_halts_before_sensor() {
    let mut board = MockBoard::failing("head-lift servo");
    let err = bring_up(&mut board, ALL_SERVOS).err().expect("bring-up must fail");
    assert_eq!(
        err,
        Error::Actuator(ActuatorError::ChannelOpen("head-lift servo"))
    );
    assert_eq!(err.to_string(), "actuator: head-lift servo did not open");
    assert!(!board.opened.contains(&"range trigger"));
    assert!(!board.opened.contains(&"range echo"));
}

#[test]
fn actuator_open_failure_is_fatal() {
    let mut board = MockBoard::failing("howl relay");
    assert!(bring_up(&mut board, ALL_SERVOS).is_err());
    assert_eq!(board.opened, ["lift gate", "breathing motor"]);
}

#[test]
fn bank_starts_with_howl_relay_released() {
    let mut board = MockBoard::default();
    let rig = bring_up(&mut board, ALL_SERVOS).unwrap();
    let (lift, breathing, howl) = rig.actuators.release();
    assert_eq!(lift.levels, [false]);
    assert_eq!(breathing.levels, [false]);
    // Active-low relay: released means high.
    assert_eq!(howl.levels, [true]);
}
