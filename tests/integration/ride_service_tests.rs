//! Ride-loop integration tests against scripted mock adapters.
//!
//! Timing parameters are zeroed so the scripted rides run instantly; the
//! behaviour under test is the command stream, not the wall clock.

use boardpilot::app::input::ButtonState;
use boardpilot::app::service::{RideService, RideState, StopReason};
use boardpilot::config::SystemConfig;
use boardpilot::error::{ControllerError, Error};
use boardpilot::pins;
use boardpilot::safety::SafetyFlag;

use crate::mock_hw::{MockBoard, MockController};

fn fast_config() -> SystemConfig {
    SystemConfig {
        tick_delay_ms: 0,
        accel_sleep_ms: 0,
        hold_repeat_delay_ms: 0,
        rumble_alert_ms: 0,
        ..SystemConfig::default()
    }
}

fn held(f: impl Fn(&mut ButtonState)) -> Result<ButtonState, ControllerError> {
    let mut state = ButtonState::default();
    f(&mut state);
    Ok(state)
}

#[test]
fn preset_flag_stops_immediately_with_neutral_commanded() {
    let flag = SafetyFlag::new();
    assert!(flag.request_stop());

    let mut board = MockBoard::new();
    let mut controller = MockController::new();
    let mut service = RideService::new(&fast_config(), flag);

    let reason = service.run(&mut board, &mut controller).unwrap();
    assert_eq!(reason, StopReason::LinkLost);
    assert_eq!(service.state(), RideState::Stopped);
    // Exit always re-commands neutral, even from a standstill.
    assert_eq!(board.pulse_writes, vec![1500]);
}

#[test]
fn stopped_service_refuses_to_run_again() {
    let flag = SafetyFlag::new();
    assert!(flag.request_stop());

    let mut board = MockBoard::new();
    let mut controller = MockController::new();
    let mut service = RideService::new(&fast_config(), flag);

    service.run(&mut board, &mut controller).unwrap();
    let again = service.run(&mut board, &mut controller);
    assert!(matches!(again, Err(Error::Init(_))));
}

#[test]
fn power_button_press_rumbles_then_stops() {
    let mut board = MockBoard::new();
    board.button_levels.push_back(false); // active low: pressed

    let mut controller = MockController::new();
    let mut service = RideService::new(&fast_config(), SafetyFlag::new());

    let reason = service.run(&mut board, &mut controller).unwrap();
    assert_eq!(reason, StopReason::OperatorStop);
    assert_eq!(controller.rumble_calls, vec![true, false]);
    assert_eq!(*board.pulse_writes.last().unwrap(), 1500);
}

#[test]
fn power_led_goes_solid_on_entry() {
    let flag = SafetyFlag::new();
    assert!(flag.request_stop());

    let mut board = MockBoard::new();
    let mut controller = MockController::new();
    RideService::new(&fast_config(), flag)
        .run(&mut board, &mut controller)
        .unwrap();

    assert_eq!(board.digital_writes.first(), Some(&(pins::POWER_LED_GPIO, true)));
}

#[test]
fn up_press_nudges_faster_and_exit_restores_neutral() {
    let flag = SafetyFlag::new();
    let mut board = MockBoard::new();
    let mut controller = MockController::with_frames(vec![held(|b| b.up = true)])
        .stop_after(1, flag.clone());
    let mut service = RideService::new(&fast_config(), flag);

    let reason = service.run(&mut board, &mut controller).unwrap();
    assert_eq!(reason, StopReason::LinkLost);
    // Faster = −1 on the inverted scale, then neutral on exit.
    assert_eq!(board.pulse_writes, vec![1499, 1500]);
    assert_eq!(service.current_speed(), 1500);
}

#[test]
fn brake_walks_back_to_neutral_in_bounded_steps() {
    let flag = SafetyFlag::new();
    let mut frames: Vec<_> = (0..5).map(|_| held(|b| b.down = true)).collect();
    frames.push(held(|b| b.b = true));

    let mut board = MockBoard::new();
    let mut controller = MockController::with_frames(frames).stop_after(6, flag.clone());
    let mut service = RideService::new(&fast_config(), flag);

    service.run(&mut board, &mut controller).unwrap();
    assert_eq!(
        board.pulse_writes,
        vec![1501, 1502, 1503, 1504, 1505, 1503, 1501, 1500, 1500],
        "five slower nudges, smoothed brake to neutral, neutral on exit"
    );
}

#[test]
fn controller_read_failure_aborts_but_still_commands_neutral() {
    let mut board = MockBoard::new();
    let mut controller =
        MockController::with_frames(vec![Err(ControllerError::ReadFailed)]);
    let mut service = RideService::new(&fast_config(), SafetyFlag::new());

    let result = service.run(&mut board, &mut controller);
    assert_eq!(
        result,
        Err(Error::Controller(ControllerError::ReadFailed))
    );
    assert_eq!(service.state(), RideState::Stopped);
    assert_eq!(*board.pulse_writes.last().unwrap(), 1500);
}

#[test]
fn aux_toggle_drives_light_triggers_and_player_leds() {
    let flag = SafetyFlag::new();
    let frames = vec![held(|b| b.a = true), held(|b| b.a = true)];

    let mut board = MockBoard::new();
    let mut controller = MockController::with_frames(frames).stop_after(2, flag.clone());
    let mut service = RideService::new(&fast_config(), flag);

    service.run(&mut board, &mut controller).unwrap();
    assert_eq!(controller.led_masks, vec![0x0f, 0x00]);
    assert!(board
        .digital_writes
        .contains(&(pins::AUX_LIGHTS_ON_GPIO, true)));
    assert!(board
        .digital_writes
        .contains(&(pins::AUX_LIGHTS_OFF_GPIO, true)));
}

#[test]
fn accel_tuning_saturates_at_the_ceiling() {
    let config = fast_config();
    let flag = SafetyFlag::new();
    let frames: Vec<_> = (0..30).map(|_| held(|b| b.plus = true)).collect();

    let mut board = MockBoard::new();
    let mut controller = MockController::with_frames(frames).stop_after(30, flag.clone());
    let mut service = RideService::new(&config, flag);

    service.run(&mut board, &mut controller).unwrap();
    assert_eq!(service.accel_sleep_ms(), config.accel_ceiling_ms);
}

#[test]
fn accel_tuning_saturates_at_zero() {
    let flag = SafetyFlag::new();
    let frames: Vec<_> = (0..30).map(|_| held(|b| b.minus = true)).collect();

    let mut board = MockBoard::new();
    let mut controller = MockController::with_frames(frames).stop_after(30, flag.clone());
    let mut service = RideService::new(&fast_config(), flag);

    service.run(&mut board, &mut controller).unwrap();
    assert_eq!(service.accel_sleep_ms(), 0);
}
