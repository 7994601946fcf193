//! Watchdog integration tests: escalation across loss episodes and the
//! spawned-thread path, plus a full ride-loop/watchdog handoff.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use boardpilot::app::service::{RideService, StopReason};
use boardpilot::config::SystemConfig;
use boardpilot::safety::{RunMode, SafetyFlag, ShutdownCoordinator};
use boardpilot::watchdog::{LinkStatus, LinkWatchdog};

use crate::mock_hw::{MockBoard, MockController, MockPower, ScriptedProbe};

#[test]
fn flag_latches_across_loss_recovery_loss() {
    let flag = SafetyFlag::new();
    let (power, calls) = MockPower::new();
    let probe = ScriptedProbe::alive_then(vec![
        Ok("1 received, 0% loss".into()),
        Ok("100% loss".into()),
        Ok("1 received, 0% loss".into()),
        Ok(String::new()),
    ]);
    let coordinator = ShutdownCoordinator::new(flag.clone(), RunMode::Production, power);
    let mut wd = LinkWatchdog::new(probe, coordinator, Duration::from_millis(0));

    assert_eq!(wd.check_once(), LinkStatus::Alive);
    assert_eq!(wd.check_once(), LinkStatus::Lost);
    assert_eq!(wd.check_once(), LinkStatus::Alive);
    assert_eq!(wd.check_once(), LinkStatus::Lost);

    assert!(flag.stop_requested(), "flag is write-once; recovery never clears it");
    assert_eq!(
        calls.load(Ordering::SeqCst),
        1,
        "a second loss episode must not power off again"
    );
}

#[test]
fn spawned_watchdog_raises_the_flag() {
    let flag = SafetyFlag::new();
    let (power, calls) = MockPower::new();
    let coordinator = ShutdownCoordinator::new(flag.clone(), RunMode::Debug, power);
    let wd = LinkWatchdog::new(
        ScriptedProbe::always_lost(),
        coordinator,
        Duration::from_millis(1),
    );

    let _ = wd.spawn().expect("watchdog thread");

    let deadline = Instant::now() + Duration::from_secs(2);
    while !flag.stop_requested() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(flag.stop_requested());
    assert_eq!(calls.load(Ordering::SeqCst), 0, "debug mode skips power-off");
}

#[test]
fn ride_loop_stops_when_the_watchdog_detects_loss() {
    let config = SystemConfig {
        tick_delay_ms: 0,
        accel_sleep_ms: 0,
        hold_repeat_delay_ms: 0,
        rumble_alert_ms: 0,
        ..SystemConfig::default()
    };
    let flag = SafetyFlag::new();
    let (power, _calls) = MockPower::new();
    let coordinator = ShutdownCoordinator::new(flag.clone(), RunMode::Debug, power);
    let wd = LinkWatchdog::new(
        ScriptedProbe::always_lost(),
        coordinator,
        Duration::from_millis(1),
    );
    let _ = wd.spawn().expect("watchdog thread");

    // Idle controller: the ride loop spins until the watchdog trips it.
    let mut board = MockBoard::new();
    let mut controller = MockController::new();
    let mut service = RideService::new(&config, flag);

    let reason = service.run(&mut board, &mut controller).unwrap();
    assert_eq!(reason, StopReason::LinkLost);
    assert_eq!(*board.pulse_writes.last().unwrap(), 1500);
}
