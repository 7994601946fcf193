//! Boardpilot — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  PiBoard           WiimoteController   L2PingProbe           │
//! │  (ActuatorPort)    (ControllerPort)    (LinkProbe)           │
//! │  SystemPower                                                 │
//! │  (PowerPort)                                                 │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ──────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │   RideService (foreground)  ·  LinkWatchdog (bg)   │      │
//! │  │   translate · smoothing walk · SafetyFlag          │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invocation: `boardpilot [debug] [--config <path>]`. The `debug` flag
//! switches the shutdown coordinator to bench mode: link loss still
//! stops the motor but never powers the device off.

use std::env;
use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info, warn};

use boardpilot::adapters::controller::WiimoteController;
use boardpilot::adapters::hardware::PiBoard;
use boardpilot::adapters::power::SystemPower;
use boardpilot::adapters::probe::L2PingProbe;
use boardpilot::app::ports::{ActuatorPort, ControllerPort};
use boardpilot::app::service::RideService;
use boardpilot::config::SystemConfig;
use boardpilot::drivers::status_led::StatusLed;
use boardpilot::pins;
use boardpilot::safety::{RunMode, SafetyFlag, ShutdownCoordinator};
use boardpilot::watchdog::LinkWatchdog;

fn load_config(args: &[String]) -> Result<SystemConfig> {
    if let Some(i) = args.iter().position(|a| a == "--config") {
        let path = args.get(i + 1).context("--config requires a path")?;
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
        info!("config loaded from {path}");
        Ok(config)
    } else {
        Ok(SystemConfig::default())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mode = if args.iter().any(|a| a == "debug") {
        RunMode::Debug
    } else {
        RunMode::Production
    };
    let config = load_config(&args)?;

    info!("boardpilot v{} ({mode:?})", env!("CARGO_PKG_VERSION"));

    // ── 1. Peripherals ────────────────────────────────────────
    // PiBoard::new sets the ESC frame rate, drives the outputs low,
    // and configures the button pull-up before anything else runs.
    let mut board = PiBoard::new(&config).context("peripheral init")?;
    board.set_frequency(pins::MOTOR_PWM_CHANNEL, pins::ESC_PWM_FREQ_HZ);
    let led = StatusLed::new(pins::POWER_LED_GPIO);

    // ── 2. Controller pairing ─────────────────────────────────
    // Retried indefinitely at a constant interval; each attempt is
    // announced by the 5-blink pattern so the rider can see the board
    // is waiting.
    let mut controller = loop {
        led.blink(&mut board, 5, 400);
        match WiimoteController::connect(&config.controller_device) {
            Ok(c) => break c,
            Err(e) => warn!("controller connect failed ({e}), retrying"),
        }
    };
    led.blink(&mut board, 40, 30);
    controller.set_rumble(true);
    thread::sleep(Duration::from_secs(1));
    controller.set_rumble(false);
    info!("controller connected");

    // ── 3. Link watchdog ──────────────────────────────────────
    let flag = SafetyFlag::new();
    let probe = L2PingProbe::new(&config.controller_addr, config.probe_timeout_secs);
    let coordinator = ShutdownCoordinator::new(flag.clone(), mode, SystemPower::new());
    // The handle is dropped on purpose: the watchdog runs for the
    // process lifetime and must never block exit.
    let _ = LinkWatchdog::new(
        probe,
        coordinator,
        Duration::from_millis(config.watchdog_period_ms),
    )
    .spawn()
    .context("spawning link watchdog")?;

    // ── 4. Ride ───────────────────────────────────────────────
    let mut service = RideService::new(&config, flag.clone());
    match service.run(&mut board, &mut controller) {
        Ok(reason) => {
            info!("ride ended: {reason}");
            Ok(())
        }
        Err(e) => {
            // The service has already forced neutral; anything that
            // escapes the loop is treated like a safety stop and, in
            // production, escalates to power-off.
            error!("ride aborted: {e}");
            ShutdownCoordinator::new(flag, mode, SystemPower::new()).shutdown();
            Err(e.into())
        }
    }
}
