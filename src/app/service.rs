//! Ride service — the control loop.
//!
//! [`RideService`] owns the speed controller and the stop-flag handle and
//! drives the two-state machine (`Running` → `Stopped`, terminal). All
//! I/O flows through the port traits passed at each call, so the whole
//! loop runs against mock adapters on the host.
//!
//! ```text
//!  ControllerPort ──▶ ┌─────────────────────────┐
//!                     │       RideService        │ ──▶ ActuatorPort
//!  SafetyFlag ──────▶ │  translate · smooth      │
//!                     └─────────────────────────┘
//! ```

use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::app::input::{translate, InputAction};
use crate::app::ports::{ActuatorPort, ControllerPort};
use crate::config::SystemConfig;
use crate::control::speed::SpeedController;
use crate::error::{Error, Result};
use crate::pins;
use crate::safety::SafetyFlag;

/// Loop state. `Stopped` is terminal — construct a new service to ride
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideState {
    Running,
    Stopped,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The local power button was pressed: an intentional operator stop,
    /// not an error.
    OperatorStop,
    /// The link watchdog set the stop flag.
    LinkLost,
}

impl core::fmt::Display for StopReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OperatorStop => write!(f, "operator stop"),
            Self::LinkLost => write!(f, "link lost"),
        }
    }
}

pub struct RideService {
    speed: SpeedController,
    flag: SafetyFlag,
    state: RideState,
    aux_lights_on: bool,
    accel_step_ms: u64,
    hold_repeat_delay: Duration,
    rumble_alert: Duration,
}

impl RideService {
    pub fn new(config: &SystemConfig, flag: SafetyFlag) -> Self {
        Self {
            speed: SpeedController::new(config),
            flag,
            state: RideState::Running,
            aux_lights_on: false,
            accel_step_ms: config.accel_step_ms,
            hold_repeat_delay: Duration::from_millis(config.hold_repeat_delay_ms),
            rumble_alert: Duration::from_millis(config.rumble_alert_ms),
        }
    }

    /// Run the control loop until a stop condition is observed.
    ///
    /// Whatever the exit path — operator stop, watchdog flag, or a
    /// controller failure — the actuator is commanded to neutral before
    /// this returns. That is the one universal recovery action: the
    /// motor is never left commanded above neutral.
    pub fn run(
        &mut self,
        hw: &mut impl ActuatorPort,
        controller: &mut impl ControllerPort,
    ) -> Result<StopReason> {
        if self.state == RideState::Stopped {
            return Err(Error::Init("ride service already stopped"));
        }

        // Indicator: power-button ring LED solid while running.
        hw.set_digital(pins::POWER_LED_GPIO, true);
        info!("ride loop entering Running");

        let result = self.ride(hw, controller);

        self.speed.neutral(hw);
        self.state = RideState::Stopped;
        match &result {
            Ok(reason) => info!("ride loop Stopped: {reason}"),
            Err(e) => warn!("ride loop Stopped on error: {e}"),
        }
        result
    }

    fn ride(
        &mut self,
        hw: &mut impl ActuatorPort,
        controller: &mut impl ControllerPort,
    ) -> Result<StopReason> {
        loop {
            // 1. Local safety button (active low). This path alerts the
            //    rider through the controller before stopping.
            if !hw.read_digital(pins::POWER_BUTTON_GPIO) {
                info!("power button pressed — alerting rider");
                controller.set_rumble(true);
                thread::sleep(self.rumble_alert);
                controller.set_rumble(false);
                return Ok(StopReason::OperatorStop);
            }

            // 2. Watchdog flag.
            if self.flag.stop_requested() {
                return Ok(StopReason::LinkLost);
            }

            // 3. Sample buttons and apply the translated actions. A read
            //    failure aborts the ride; run() still forces neutral.
            let buttons = controller.read_buttons()?;
            for action in translate(&buttons) {
                self.apply(action, hw, controller);
            }
        }
    }

    /// Apply one translated action.
    ///
    /// Toggle-style actions (B, A, Plus, Minus) block for the hold-repeat
    /// delay and re-trigger every iteration while the button stays held.
    /// That debounce-by-delay policy is intentional and matches the
    /// shipped boards; edge-triggering would change observable timing.
    fn apply(
        &mut self,
        action: InputAction,
        hw: &mut impl ActuatorPort,
        controller: &mut impl ControllerPort,
    ) {
        match action {
            InputAction::SetNeutral => {
                self.speed.neutral(hw);
                thread::sleep(self.hold_repeat_delay);
            }
            InputAction::Faster => self.speed.nudge(-1, hw),
            InputAction::Slower => self.speed.nudge(1, hw),
            InputAction::AccelUp => {
                let v = self.speed.adjust_accel(self.accel_step_ms as i64);
                info!("accel settle pause: {v} ms");
                thread::sleep(self.hold_repeat_delay);
            }
            InputAction::AccelDown => {
                let v = self.speed.adjust_accel(-(self.accel_step_ms as i64));
                info!("accel settle pause: {v} ms");
                thread::sleep(self.hold_repeat_delay);
            }
            InputAction::ToggleAux => {
                self.toggle_aux(hw, controller);
                thread::sleep(self.hold_repeat_delay);
            }
        }
    }

    /// Pulse the aux light controller and mirror the state onto the
    /// handheld's player LEDs.
    fn toggle_aux(&mut self, hw: &mut impl ActuatorPort, controller: &mut impl ControllerPort) {
        if self.aux_lights_on {
            hw.set_digital(pins::AUX_LIGHTS_OFF_GPIO, true);
            hw.set_digital(pins::AUX_LIGHTS_ON_GPIO, false);
            controller.set_leds(0x00);
            self.aux_lights_on = false;
        } else {
            hw.set_digital(pins::AUX_LIGHTS_ON_GPIO, true);
            controller.set_leds(0x0f);
            self.aux_lights_on = true;
        }
        info!("aux lights {}", if self.aux_lights_on { "on" } else { "off" });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> RideState {
        self.state
    }

    /// Current commanded pulse width.
    pub fn current_speed(&self) -> u16 {
        self.speed.current()
    }

    /// Current accel settle pause (ms).
    pub fn accel_sleep_ms(&self) -> u64 {
        self.speed.accel_sleep_ms()
    }
}
