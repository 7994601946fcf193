//! Speed controller with a bounded-rate smoothing walk.
//!
//! The ESC is commanded on an **inverted** pulse-width scale: a larger
//! pulse width means a slower board, so `max_speed` is the numeric lower
//! bound of the envelope and `min_speed` the upper. Every write that
//! reaches the actuator goes through [`SpeedController::set_target`],
//! which clamps into the envelope and walks the command toward the target
//! in `step_size` increments with a sleep between writes. That bounds the
//! instantaneous change to `step_size` per `tick_delay` and prevents the
//! ESC from seeing a torque step that could throw the rider.

use std::thread;
use std::time::Duration;

use crate::app::ports::ActuatorPort;
use crate::config::SystemConfig;
use crate::pins;

/// A commanded pulse width in µs. Always within `[max_speed, min_speed]`
/// once it has passed through the controller.
pub type SpeedCommand = u16;

pub struct SpeedController {
    current: SpeedCommand,
    max_speed: u16,
    min_speed: u16,
    neutral: u16,
    step_size: u16,
    tick_delay: Duration,
    /// Settle pause after reaching a target, in ms. Rider-tunable within
    /// `[0, accel_ceiling_ms]` — a longer pause means each ±1 nudge takes
    /// effect less often, i.e. gentler acceleration.
    accel_sleep_ms: u64,
    accel_ceiling_ms: u64,
}

impl SpeedController {
    /// Construct at neutral. Nothing is written to the actuator until the
    /// first `set_target` call.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            current: config.neutral,
            max_speed: config.max_speed,
            min_speed: config.min_speed,
            neutral: config.neutral,
            step_size: config.step_size,
            tick_delay: Duration::from_millis(config.tick_delay_ms),
            accel_sleep_ms: config.accel_sleep_ms,
            accel_ceiling_ms: config.accel_ceiling_ms,
        }
    }

    /// Clamp `value` into the speed envelope, then smooth toward it.
    ///
    /// While the distance to the target exceeds `step_size`, the command
    /// moves by `±step_size` per tick and each intermediate value is
    /// pushed to the actuator. The exact clamped target is always the
    /// final write, followed by the settle pause. Out-of-range input is
    /// silently clamped — a policy decision, not a failure.
    pub fn set_target(&mut self, value: SpeedCommand, hw: &mut impl ActuatorPort) {
        let target = value.clamp(self.max_speed, self.min_speed);
        while (i32::from(target) - i32::from(self.current)).abs() > i32::from(self.step_size) {
            let direction = (i32::from(target) - i32::from(self.current)).signum();
            self.current =
                (i32::from(self.current) + direction * i32::from(self.step_size)) as u16;
            hw.set_pulse_width(pins::MOTOR_PWM_CHANNEL, self.current);
            thread::sleep(self.tick_delay);
        }
        hw.set_pulse_width(pins::MOTOR_PWM_CHANNEL, target);
        self.current = target;
        thread::sleep(Duration::from_millis(self.accel_sleep_ms));
    }

    /// Move the target relative to the current command.
    pub fn nudge(&mut self, delta: i16, hw: &mut impl ActuatorPort) {
        let target = i32::from(self.current) + i32::from(delta);
        // Negative deltas can only occur near the envelope edge; clamp in
        // set_target handles the rest.
        let target = target.clamp(0, i32::from(u16::MAX)) as u16;
        self.set_target(target, hw);
    }

    /// Command neutral.
    pub fn neutral(&mut self, hw: &mut impl ActuatorPort) {
        self.set_target(self.neutral, hw);
    }

    /// Adjust the settle pause by `delta_ms`, clamped to
    /// `[0, accel_ceiling_ms]`. Returns the new value.
    pub fn adjust_accel(&mut self, delta_ms: i64) -> u64 {
        let next = self.accel_sleep_ms as i64 + delta_ms;
        self.accel_sleep_ms = next.clamp(0, self.accel_ceiling_ms as i64) as u64;
        self.accel_sleep_ms
    }

    /// Current commanded pulse width. Pure read.
    pub fn current(&self) -> SpeedCommand {
        self.current
    }

    /// Current settle pause in ms. Pure read.
    pub fn accel_sleep_ms(&self) -> u64 {
        self.accel_sleep_ms
    }
}
