//! Power-button ring LED driver.
//!
//! A single GPIO-driven LED used for two things: the solid "running"
//! indicator and the pairing blink patterns (5 slow blinks per connect
//! attempt, a 40-blink flourish on success). Operates through the
//! actuator port so it works against mocks on the host.

use std::thread;
use std::time::Duration;

use crate::app::ports::ActuatorPort;

pub struct StatusLed {
    pin: u8,
}

impl StatusLed {
    pub fn new(pin: u8) -> Self {
        Self { pin }
    }

    pub fn set(&self, hw: &mut impl ActuatorPort, on: bool) {
        hw.set_digital(self.pin, on);
    }

    /// Blink `times` on/off cycles with `period_ms` per half-cycle.
    /// Leaves the LED off.
    pub fn blink(&self, hw: &mut impl ActuatorPort, times: u32, period_ms: u64) {
        let period = Duration::from_millis(period_ms);
        for _ in 0..times {
            hw.set_digital(self.pin, true);
            thread::sleep(period);
            hw.set_digital(self.pin, false);
            thread::sleep(period);
        }
    }
}
