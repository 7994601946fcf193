//! Device power-off via the OS.
//!
//! Fire-and-forget: when this succeeds the process is terminated
//! externally, so there is nothing useful to return. A spawn failure is
//! logged — the stop flag is already set by the coordinator at this
//! point, so the motor is safe either way.

use std::process::Command;

use log::error;

use crate::app::ports::PowerPort;

pub struct SystemPower;

impl SystemPower {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemPower {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerPort for SystemPower {
    fn power_off(&mut self) {
        if let Err(e) = Command::new("sudo").args(["shutdown", "now"]).status() {
            error!("power-off command failed: {e}");
        }
    }
}
