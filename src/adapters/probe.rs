//! Bluetooth link probe via `l2ping`.
//!
//! One probe = one echo request with a bounded timeout, so a single
//! `sample` call blocks for at most the timeout — acceptable because the
//! watchdog runs off the motor-control path. `l2ping` needs raw-socket
//! capability, hence the `sudo` prefix (the daemon's service user has a
//! matching sudoers entry).

use std::process::Command;

use crate::app::ports::LinkProbe;
use crate::error::ProbeError;

pub struct L2PingProbe {
    address: String,
    timeout_secs: u32,
}

impl L2PingProbe {
    pub fn new(address: &str, timeout_secs: u32) -> Self {
        Self {
            address: address.to_string(),
            timeout_secs,
        }
    }

    /// Argument vector for the probe command (split out for testing).
    fn argv(&self) -> Vec<String> {
        vec![
            "l2ping".into(),
            "-c".into(),
            "1".into(),
            "-t".into(),
            self.timeout_secs.to_string(),
            self.address.clone(),
        ]
    }
}

impl LinkProbe for L2PingProbe {
    fn sample(&mut self) -> Result<String, ProbeError> {
        let output = Command::new("sudo")
            .args(self.argv())
            .output()
            .map_err(|_| ProbeError::SpawnFailed)?;
        // A non-zero exit with loss statistics on stdout is still a valid
        // sample; classification happens in the watchdog.
        String::from_utf8(output.stdout).map_err(|_| ProbeError::OutputUnreadable)
    }
}
