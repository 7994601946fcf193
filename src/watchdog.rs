//! Link watchdog — background monitor for the wireless control link.
//!
//! Runs off the motor-control path on its own thread, probing the link
//! every [`crate::config::SystemConfig::watchdog_period_ms`]. Each probe is a single
//! bounded-timeout attempt; a stuck probe delays the next classification
//! by at most one timeout period, which is acceptable given the periodic
//! retry. On a `Lost` classification the watchdog escalates through the
//! [`ShutdownCoordinator`], whose idempotence guarantees one escalation
//! per continuous-loss episode.
//!
//! The thread runs for the lifetime of the process and never exits
//! normally; it is deliberately not joined so it cannot block exit.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::app::ports::{LinkProbe, PowerPort};
use crate::error::ProbeError;
use crate::safety::ShutdownCoordinator;

/// Result of a single probe cycle. Not persisted — recomputed each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Alive,
    Lost,
}

/// Classify one probe outcome.
///
/// "100% loss" in the output means the controller died; empty output
/// means the bluetooth dongle died; a probe error is folded into `Lost`
/// deliberately (an unprobeable link is an unusable link). Anything else
/// non-empty counts as `Alive`.
pub fn classify(outcome: Result<String, ProbeError>) -> LinkStatus {
    match outcome {
        Ok(output) if output.is_empty() => LinkStatus::Lost,
        Ok(output) if output.contains("100% loss") => LinkStatus::Lost,
        Ok(_) => LinkStatus::Alive,
        Err(e) => {
            debug!("probe error treated as link loss: {e}");
            LinkStatus::Lost
        }
    }
}

pub struct LinkWatchdog<L: LinkProbe, P: PowerPort> {
    probe: L,
    coordinator: ShutdownCoordinator<P>,
    period: Duration,
    last_status: Option<LinkStatus>,
}

impl<L, P> LinkWatchdog<L, P>
where
    L: LinkProbe + Send + 'static,
    P: PowerPort + Send + 'static,
{
    pub fn new(probe: L, coordinator: ShutdownCoordinator<P>, period: Duration) -> Self {
        Self {
            probe,
            coordinator,
            period,
            last_status: None,
        }
    }

    /// One probe-classify-escalate cycle. Split out so tests can drive
    /// the watchdog without threads or real probes.
    pub fn check_once(&mut self) -> LinkStatus {
        let status = classify(self.probe.sample());
        if self.last_status != Some(status) {
            match status {
                LinkStatus::Alive => info!("controller link alive"),
                LinkStatus::Lost => warn!("controller link lost"),
            }
            self.last_status = Some(status);
        }
        if status == LinkStatus::Lost {
            self.coordinator.shutdown();
        }
        status
    }

    /// Move the watchdog onto its own thread. The handle is returned for
    /// tests; production callers drop it — the thread must not be joined.
    pub fn spawn(mut self) -> std::io::Result<thread::JoinHandle<()>> {
        let period = self.period;
        thread::Builder::new()
            .name("link-watchdog".into())
            .spawn(move || loop {
                let _ = self.check_once();
                thread::sleep(period);
            })
    }
}
