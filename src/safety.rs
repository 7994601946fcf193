//! Safety stop flag and shutdown coordinator.
//!
//! The [`SafetyFlag`] is the only state shared between the foreground
//! ride loop and the background link watchdog. It has exactly one legal
//! transition — false → true — and is never reset; the only consumer
//! action is "stop or don't", so a relaxed-ordering atomic would already
//! be safe, but `SeqCst` keeps the reasoning trivial.
//!
//! ## Shutdown lifecycle
//!
//! 1. The watchdog classifies the link as `Lost`.
//! 2. It calls [`ShutdownCoordinator::shutdown`].
//! 3. The coordinator swaps the flag; if it was already set, nothing
//!    more happens — one power-off per loss episode, ever.
//! 4. The ride loop observes the flag on its next iteration, commands
//!    neutral, and exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use crate::app::ports::PowerPort;

// ───────────────────────────────────────────────────────────────
// SafetyFlag
// ───────────────────────────────────────────────────────────────

/// Process-wide write-once-true stop flag. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct SafetyFlag(Arc<AtomicBool>);

impl SafetyFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request a stop. Returns `true` if this call performed the
    /// false→true transition, `false` if the flag was already set.
    pub fn request_stop(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    /// Has a stop been requested?
    pub fn stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ───────────────────────────────────────────────────────────────
// Run mode
// ───────────────────────────────────────────────────────────────

/// Whether a confirmed link loss powers the device off.
///
/// `Debug` reports the event without the destructive side effect so the
/// control logic can be exercised on the bench without killing the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Debug,
    Production,
}

// ───────────────────────────────────────────────────────────────
// ShutdownCoordinator
// ───────────────────────────────────────────────────────────────

/// Performs the emergency-stop sequence: flag first (so the ride loop
/// goes to neutral), then — in production only — external power-off.
pub struct ShutdownCoordinator<P: PowerPort> {
    flag: SafetyFlag,
    mode: RunMode,
    power: P,
}

impl<P: PowerPort> ShutdownCoordinator<P> {
    pub fn new(flag: SafetyFlag, mode: RunMode, power: P) -> Self {
        Self { flag, mode, power }
    }

    /// Idempotent emergency shutdown. The first call sets the flag and,
    /// in production mode, issues the power-off command; every later
    /// call is a no-op — no duplicate power-off.
    pub fn shutdown(&mut self) {
        if !self.flag.request_stop() {
            return;
        }
        match self.mode {
            RunMode::Debug => {
                warn!("emergency stop requested (debug mode — skipping power-off)");
            }
            RunMode::Production => {
                warn!("emergency stop requested — powering off");
                self.power.power_off();
            }
        }
        info!("stop flag set");
    }

    /// Handle to the shared flag.
    pub fn flag(&self) -> SafetyFlag {
        self.flag.clone()
    }
}
