//! System configuration parameters
//!
//! All tunable parameters for the boardpilot controller. Values can be
//! overridden by pointing the binary at a JSON config file; the defaults
//! match the board the firmware was commissioned on.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Speed envelope (inverted pulse-width scale: larger = slower) ---
    /// Fastest commanded pulse width in µs (numeric lower bound).
    pub max_speed: u16,
    /// Slowest commanded pulse width in µs (numeric upper bound).
    pub min_speed: u16,
    /// Pulse width representing zero commanded motion.
    pub neutral: u16,

    // --- Smoothing ---
    /// Maximum pulse-width change per smoothing tick (µs).
    pub step_size: u16,
    /// Sleep between smoothing ticks (ms).
    pub tick_delay_ms: u64,
    /// Settle pause after reaching a target (ms). Mutable at runtime via
    /// the Plus/Minus buttons — this is the rider's acceleration tune.
    pub accel_sleep_ms: u64,
    /// Upper bound on `accel_sleep_ms`.
    pub accel_ceiling_ms: u64,
    /// Increment applied per Plus/Minus press (ms).
    pub accel_step_ms: u64,

    // --- Input timing ---
    /// Blocking delay after a toggle-style button action (B, A, Plus,
    /// Minus) while the button remains held. Debounce-by-delay: the
    /// action re-triggers every loop iteration after this pause.
    pub hold_repeat_delay_ms: u64,
    /// Duration of the rumble alert on a power-button stop (ms).
    pub rumble_alert_ms: u64,

    // --- Link watchdog ---
    /// Watchdog probe period (ms).
    pub watchdog_period_ms: u64,
    /// l2ping timeout per probe attempt (seconds).
    pub probe_timeout_secs: u32,

    // --- Wireless controller ---
    /// Bluetooth address of the paired Wii remote.
    pub controller_addr: String,
    /// evdev node created by the kernel hid-wiimote driver.
    pub controller_device: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Speed envelope
            max_speed: 1100,
            min_speed: 1720,
            neutral: 1500,

            // Smoothing
            step_size: 2,
            tick_delay_ms: 5,
            accel_sleep_ms: 15,
            accel_ceiling_ms: 100,
            accel_step_ms: 5,

            // Input timing
            hold_repeat_delay_ms: 500,
            rumble_alert_ms: 2000,

            // Link watchdog
            watchdog_period_ms: 100,
            probe_timeout_secs: 1,

            // Wireless controller
            controller_addr: "B8:AE:6E:31:1B:83".into(),
            controller_device: "/dev/input/event0".into(),
        }
    }
}
