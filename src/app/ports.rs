//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RideService (domain)
//! ```
//!
//! Driven adapters (GPIO/PWM board, wireless controller, link probe,
//! power-off) implement these traits. The domain consumes them via
//! generics, so the control loop never touches hardware directly and the
//! whole thing runs against mocks on the host.

use crate::app::input::ButtonState;
use crate::error::{ControllerError, ProbeError};

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → GPIO / PWM)
// ───────────────────────────────────────────────────────────────

/// Write/read side of the motor driver board.
///
/// Pulse-width writes are the sole channel by which physical motor speed
/// changes. The methods are infallible by design: a failed GPIO write is
/// logged inside the adapter, never surfaced to the control loop, because
/// there is no recovery action other than "command neutral" — which is
/// itself a pulse-width write.
pub trait ActuatorPort {
    /// Set the PWM frame rate for a channel (Hz).
    fn set_frequency(&mut self, channel: u8, hz: u32);

    /// Write a servo pulse width (µs) to a PWM channel.
    fn set_pulse_width(&mut self, channel: u8, value: u16);

    /// Drive a digital output pin.
    fn set_digital(&mut self, pin: u8, level: bool);

    /// Read a digital input pin.
    fn read_digital(&mut self, pin: u8) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Controller port (domain ↔ wireless handheld)
// ───────────────────────────────────────────────────────────────

/// The paired wireless controller. Pairing/discovery is handled by the
/// adapter's constructor; the domain only ever samples and signals.
pub trait ControllerPort {
    /// Sample the current button state. Sampled once per loop iteration.
    fn read_buttons(&mut self) -> Result<ButtonState, ControllerError>;

    /// Haptic feedback on/off.
    fn set_rumble(&mut self, on: bool);

    /// Set the controller's player-LED bitmask (bit 0 = LED 1).
    fn set_leds(&mut self, mask: u8);
}

// ───────────────────────────────────────────────────────────────
// Link probe port (watchdog → bluetooth layer)
// ───────────────────────────────────────────────────────────────

/// One bounded-timeout link probe. Returns the probe tool's raw output;
/// classification into `Alive`/`Lost` happens in the watchdog so that the
/// decision rules live in testable domain code.
pub trait LinkProbe {
    fn sample(&mut self) -> Result<String, ProbeError>;
}

// ───────────────────────────────────────────────────────────────
// Power port (shutdown coordinator → OS)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget device power-off. In production this does not return
/// control in any meaningful sense — the OS is going down.
pub trait PowerPort {
    fn power_off(&mut self);
}
