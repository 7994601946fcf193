//! Concrete adapters behind the port traits.
//!
//! `probe` and `power` wrap plain Linux subprocesses and always build;
//! `hardware` (rppal GPIO/PWM) and `controller` (evdev hid-wiimote node)
//! need the `rpi` feature.

pub mod power;
pub mod probe;

#[cfg(feature = "rpi")]
pub mod controller;
#[cfg(feature = "rpi")]
pub mod hardware;
