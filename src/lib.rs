//! Boardpilot control library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All Raspberry-Pi-specific code lives under `adapters` and
//! is guarded by the `rpi` cargo feature.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod safety;
pub mod watchdog;

pub mod error;
pub mod pins;

// The l2ping probe and power-off adapters are plain Linux subprocess
// wrappers and always build; the GPIO and controller adapters need `rpi`.
pub mod adapters;
