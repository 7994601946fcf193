//! Unified error types for the boardpilot controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control loop's error handling uniform. All variants are
//! `Copy`-cheap so they pass through the loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The wireless controller could not be read.
    Controller(ControllerError),
    /// The link probe could not be executed.
    Probe(ProbeError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller(e) => write!(f, "controller: {e}"),
            Self::Probe(e) => write!(f, "probe: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Wireless controller errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// The input device node is gone (controller unpaired or kernel
    /// driver removed the node).
    Disconnected,
    /// Reading the button state failed.
    ReadFailed,
    /// A feedback command (rumble, LEDs) failed.
    FeedbackFailed,
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "controller disconnected"),
            Self::ReadFailed => write!(f, "button read failed"),
            Self::FeedbackFailed => write!(f, "feedback command failed"),
        }
    }
}

impl From<ControllerError> for Error {
    fn from(e: ControllerError) -> Self {
        Self::Controller(e)
    }
}

// ---------------------------------------------------------------------------
// Link probe errors
// ---------------------------------------------------------------------------

/// Probe failures are classified deliberately, not caught blindly: the
/// watchdog folds every variant into a `Lost` link classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// The probe command could not be spawned (missing binary, fork
    /// failure).
    SpawnFailed,
    /// The probe ran but its output was not valid UTF-8.
    OutputUnreadable,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnFailed => write!(f, "probe spawn failed"),
            Self::OutputUnreadable => write!(f, "probe output unreadable"),
        }
    }
}

impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
