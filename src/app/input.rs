//! Button state and the input translator.
//!
//! [`translate`] is a pure mapping from a sampled [`ButtonState`] to a
//! bounded list of [`InputAction`]s — no side effects, no timing. That is
//! what makes the button mapping independently testable; the blocking
//! hold-repeat delays live in the ride loop, not here.

use heapless::Vec;

// ---------------------------------------------------------------------------
// Wii remote button report bits (core button word, big-endian report 0x30)
// ---------------------------------------------------------------------------

pub const BTN_B: u16 = 0x0004;
pub const BTN_A: u16 = 0x0008;
pub const BTN_MINUS: u16 = 0x0010;
pub const BTN_PLUS: u16 = 0x1000;
pub const BTN_UP: u16 = 0x0800;
pub const BTN_DOWN: u16 = 0x0400;

/// Buttons sampled once per control-loop iteration.
///
/// Six independent flags; transient, read-only to the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub a: bool,
    pub b: bool,
    pub up: bool,
    pub down: bool,
    pub plus: bool,
    pub minus: bool,
}

impl ButtonState {
    /// Decode the core-button bitmask from a Wii remote report.
    pub fn from_bits(bits: u16) -> Self {
        Self {
            a: bits & BTN_A != 0,
            b: bits & BTN_B != 0,
            up: bits & BTN_UP != 0,
            down: bits & BTN_DOWN != 0,
            plus: bits & BTN_PLUS != 0,
            minus: bits & BTN_MINUS != 0,
        }
    }

    /// True if no button is held.
    pub fn is_idle(&self) -> bool {
        !(self.a || self.b || self.up || self.down || self.plus || self.minus)
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Actions the translator can request from the ride loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// B — snap the target to neutral (braking).
    SetNeutral,
    /// Up — one step faster (−1 on the inverted pulse-width scale).
    Faster,
    /// Down — one step slower (+1).
    Slower,
    /// Plus — lengthen the accel settle pause (softer acceleration).
    AccelUp,
    /// Minus — shorten it (sharper acceleration).
    AccelDown,
    /// A — toggle the aux deck lights.
    ToggleAux,
}

/// Upper bound on actions per sample: every mapped button held at once.
pub const MAX_ACTIONS: usize = 6;

/// Map a button sample to actions. Fixed mapping, fixed evaluation order
/// (A, B, Down, Up, Plus, Minus); buttons are independent, so chording
/// yields multiple actions in that order.
pub fn translate(buttons: &ButtonState) -> Vec<InputAction, MAX_ACTIONS> {
    let mut actions = Vec::new();
    if buttons.a {
        let _ = actions.push(InputAction::ToggleAux);
    }
    if buttons.b {
        let _ = actions.push(InputAction::SetNeutral);
    }
    if buttons.down {
        let _ = actions.push(InputAction::Slower);
    }
    if buttons.up {
        let _ = actions.push(InputAction::Faster);
    }
    if buttons.plus {
        let _ = actions.push(InputAction::AccelUp);
    }
    if buttons.minus {
        let _ = actions.push(InputAction::AccelDown);
    }
    actions
}
