//! GPIO pin assignments for the Raspberry Pi Zero W 40-pin header.
//!
//! Single source of truth — every adapter references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere. Numbers are BCM GPIO numbers, not header positions.

/// Hardware PWM channel driving the ESC (GPIO 18 = PWM0, header pin 12).
pub const MOTOR_PWM_CHANNEL: u8 = 0;

/// Power-button ring LED (GPIO 17, header pin 11). Held solid while the
/// control loop is running; blinked during controller pairing.
pub const POWER_LED_GPIO: u8 = 17;

/// Power button (GPIO 27, header pin 13). Active low with internal
/// pull-up — pressed reads LOW.
pub const POWER_BUTTON_GPIO: u8 = 27;

/// Aux light controller trigger: ON pulse (GPIO 26, header pin 37).
pub const AUX_LIGHTS_ON_GPIO: u8 = 26;
/// Aux light controller trigger: OFF pulse (GPIO 16, header pin 36).
pub const AUX_LIGHTS_OFF_GPIO: u8 = 16;

/// ESC servo-pulse frame rate. Standard hobby ESCs expect 50 Hz
/// (20 ms frames with a 1000–2000 µs pulse).
pub const ESC_PWM_FREQ_HZ: u32 = 50;
