//! Wii remote adapter over the kernel hid-wiimote evdev node.
//!
//! Pairing is done out of band (bluetoothctl); once paired, hid-wiimote
//! exposes the remote as an input device with key events, a force-
//! feedback rumble motor, and the four player LEDs as sysfs LED class
//! devices. This adapter polls the cached key state once per loop
//! iteration rather than draining the event stream — the loop only cares
//! about "held right now", which is exactly what EVIOCGKEY reports.

use std::fs;

use evdev::{Device, FFEffect, FFEffectData, FFEffectKind, FFReplay, FFTrigger, KeyCode};
use log::warn;

use crate::app::input::ButtonState;
use crate::app::ports::ControllerPort;
use crate::error::ControllerError;

/// Longest single rumble burst we ever request (ms).
const RUMBLE_BURST_MS: u16 = 5000;

pub struct WiimoteController {
    device: Device,
    rumble: Option<FFEffect>,
}

impl WiimoteController {
    /// Open the hid-wiimote input node and upload the rumble effect.
    ///
    /// A missing rumble motor is tolerated (some clones lack one); a
    /// missing device node is not.
    pub fn connect(path: &str) -> Result<Self, ControllerError> {
        let mut device = Device::open(path).map_err(|e| {
            warn!("opening {path} failed: {e}");
            ControllerError::Disconnected
        })?;

        let effect_data = FFEffectData {
            direction: 0,
            trigger: FFTrigger {
                button: 0,
                interval: 0,
            },
            replay: FFReplay {
                length: RUMBLE_BURST_MS,
                delay: 0,
            },
            kind: FFEffectKind::Rumble {
                strong_magnitude: u16::MAX,
                weak_magnitude: 0,
            },
        };
        let rumble = match device.upload_ff_effect(effect_data) {
            Ok(effect) => Some(effect),
            Err(e) => {
                warn!("rumble effect upload failed ({e}) — continuing without haptics");
                None
            }
        };

        Ok(Self { device, rumble })
    }
}

impl ControllerPort for WiimoteController {
    fn read_buttons(&mut self) -> Result<ButtonState, ControllerError> {
        let keys = self.device.get_key_state().map_err(|e| {
            warn!("key-state read failed: {e}");
            ControllerError::ReadFailed
        })?;
        Ok(ButtonState {
            // hid-wiimote maps A/B to BTN_SOUTH/BTN_EAST (= BTN_A/BTN_B)
            a: keys.contains(KeyCode::BTN_SOUTH),
            b: keys.contains(KeyCode::BTN_EAST),
            up: keys.contains(KeyCode::KEY_UP),
            down: keys.contains(KeyCode::KEY_DOWN),
            plus: keys.contains(KeyCode::KEY_NEXT),
            minus: keys.contains(KeyCode::KEY_PREVIOUS),
        })
    }

    fn set_rumble(&mut self, on: bool) {
        let Some(effect) = self.rumble.as_mut() else {
            return;
        };
        let result = if on { effect.play(1) } else { effect.stop() };
        if let Err(e) = result {
            warn!("rumble command failed: {e}");
        }
    }

    fn set_leds(&mut self, mask: u8) {
        // hid-wiimote exposes the player LEDs as /sys/class/leds/
        // <hid-dev>:blue:p0 .. p3.
        let Ok(entries) = fs::read_dir("/sys/class/leds") else {
            warn!("LED class directory unavailable");
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            for led in 0..4u8 {
                if name.ends_with(&format!(":blue:p{led}")) {
                    let value = if mask & (1 << led) != 0 { "1" } else { "0" };
                    let path = entry.path().join("brightness");
                    if let Err(e) = fs::write(&path, value) {
                        warn!("LED write failed for {name}: {e}");
                    }
                }
            }
        }
    }
}
