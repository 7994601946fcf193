//! Raspberry Pi board adapter — bridges real GPIO/PWM to [`ActuatorPort`].
//!
//! This is the only module that touches the Pi's peripherals. The ESC
//! hangs off hardware PWM channel 0 (GPIO 18); the power LED, aux-light
//! triggers, and power button are plain GPIO. The constructor performs
//! the full initialisation the ESC and button require: 50 Hz frame rate,
//! neutral pulse, output directions, pull-up on the button pin.
//!
//! Port methods are infallible; a failed peripheral write is logged and
//! dropped because the only recovery is another pulse-width write.

use std::collections::HashMap;
use std::time::Duration;

use log::warn;
use rppal::gpio::{Gpio, InputPin, OutputPin};
use rppal::pwm::{Channel, Polarity, Pwm};

use crate::app::ports::ActuatorPort;
use crate::config::SystemConfig;
use crate::error::{Error, Result};
use crate::pins;

pub struct PiBoard {
    esc: Pwm,
    outputs: HashMap<u8, OutputPin>,
    button: InputPin,
}

impl PiBoard {
    /// Claim and initialise every peripheral. Must run before the first
    /// port call; failures here are fatal (`Error::Init`).
    pub fn new(config: &SystemConfig) -> Result<Self> {
        let period = Duration::from_micros(1_000_000 / u64::from(pins::ESC_PWM_FREQ_HZ));
        let esc = Pwm::with_period(
            Channel::Pwm0,
            period,
            Duration::from_micros(u64::from(config.neutral)),
            Polarity::Normal,
            true,
        )
        .map_err(|e| {
            warn!("PWM0 init failed: {e}");
            Error::Init("hardware PWM unavailable")
        })?;

        let gpio = Gpio::new().map_err(|e| {
            warn!("GPIO init failed: {e}");
            Error::Init("GPIO unavailable")
        })?;

        let mut outputs = HashMap::new();
        for pin in [
            pins::POWER_LED_GPIO,
            pins::AUX_LIGHTS_ON_GPIO,
            pins::AUX_LIGHTS_OFF_GPIO,
        ] {
            let out = gpio
                .get(pin)
                .map_err(|e| {
                    warn!("claiming GPIO {pin} failed: {e}");
                    Error::Init("output pin unavailable")
                })?
                .into_output_low();
            outputs.insert(pin, out);
        }

        let button = gpio
            .get(pins::POWER_BUTTON_GPIO)
            .map_err(|e| {
                warn!("claiming button GPIO failed: {e}");
                Error::Init("button pin unavailable")
            })?
            .into_input_pullup();

        Ok(Self {
            esc,
            outputs,
            button,
        })
    }
}

impl ActuatorPort for PiBoard {
    fn set_frequency(&mut self, channel: u8, hz: u32) {
        if channel != pins::MOTOR_PWM_CHANNEL || hz == 0 {
            warn!("set_frequency on unknown channel {channel} ({hz} Hz)");
            return;
        }
        let period = Duration::from_micros(1_000_000 / u64::from(hz));
        if let Err(e) = self.esc.set_period(period) {
            warn!("PWM period write failed: {e}");
        }
    }

    fn set_pulse_width(&mut self, channel: u8, value: u16) {
        if channel != pins::MOTOR_PWM_CHANNEL {
            warn!("pulse-width write to unknown channel {channel}");
            return;
        }
        if let Err(e) = self.esc.set_pulse_width(Duration::from_micros(u64::from(value))) {
            warn!("pulse-width write failed: {e}");
        }
    }

    fn set_digital(&mut self, pin: u8, level: bool) {
        match self.outputs.get_mut(&pin) {
            Some(out) if level => out.set_high(),
            Some(out) => out.set_low(),
            None => warn!("digital write to unclaimed GPIO {pin}"),
        }
    }

    fn read_digital(&mut self, pin: u8) -> bool {
        if pin == pins::POWER_BUTTON_GPIO {
            self.button.is_high()
        } else {
            warn!("digital read from unclaimed GPIO {pin}");
            true
        }
    }
}
