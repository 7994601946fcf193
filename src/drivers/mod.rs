//! Small peripheral helpers layered on the actuator port.

pub mod status_led;
