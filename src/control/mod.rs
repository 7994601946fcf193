//! Closed-envelope speed control.

pub mod speed;
