//! Application core: port traits, input translation, and the ride loop.

pub mod input;
pub mod ports;
pub mod service;
