//! Fan outputs

pub mod pwm;

pub use pwm::{frequency_hz, PwmFan};
