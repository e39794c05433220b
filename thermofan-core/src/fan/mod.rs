//! Fan control
//!
//! - Ramp controller: owns the PWM duty and the ramp timer state
//! - Command type shared with the threshold monitor

pub mod ramp;

pub use ramp::{Activation, Deactivation, FanRampController, RampConfig, RampState, RampStep};

/// Command from the threshold monitor to the fan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FanCommand {
    /// Temperature above threshold: start (or keep) ramping
    Activate,
    /// Temperature at or below threshold: cut the fan
    Deactivate,
}
