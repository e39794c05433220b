//! Collaborator traits
//!
//! These traits define the interface between the control logic
//! and the hardware-specific peripheral, touch, and display drivers.

pub mod display;
pub mod peripheral;
pub mod touch;

pub use display::{Color, DisplayDriver, DisplayError, Rect, TextAlign};
pub use peripheral::{AnalogInput, PwmError, PwmOutput};
pub use touch::{TouchPanel, TouchState};
