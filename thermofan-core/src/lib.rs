//! Board-agnostic core logic for the fan controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (analog input, PWM output, touch panel, display)
//! - Sensor conversion and the initial threshold rule
//! - Fan ramp state machine
//! - Threshold monitor (level-triggered comparator)
//! - Touch debounce and threshold editing
//! - Shared control state and button feedback
//! - Status screen rendering
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod fan;
pub mod input;
pub mod monitor;
pub mod sensor;
pub mod state;
pub mod traits;
pub mod ui;
