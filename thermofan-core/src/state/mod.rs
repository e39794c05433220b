//! Shared control state
//!
//! The cross-task cells written by one component and read by the others,
//! plus the deadline-based button feedback consumed by the presenter.

pub mod feedback;
pub mod shared;

pub use feedback::{Button, FlashState};
pub use shared::{ControlSnapshot, ControlState};
