//! Inter-task communication
//!
//! Monitor decisions travel to the fan task over a signal; the scalar
//! control state is shared through atomics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use thermofan_core::fan::FanCommand;
use thermofan_core::state::ControlState;

/// Fan command signal (updated by the monitor task)
///
/// Only the latest command matters, so a signal overwriting any unread
/// value is sufficient.
pub static FAN_CMD: Signal<CriticalSectionRawMutex, FanCommand> = Signal::new();

/// Temperature, threshold, fan mirror, and button feedback requests
pub static STATE: ControlState = ControlState::new();
