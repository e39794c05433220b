//! Embassy async tasks
//!
//! Each task runs independently and communicates via the shared state
//! and the fan command signal.

pub mod fan;
pub mod monitor;
pub mod ui;

pub use fan::fan_task;
pub use monitor::monitor_task;
pub use ui::{ui_task, UiContext};
