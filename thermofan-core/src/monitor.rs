//! Threshold monitor
//!
//! Level-triggered comparator between the latest temperature and the user
//! threshold. Every evaluation emits a command, even when nothing changed;
//! the fan controller treats repeated commands as no-ops. No hysteresis
//! band is applied.

use crate::fan::FanCommand;
use crate::state::ControlState;

/// Compare a temperature against the threshold
///
/// Strictly greater activates; equality deactivates. NaN compares false
/// and therefore deactivates.
pub fn evaluate(temperature: f32, threshold: f32) -> FanCommand {
    if temperature > threshold {
        FanCommand::Activate
    } else {
        FanCommand::Deactivate
    }
}

/// Periodic threshold monitor
#[derive(Debug, Clone, Default)]
pub struct ThresholdMonitor {
    /// Command emitted by the previous evaluation
    last: Option<FanCommand>,
    /// Number of command changes since boot
    toggles: u32,
}

impl ThresholdMonitor {
    /// Create a new monitor
    pub const fn new() -> Self {
        Self {
            last: None,
            toggles: 0,
        }
    }

    /// Evaluate the shared state once
    pub fn check(&mut self, state: &ControlState) -> FanCommand {
        let command = evaluate(state.temperature(), state.threshold());

        if let Some(last) = self.last {
            if last != command {
                self.toggles = self.toggles.saturating_add(1);
            }
        }
        self.last = Some(command);

        command
    }

    /// Command from the previous evaluation
    pub fn last(&self) -> Option<FanCommand> {
        self.last
    }

    /// Number of times the command flipped
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}
