//! Threshold editor
//!
//! Polls the touch panel, debounces, classifies the position, and applies
//! a fixed step to the shared threshold. Every accepted edit also raises
//! the matching one-shot feedback request for the presenter.
//!
//! The cooldown is consumed by any accepted touch, including touches that
//! land outside both zones.

use super::debounce::TouchDebouncer;
use super::zones::{classify, TouchZone};
use crate::config::{ControlConfig, ThresholdLimits, TouchZones};
use crate::state::ControlState;
use crate::traits::TouchPanel;

/// Result of one editor poll
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchOutcome {
    /// Panel not touched
    NoTouch,
    /// Touched within the cooldown window
    Debounced,
    /// Accepted touch outside both zones
    Ignored,
    /// Threshold raised to the contained value
    Increased(f32),
    /// Threshold lowered to the contained value
    Decreased(f32),
}

/// Threshold editor
#[derive(Debug, Clone)]
pub struct ThresholdEditor {
    debouncer: TouchDebouncer,
    zones: TouchZones,
    step_c: f32,
    limits: Option<ThresholdLimits>,
}

impl ThresholdEditor {
    /// Create an editor whose cooldown clock starts at `start_ms`
    pub fn new(config: &ControlConfig, start_ms: u64) -> Self {
        Self {
            debouncer: TouchDebouncer::new(start_ms, config.touch_cooldown_ms),
            zones: config.zones,
            step_c: config.threshold_step_c,
            limits: config.threshold_limits,
        }
    }

    /// Poll the panel once and apply any accepted edit
    pub fn poll<T: TouchPanel>(
        &mut self,
        panel: &mut T,
        state: &ControlState,
        now_ms: u64,
    ) -> TouchOutcome {
        let touch = panel.poll_state();
        if !touch.detected {
            return TouchOutcome::NoTouch;
        }

        if !self.debouncer.accept(touch, now_ms) {
            return TouchOutcome::Debounced;
        }

        match classify(touch.x, touch.y, &self.zones) {
            TouchZone::Increase => {
                let value = self.apply(state, self.step_c);
                state.request_plus_feedback();
                TouchOutcome::Increased(value)
            }
            TouchZone::Decrease => {
                let value = self.apply(state, -self.step_c);
                state.request_minus_feedback();
                TouchOutcome::Decreased(value)
            }
            TouchZone::None => TouchOutcome::Ignored,
        }
    }

    fn apply(&self, state: &ControlState, delta: f32) -> f32 {
        let mut value = state.threshold() + delta;
        // max/min rather than clamp: never panics on unvalidated limits
        if let Some(limits) = self.limits {
            value = value.max(limits.min_c).min(limits.max_c);
        }
        state.set_threshold(value);
        value
    }
}
