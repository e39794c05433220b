//! Touch debouncer
//!
//! Rate-limits accepted touches: a detected touch is accepted only when
//! strictly more than the cooldown has elapsed since the last accepted
//! touch. The clock starts at construction, so touches during the first
//! cooldown window after boot are rejected too.

use crate::traits::TouchState;

/// Touch debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchDebouncer {
    /// Time of the last accepted touch (or of construction)
    last_ms: u64,
    cooldown_ms: u32,
}

impl TouchDebouncer {
    /// Create a debouncer whose cooldown clock starts at `start_ms`
    pub const fn new(start_ms: u64, cooldown_ms: u32) -> Self {
        Self {
            last_ms: start_ms,
            cooldown_ms,
        }
    }

    /// Decide whether a polled touch is accepted
    ///
    /// Acceptance restarts the cooldown clock. A released panel is never
    /// accepted and never touches the clock.
    pub fn accept(&mut self, touch: TouchState, now_ms: u64) -> bool {
        if !touch.detected {
            return false;
        }

        if now_ms.saturating_sub(self.last_ms) > self.cooldown_ms as u64 {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOUCH: TouchState = TouchState::at(60, 80);

    #[test]
    fn test_rejects_during_boot_window() {
        let mut debouncer = TouchDebouncer::new(0, 500);
        assert!(!debouncer.accept(TOUCH, 100));
        assert!(!debouncer.accept(TOUCH, 500));
        assert!(debouncer.accept(TOUCH, 501));
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut debouncer = TouchDebouncer::new(0, 500);
        assert!(debouncer.accept(TOUCH, 1000));
        assert!(!debouncer.accept(TOUCH, 1500));
        assert!(debouncer.accept(TOUCH, 1501));
    }

    #[test]
    fn test_released_is_never_accepted() {
        let mut debouncer = TouchDebouncer::new(0, 500);
        assert!(!debouncer.accept(TouchState::released(), 10_000));
        // Clock untouched by releases
        assert_eq!(debouncer.last_ms, 0);
    }

    #[test]
    fn test_held_touch_repeats_after_cooldown() {
        let mut debouncer = TouchDebouncer::new(0, 500);
        let accepted = (0..=3000u64)
            .step_by(10)
            .filter(|&t| debouncer.accept(TOUCH, t))
            .count();
        // Accepted at 510, 1020, 1530, 2040, 2550
        assert_eq!(accepted, 5);
    }

    #[test]
    fn test_clock_going_backwards_is_rejected() {
        let mut debouncer = TouchDebouncer::new(1000, 500);
        assert!(!debouncer.accept(TOUCH, 0));
    }
}
