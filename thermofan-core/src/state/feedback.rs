//! Button press feedback
//!
//! A touched button is highlighted for a fixed duration. The touch editor
//! raises a one-shot request in [`ControlState`]; the presenter consumes it
//! here and turns it into a deadline, so the highlight never blocks the
//! main loop and never re-triggers without a new touch.

use super::ControlState;

/// Which on-screen button is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Plus,
    Minus,
}

/// Active highlight with its expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashState {
    active: Option<(Button, u64)>,
}

impl FlashState {
    /// Create with no highlight
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Consume pending requests and return the button to highlight now
    ///
    /// A pending "+" request wins over a pending "-" request; both are
    /// consumed. A new request restarts the highlight.
    pub fn update(&mut self, state: &ControlState, now_ms: u64, duration_ms: u32) -> Option<Button> {
        let plus = state.take_plus_feedback();
        let minus = state.take_minus_feedback();

        let requested = if plus {
            Some(Button::Plus)
        } else if minus {
            Some(Button::Minus)
        } else {
            None
        };

        if let Some(button) = requested {
            self.active = Some((button, now_ms.saturating_add(duration_ms as u64)));
        }

        match self.active {
            Some((button, deadline)) if now_ms < deadline => Some(button),
            Some(_) => {
                self.active = None;
                None
            }
            None => None,
        }
    }

    /// Currently highlighted button, without consuming requests
    pub fn active(&self) -> Option<Button> {
        self.active.map(|(button, _)| button)
    }
}
