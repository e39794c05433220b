//! Status presenter
//!
//! Renders the shared state onto a [`DisplayDriver`]. Rendering is a pure
//! function of the state plus the button highlight; the presenter never
//! writes the temperature or threshold.

use core::fmt::Write;

use heapless::String;

use crate::config::{ButtonLayout, ControlConfig};
use crate::state::{Button, ControlState, FlashState};
use crate::traits::{Color, DisplayDriver, DisplayError, TextAlign};

/// Top edge of the temperature line
pub const TEMP_LINE_Y: u16 = 45;

/// Top edge of the threshold line
pub const LIMIT_LINE_Y: u16 = 85;

/// Rendered text of one status line
pub type ReadingText = String<20>;

/// Format `"<label>: <value>C"` with one decimal, truncated toward zero
///
/// ```
/// use thermofan_core::ui::format_reading;
///
/// assert_eq!(format_reading("Temp", 25.07).unwrap().as_str(), "Temp: 25.0C");
/// assert_eq!(format_reading("Limit", -2.5).unwrap().as_str(), "Limit: -2.5C");
/// ```
pub fn format_reading(label: &str, value: f32) -> Result<ReadingText, DisplayError> {
    // Saturating cast; NaN becomes 0
    let tenths = (value * 10.0) as i32;
    let sign = if tenths < 0 { "-" } else { "" };
    let magnitude = tenths.unsigned_abs();

    let mut text = ReadingText::new();
    write!(
        text,
        "{}: {}{}.{}C",
        label,
        sign,
        magnitude / 10,
        magnitude % 10
    )
    .map_err(|_| DisplayError::BufferOverflow)?;
    Ok(text)
}

/// Status screen presenter
pub struct StatusPresenter {
    buttons: ButtonLayout,
    flash: FlashState,
    flash_duration_ms: u32,
}

impl StatusPresenter {
    /// Create a presenter for the configured layout
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            buttons: config.buttons,
            flash: FlashState::new(),
            flash_duration_ms: config.flash_duration_ms,
        }
    }

    /// Clear the screen at boot
    pub fn draw_splash<D: DisplayDriver>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        display.clear(Color::White)?;
        display.set_text_color(Color::DarkBlue);
        Ok(())
    }

    /// Draw both status lines and the buttons
    ///
    /// Consumes pending feedback requests from `state`.
    pub fn render<D: DisplayDriver>(
        &mut self,
        display: &mut D,
        state: &ControlState,
        now_ms: u64,
    ) -> Result<(), DisplayError> {
        let snapshot = state.snapshot();

        display.set_text_color(Color::DarkBlue);
        let temp = format_reading("Temp", snapshot.temperature)?;
        display.draw_text(TEMP_LINE_Y, TextAlign::Center, &temp)?;
        let limit = format_reading("Limit", snapshot.threshold)?;
        display.draw_text(LIMIT_LINE_Y, TextAlign::Center, &limit)?;

        let highlighted = self.flash.update(state, now_ms, self.flash_duration_ms);
        self.draw_buttons(display, highlighted)
    }

    /// Currently highlighted button
    pub fn highlighted(&self) -> Option<Button> {
        self.flash.active()
    }

    fn draw_buttons<D: DisplayDriver>(
        &self,
        display: &mut D,
        highlighted: Option<Button>,
    ) -> Result<(), DisplayError> {
        // Idle glyphs share the text color; while "+" flashes, "-" is black
        let color_of = |button: Button| match (highlighted, button) {
            (Some(lit), _) if lit == button => Color::Red,
            (Some(Button::Plus), Button::Minus) => Color::Black,
            _ => Color::DarkBlue,
        };

        let plus = color_of(Button::Plus);
        display.fill_rect(ButtonLayout::horizontal_bar(self.buttons.plus), plus)?;
        display.fill_rect(ButtonLayout::vertical_bar(self.buttons.plus), plus)?;

        let minus = color_of(Button::Minus);
        display.fill_rect(ButtonLayout::horizontal_bar(self.buttons.minus), minus)
    }
}
