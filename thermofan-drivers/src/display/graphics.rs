//! `embedded-graphics` display adapter
//!
//! Implements the core [`DisplayDriver`] on top of any RGB565 draw target.
//! Text uses ProFont 24pt; each text line first clears its full-width band
//! to white so shorter strings never leave stale glyphs behind.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use profont::PROFONT_24_POINT;
use thermofan_core::traits::{Color, DisplayDriver, DisplayError, Rect, TextAlign};

/// Font used for status lines
pub const TEXT_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

/// Background behind text
const BACKGROUND: Rgb565 = Rgb565::WHITE;

/// Map a palette color to RGB565
pub const fn rgb565(color: Color) -> Rgb565 {
    match color {
        Color::White => Rgb565::WHITE,
        Color::Black => Rgb565::BLACK,
        Color::Red => Rgb565::RED,
        // 0x000080
        Color::DarkBlue => Rgb565::new(0, 0, 16),
    }
}

/// Display adapter over a draw target
pub struct GraphicsDisplay<D> {
    target: D,
    text_color: Color,
}

impl<D> GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    /// Wrap a draw target
    pub fn new(target: D) -> Self {
        Self {
            target,
            text_color: Color::Black,
        }
    }

    fn fill(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        area.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }
}

impl<D> DisplayDriver for GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.target
            .clear(rgb565(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        let (width, height) = self.dimensions();
        if rect.x as u32 + rect.width as u32 > width as u32
            || rect.y as u32 + rect.height as u32 > height as u32
        {
            return Err(DisplayError::InvalidCoordinates);
        }

        let area = Rectangle::new(
            Point::new(rect.x as i32, rect.y as i32),
            Size::new(rect.width as u32, rect.height as u32),
        );
        self.fill(area, rgb565(color))
    }

    fn draw_text(&mut self, y: u16, align: TextAlign, text: &str) -> Result<(), DisplayError> {
        let (width, height) = self.dimensions();
        if y >= height {
            return Err(DisplayError::InvalidCoordinates);
        }

        let band = Rectangle::new(
            Point::new(0, y as i32),
            Size::new(width as u32, TEXT_FONT.character_size.height),
        );
        self.fill(band, BACKGROUND)?;

        let (x, alignment) = match align {
            TextAlign::Left(x) => (x as i32, Alignment::Left),
            TextAlign::Center => (width as i32 / 2, Alignment::Center),
        };

        let character_style = MonoTextStyleBuilder::new()
            .font(TEXT_FONT)
            .text_color(rgb565(self.text_color))
            .background_color(BACKGROUND)
            .build();
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(text, Point::new(x, y as i32), character_style, text_style)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u16, u16) {
        let size = self.target.size();
        (size.width as u16, size.height as u16)
    }
}
