//! Display driver trait for the status screen

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus communication with the panel failed
    Communication,
    /// Rectangle or text position outside the panel
    InvalidCoordinates,
    /// Text did not fit the line buffer
    BufferOverflow,
}

/// Palette used by the status screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
    Red,
    DarkBlue,
}

/// Horizontal text placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    /// Left edge at the given x
    Left(u16),
    /// Centered on the screen width
    Center,
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

/// Trait for the status display
///
/// The display is a dumb drawing surface: all layout decisions are made
/// by the presenter.
pub trait DisplayDriver {
    /// Fill the whole screen with a color
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Set the color used by subsequent `draw_text` calls
    fn set_text_color(&mut self, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw a line of text with its top edge at `y`
    fn draw_text(&mut self, y: u16, align: TextAlign, text: &str) -> Result<(), DisplayError>;

    /// Screen size in pixels (width, height)
    fn dimensions(&self) -> (u16, u16);
}
