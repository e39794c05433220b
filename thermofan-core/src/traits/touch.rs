//! Touch panel trait

/// One poll of the touch controller
///
/// Coordinates are screen pixels; they are meaningless when `detected`
/// is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchState {
    /// A finger/stylus is on the panel
    pub detected: bool,
    /// X coordinate (pixels)
    pub x: u16,
    /// Y coordinate (pixels)
    pub y: u16,
}

impl TouchState {
    /// A poll with no touch present
    pub const fn released() -> Self {
        Self {
            detected: false,
            x: 0,
            y: 0,
        }
    }

    /// A touch at the given coordinate
    pub const fn at(x: u16, y: u16) -> Self {
        Self {
            detected: true,
            x,
            y,
        }
    }
}

/// Trait for touch input
///
/// Polled once per main-loop iteration. Implementations that fail to talk
/// to their controller report "no touch" rather than an error.
pub trait TouchPanel {
    /// Read the current touch state
    fn poll_state(&mut self) -> TouchState;
}
