//! Status screen
//!
//! Two text lines (temperature and threshold) and the "+"/"-" buttons,
//! redrawn every main-loop iteration.

mod presenter;

pub use presenter::{format_reading, ReadingText, StatusPresenter, LIMIT_LINE_Y, TEMP_LINE_Y};
