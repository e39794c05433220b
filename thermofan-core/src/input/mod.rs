//! Touch input handling
//!
//! - Debounce: minimum gap between accepted touches
//! - Zones: map coordinates to a threshold edit
//! - Editor: applies accepted edits to the shared threshold

pub mod debounce;
pub mod editor;
pub mod zones;

pub use debounce::TouchDebouncer;
pub use editor::{ThresholdEditor, TouchOutcome};
pub use zones::{classify, TouchZone};
