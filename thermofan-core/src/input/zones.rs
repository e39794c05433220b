//! Touch zone classification
//!
//! The upper half of the screen is split in two: left increases the
//! threshold, right decreases it. Touches exactly on the split line and
//! anywhere in the lower half are ignored.

use crate::config::TouchZones;

/// Threshold edit selected by a touch position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchZone {
    /// Raise the threshold by one step
    Increase,
    /// Lower the threshold by one step
    Decrease,
    /// No edit
    None,
}

/// Classify a touch position
pub fn classify(x: u16, y: u16, zones: &TouchZones) -> TouchZone {
    if y >= zones.upper_bound_y {
        return TouchZone::None;
    }

    if x < zones.split_x {
        TouchZone::Increase
    } else if x > zones.split_x {
        TouchZone::Decrease
    } else {
        TouchZone::None
    }
}
