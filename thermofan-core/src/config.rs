//! Configuration type definitions
//!
//! All timing, PWM, and screen geometry constants live here. There is no
//! persistence: the firmware compiles in `ControlConfig::default()` and
//! validates it once at boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::Rect;

/// Screen width in pixels (portrait)
pub const SCREEN_WIDTH: u16 = 240;

/// Screen height in pixels (portrait)
pub const SCREEN_HEIGHT: u16 = 320;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Ramp or monitor interval is zero
    ZeroInterval,
    /// Ramp step is zero
    ZeroRampStep,
    /// PWM period is zero
    ZeroPeriod,
    /// Duty ceiling exceeds the PWM period
    DutyExceedsPeriod,
    /// Threshold step is zero, negative, or not finite
    InvalidThresholdStep,
    /// Threshold limits are inverted or not finite
    InvalidThresholdLimits,
    /// Touch zone split lies outside the screen
    ZoneOutsideScreen,
    /// Button too small for its glyph or not on the screen
    InvalidButtonGeometry,
}

/// Touch classification region
///
/// This is a proxy region: it is intentionally not derived from the
/// drawn button geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchZones {
    /// Touches left of this X increase the threshold, right of it decrease
    pub split_x: u16,
    /// Touches must be above (less than) this Y to count
    pub upper_bound_y: u16,
}

impl Default for TouchZones {
    fn default() -> Self {
        Self {
            split_x: SCREEN_WIDTH / 2,
            upper_bound_y: SCREEN_HEIGHT / 2,
        }
    }
}

/// On-screen button geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonLayout {
    /// Area of the "+" button (bottom-left)
    pub plus: Rect,
    /// Area of the "-" button (bottom-right)
    pub minus: Rect,
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self {
            plus: Rect::new(0, 220, 100, 100),
            minus: Rect::new(140, 220, 100, 100),
        }
    }
}

impl ButtonLayout {
    /// Smallest button side that still fits both glyph bars
    pub const MIN_SIDE: u16 = 60;

    /// Horizontal bar of a glyph drawn inside `area`
    pub const fn horizontal_bar(area: Rect) -> Rect {
        Rect::new(
            area.x.saturating_add(15),
            area.y.saturating_add(35),
            area.width.saturating_sub(30),
            25,
        )
    }

    /// Vertical bar of the "+" glyph drawn inside `area`
    pub const fn vertical_bar(area: Rect) -> Rect {
        Rect::new(
            area.x.saturating_add(35),
            area.y.saturating_add(15),
            25,
            area.height.saturating_sub(30),
        )
    }

    fn fits(area: Rect, (width, height): (u16, u16)) -> bool {
        area.width >= Self::MIN_SIDE
            && area.height >= Self::MIN_SIDE
            && area.right() <= width
            && area.bottom() <= height
    }
}

/// Optional clamp on the user threshold (°C)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdLimits {
    pub min_c: f32,
    pub max_c: f32,
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Ramp timer period (ms)
    pub ramp_interval_ms: u32,
    /// Duty increment per ramp tick (µs)
    pub ramp_step: u16,
    /// Duty ceiling (µs)
    pub duty_max: u16,
    /// PWM period (µs)
    pub pwm_period_us: u16,
    /// Threshold monitor period (ms)
    pub monitor_interval_ms: u32,
    /// Minimum gap between accepted touches (ms)
    pub touch_cooldown_ms: u32,
    /// Threshold change per accepted touch (°C)
    pub threshold_step_c: f32,
    /// Offset added to the rounded-up boot temperature (°C)
    pub threshold_offset_c: f32,
    /// How long a touched button stays highlighted (ms)
    pub flash_duration_ms: u32,
    /// Touch classification region
    pub zones: TouchZones,
    /// Drawn button geometry
    pub buttons: ButtonLayout,
    /// Screen size (width, height)
    pub screen: (u16, u16),
    /// Threshold clamp, `None` for unbounded
    pub threshold_limits: Option<ThresholdLimits>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            ramp_interval_ms: 100,
            ramp_step: 2,
            duty_max: 256,
            pwm_period_us: 256, // ~3.9 kHz
            monitor_interval_ms: 1000,
            touch_cooldown_ms: 500,
            threshold_step_c: 0.5,
            threshold_offset_c: 1.0,
            flash_duration_ms: 150,
            zones: TouchZones::default(),
            buttons: ButtonLayout::default(),
            screen: (SCREEN_WIDTH, SCREEN_HEIGHT),
            threshold_limits: None,
        }
    }
}

impl ControlConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ramp_interval_ms == 0 || self.monitor_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        if self.ramp_step == 0 {
            return Err(ConfigError::ZeroRampStep);
        }

        if self.pwm_period_us == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        if self.duty_max > self.pwm_period_us {
            return Err(ConfigError::DutyExceedsPeriod);
        }

        if !self.threshold_step_c.is_finite() || self.threshold_step_c <= 0.0 {
            return Err(ConfigError::InvalidThresholdStep);
        }

        if let Some(limits) = self.threshold_limits {
            if !limits.min_c.is_finite() || !limits.max_c.is_finite() || limits.min_c > limits.max_c
            {
                return Err(ConfigError::InvalidThresholdLimits);
            }
        }

        let (width, height) = self.screen;
        if self.zones.split_x >= width || self.zones.upper_bound_y > height {
            return Err(ConfigError::ZoneOutsideScreen);
        }

        if !ButtonLayout::fits(self.buttons.plus, self.screen)
            || !ButtonLayout::fits(self.buttons.minus, self.screen)
        {
            return Err(ConfigError::InvalidButtonGeometry);
        }

        Ok(())
    }
}
