//! LM35 temperature sensor reader
//!
//! The LM35 outputs 10 mV/°C. With the ADC reporting a normalized sample,
//! the conversion is approximated as a fixed linear mapping
//! `celsius = sample * 100`. No calibration, filtering, or clamping is
//! applied.

use micromath::F32Ext;

use crate::state::ControlState;
use crate::traits::AnalogInput;

/// Scale from normalized sample to °C
pub const CELSIUS_PER_UNIT: f32 = 100.0;

/// Plausibility of a raw sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleStatus {
    /// Sample inside 0.0..=1.0
    InRange,
    /// Sample outside 0.0..=1.0 or NaN (passed through unchanged)
    OutOfRange,
}

impl SampleStatus {
    /// Classify a normalized sample
    pub fn of(sample: f32) -> Self {
        if (0.0..=1.0).contains(&sample) {
            SampleStatus::InRange
        } else {
            SampleStatus::OutOfRange
        }
    }
}

/// Result of one sensor read
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Converted temperature (°C)
    pub celsius: f32,
    /// Raw sample plausibility (for reporting only)
    pub status: SampleStatus,
}

/// Convert a normalized sample to °C
pub fn celsius_from_sample(sample: f32) -> f32 {
    sample * CELSIUS_PER_UNIT
}

/// Boot-time threshold: boot temperature rounded up, plus an offset
pub fn initial_threshold(celsius: f32, offset_c: f32) -> f32 {
    F32Ext::ceil(celsius) + offset_c
}

/// Sensor reader over an analog input
pub struct SensorReader<A> {
    input: A,
}

impl<A: AnalogInput> SensorReader<A> {
    /// Create a new sensor reader
    pub fn new(input: A) -> Self {
        Self { input }
    }

    /// Sample the input, convert, and publish the temperature
    pub fn read(&mut self, state: &ControlState) -> Reading {
        let sample = self.input.read_normalized();
        let celsius = celsius_from_sample(sample);
        state.set_temperature(celsius);

        Reading {
            celsius,
            status: SampleStatus::of(sample),
        }
    }

    /// Get access to the underlying input
    pub fn input(&self) -> &A {
        &self.input
    }

    /// Get mutable access to the underlying input
    pub fn input_mut(&mut self) -> &mut A {
        &mut self.input
    }
}
