//! Normalized ADC input
//!
//! Scales a raw 12-bit conversion to `0.0..=1.0` for the LM35 reader.
//! A failed conversion repeats the last good sample; the error is counted
//! but not surfaced to the control loop.

use thermofan_core::traits::AnalogInput;

/// Full-scale value of a 12-bit conversion
pub const ADC_MAX: u16 = 4095;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// ADC channel reporting normalized samples
pub struct NormalizedAdc<ADC> {
    adc: ADC,
    /// Last successful sample
    last: f32,
    /// Failed conversions since boot
    errors: u32,
}

impl<ADC: AdcReader> NormalizedAdc<ADC> {
    /// Create a new normalized input
    pub fn new(adc: ADC) -> Self {
        Self {
            adc,
            last: 0.0,
            errors: 0,
        }
    }

    /// Scale a raw conversion to `0.0..=1.0`
    pub fn normalize(raw: u16) -> f32 {
        raw.min(ADC_MAX) as f32 / ADC_MAX as f32
    }

    /// Failed conversions since boot
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<ADC: AdcReader> AnalogInput for NormalizedAdc<ADC> {
    fn read_normalized(&mut self) -> f32 {
        match self.adc.read() {
            Ok(raw) => {
                self.last = Self::normalize(raw);
            }
            Err(()) => {
                self.errors = self.errors.saturating_add(1);
            }
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAdc {
        value: Result<u16, ()>,
    }

    impl AdcReader for MockAdc {
        fn read(&mut self) -> Result<u16, ()> {
            self.value
        }
    }

    #[test]
    fn test_normalize_bounds() {
        assert_eq!(NormalizedAdc::<MockAdc>::normalize(0), 0.0);
        assert_eq!(NormalizedAdc::<MockAdc>::normalize(ADC_MAX), 1.0);
        // Out-of-range raw values saturate at full scale
        assert_eq!(NormalizedAdc::<MockAdc>::normalize(u16::MAX), 1.0);
    }

    #[test]
    fn test_read_normalized() {
        let mut input = NormalizedAdc::new(MockAdc { value: Ok(1024) });
        let sample = input.read_normalized();
        assert!((sample - 0.25006).abs() < 1e-4);
    }

    #[test]
    fn test_failed_read_repeats_last_sample() {
        let mut input = NormalizedAdc::new(MockAdc { value: Ok(ADC_MAX) });
        assert_eq!(input.read_normalized(), 1.0);

        input.adc.value = Err(());
        assert_eq!(input.read_normalized(), 1.0);
        assert_eq!(input.read_normalized(), 1.0);
        assert_eq!(input.errors(), 2);
    }

    #[test]
    fn test_errors_visible_through_sensor_reader() {
        use thermofan_core::sensor::SensorReader;
        use thermofan_core::state::ControlState;

        let state = ControlState::new();
        let mut sensor = SensorReader::new(NormalizedAdc::new(MockAdc { value: Ok(1024) }));
        sensor.read(&state);
        assert_eq!(sensor.input().errors(), 0);

        sensor.input_mut().adc.value = Err(());
        let reading = sensor.read(&state);
        assert_eq!(sensor.input().errors(), 1);
        // The control loop still sees the last good temperature
        assert!((reading.celsius - 25.006).abs() < 1e-2);
    }
}
