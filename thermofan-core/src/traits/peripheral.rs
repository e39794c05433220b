//! Analog input and PWM output traits

/// Errors that can occur when driving the PWM output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Requested pulse width exceeds the configured period
    PulseTooWide,
    /// Requested period cannot be produced by the timer
    InvalidPeriod,
    /// Underlying timer/channel rejected the update
    Hardware,
}

/// Trait for the analog temperature input
///
/// Implementations wrap an ADC channel and scale the raw conversion to a
/// normalized value. The control logic performs no calibration: whatever
/// the peripheral reports is passed through, including values outside
/// the nominal range.
pub trait AnalogInput {
    /// Read the current sample normalized to 0.0..=1.0
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_normalized(&mut self) -> f32;
}

/// Trait for the fan PWM output
///
/// Period and pulse width are expressed in microseconds.
pub trait PwmOutput {
    /// Set the PWM period in microseconds
    fn set_period_us(&mut self, period_us: u16) -> Result<(), PwmError>;

    /// Set the active pulse width in microseconds
    fn set_pulse_width_us(&mut self, width_us: u16) -> Result<(), PwmError>;
}
