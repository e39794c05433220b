//! PWM fan output
//!
//! Drives the fan through any `embedded-hal` duty-cycle channel. The timer
//! frequency is fixed when the channel is created, so the driver only
//! accepts the period the timer was built for and turns pulse widths in µs
//! into duty fractions of it.

use embedded_hal::pwm::SetDutyCycle;
use thermofan_core::traits::{PwmError, PwmOutput};

/// Timer frequency (Hz) for a PWM period in µs
pub const fn frequency_hz(period_us: u16) -> u32 {
    if period_us == 0 {
        return 0;
    }
    1_000_000 / period_us as u32
}

/// Fan on a PWM channel
pub struct PwmFan<P> {
    pwm: P,
    /// Timer period (µs)
    period_us: u16,
    /// Last pulse width written (µs)
    width_us: u16,
}

impl<P: SetDutyCycle> PwmFan<P> {
    /// Wrap a channel whose timer runs at [`frequency_hz`]`(period_us)`
    pub fn new(pwm: P, period_us: u16) -> Self {
        Self {
            pwm,
            period_us,
            width_us: 0,
        }
    }
}

impl<P: SetDutyCycle> PwmOutput for PwmFan<P> {
    fn set_period_us(&mut self, period_us: u16) -> Result<(), PwmError> {
        // The timer cannot be retuned from here
        if period_us == 0 || period_us != self.period_us {
            return Err(PwmError::InvalidPeriod);
        }
        Ok(())
    }

    fn set_pulse_width_us(&mut self, width_us: u16) -> Result<(), PwmError> {
        if width_us > self.period_us {
            return Err(PwmError::PulseTooWide);
        }

        self.pwm
            .set_duty_cycle_fraction(width_us, self.period_us)
            .map_err(|_| PwmError::Hardware)?;
        self.width_us = width_us;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::pwm::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    // Mock channel with a 1000-count timer
    struct MockChannel {
        duty: u16,
        fail: bool,
    }

    impl ErrorType for MockChannel {
        type Error = MockError;
    }

    impl SetDutyCycle for MockChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn fan() -> PwmFan<MockChannel> {
        PwmFan::new(
            MockChannel {
                duty: 0,
                fail: false,
            },
            256,
        )
    }

    #[test]
    fn test_width_to_duty() {
        let mut fan = fan();
        fan.set_pulse_width_us(128).unwrap();
        assert_eq!(fan.width_us, 128);
        assert_eq!(fan.pwm.duty, 500);

        fan.set_pulse_width_us(256).unwrap();
        assert_eq!(fan.pwm.duty, 1000);

        fan.set_pulse_width_us(0).unwrap();
        assert_eq!(fan.pwm.duty, 0);
    }

    #[test]
    fn test_rejects_wide_pulse() {
        let mut fan = fan();
        assert_eq!(fan.set_pulse_width_us(257), Err(PwmError::PulseTooWide));
        assert_eq!(fan.width_us, 0);
    }

    #[test]
    fn test_rejects_zero_period() {
        let mut fan = fan();
        assert_eq!(fan.set_period_us(0), Err(PwmError::InvalidPeriod));
        assert_eq!(fan.period_us, 256);
    }

    #[test]
    fn test_rejects_period_timer_was_not_built_for() {
        let mut fan = fan();
        assert_eq!(fan.set_period_us(128), Err(PwmError::InvalidPeriod));
        assert_eq!(fan.set_period_us(256), Ok(()));

        // Widths still scale against the timer's real period
        fan.set_pulse_width_us(64).unwrap();
        assert_eq!(fan.pwm.duty, 250);
    }

    #[test]
    fn test_frequency_for_period() {
        assert_eq!(frequency_hz(256), 3906);
        assert_eq!(frequency_hz(1000), 1000);
        assert_eq!(frequency_hz(0), 0);
    }

    #[test]
    fn test_hardware_error() {
        let mut fan = fan();
        fan.pwm.fail = true;
        assert_eq!(fan.set_pulse_width_us(10), Err(PwmError::Hardware));
    }
}
