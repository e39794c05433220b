//! STMPE811 resistive touch controller
//!
//! Driver for the STMPE811 over blocking I2C, as fitted to the
//! STM32F429I-DISCO. Raw 12-bit panel readings are mapped to portrait
//! screen pixels with the board's fixed calibration, and small jitter is
//! filtered out by holding the previous position.
//!
//! Calibrated points that fall outside the screen are clamped to its edge
//! and counted, so the firmware can report them without the control loop
//! seeing anything but on-screen coordinates.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use thermofan_core::traits::{TouchPanel, TouchState};

/// STMPE811 I2C address (A0 tied low)
pub const STMPE811_ADDR: u8 = 0x41;

/// Expected value of the CHIP_ID register
const CHIP_ID: u16 = 0x0811;

/// Combined movement (px) below which the previous position is kept
const JITTER_PX: u16 = 5;

/// STMPE811 registers
#[allow(dead_code)]
mod reg {
    pub const CHIP_ID: u8 = 0x00;
    pub const SYS_CTRL1: u8 = 0x03;
    pub const SYS_CTRL2: u8 = 0x04;
    pub const INT_STA: u8 = 0x0B;
    pub const GPIO_AF: u8 = 0x17;
    pub const ADC_CTRL1: u8 = 0x20;
    pub const ADC_CTRL2: u8 = 0x21;
    pub const TSC_CTRL: u8 = 0x40;
    pub const TSC_CFG: u8 = 0x41;
    pub const FIFO_TH: u8 = 0x4A;
    pub const FIFO_STA: u8 = 0x4B;
    pub const FIFO_SIZE: u8 = 0x4C;
    pub const TSC_FRACT_XYZ: u8 = 0x56;
    pub const TSC_I_DRIVE: u8 = 0x58;
    pub const TSC_DATA_XYZ: u8 = 0xD7;
}

/// Register bit values
mod bits {
    /// SYS_CTRL1: soft reset
    pub const SOFT_RESET: u8 = 0x02;
    /// SYS_CTRL2: GPIO clock off
    pub const IO_CLOCK_OFF: u8 = 0x04;
    /// SYS_CTRL2: touchscreen and ADC clocks off
    pub const TS_ADC_CLOCK_OFF: u8 = 0x03;
    /// GPIO_AF: pins 1-4 used by the touchscreen
    pub const TOUCH_IO: u8 = 0x1E;
    /// ADC_CTRL1: 80 clock sample time, 12-bit
    pub const ADC_12BIT_80CLK: u8 = 0x49;
    /// ADC_CTRL2: 3.25 MHz ADC clock
    pub const ADC_3_25MHZ: u8 = 0x01;
    /// TSC_CFG: 4 samples averaged, 500 µs detect delay, 500 µs settling
    pub const TSC_CFG_DEFAULT: u8 = 0x9A;
    /// FIFO_STA: reset FIFO
    pub const FIFO_RESET: u8 = 0x01;
    /// TSC_FRACT_XYZ: 1 fractional bit
    pub const FRACT_1: u8 = 0x01;
    /// TSC_I_DRIVE: 50 mA
    pub const I_DRIVE_50MA: u8 = 0x01;
    /// TSC_CTRL: enable, XYZ acquisition
    pub const TSC_ENABLE: u8 = 0x01;
    /// TSC_CTRL: touch detected status
    pub const TSC_TOUCH_DET: u8 = 0x80;
    /// INT_STA: clear all
    pub const INT_CLEAR_ALL: u8 = 0xFF;
}

/// STMPE811 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stmpe811Error<E> {
    /// I2C transfer failed
    I2c(E),
    /// CHIP_ID register returned an unexpected value
    WrongChipId(u16),
}

/// STMPE811 touch controller driver
pub struct Stmpe811<I2C> {
    i2c: I2C,
    /// Screen size (width, height)
    screen: (u16, u16),
    /// Last reported position
    last: (u16, u16),
    /// Failed polls since boot
    errors: u32,
    /// Samples clamped onto the screen since boot
    off_screen: u32,
}

impl<I2C: I2c> Stmpe811<I2C> {
    /// Create a new driver for a portrait screen of the given size
    pub fn new(i2c: I2C, screen: (u16, u16)) -> Self {
        Self {
            i2c,
            screen,
            last: (0, 0),
            errors: 0,
            off_screen: 0,
        }
    }

    /// Reset and configure the controller for touchscreen acquisition
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Stmpe811Error<I2C::Error>> {
        let id = self.chip_id()?;
        if id != CHIP_ID {
            return Err(Stmpe811Error::WrongChipId(id));
        }

        self.write(reg::SYS_CTRL1, bits::SOFT_RESET)?;
        delay.delay_ms(10);
        self.write(reg::SYS_CTRL1, 0x00)?;
        delay.delay_ms(2);

        // GPIO clock on, touch pins to alternate function
        let ctrl2 = self.read(reg::SYS_CTRL2)? & !bits::IO_CLOCK_OFF;
        self.write(reg::SYS_CTRL2, ctrl2)?;
        let af = self.read(reg::GPIO_AF)? & !bits::TOUCH_IO;
        self.write(reg::GPIO_AF, af)?;

        // Touchscreen and ADC clocks on
        self.write(reg::SYS_CTRL2, ctrl2 & !bits::TS_ADC_CLOCK_OFF)?;

        self.write(reg::ADC_CTRL1, bits::ADC_12BIT_80CLK)?;
        delay.delay_ms(2);
        self.write(reg::ADC_CTRL2, bits::ADC_3_25MHZ)?;

        self.write(reg::TSC_CFG, bits::TSC_CFG_DEFAULT)?;
        self.write(reg::FIFO_TH, 0x01)?;
        self.reset_fifo()?;
        self.write(reg::TSC_FRACT_XYZ, bits::FRACT_1)?;
        self.write(reg::TSC_I_DRIVE, bits::I_DRIVE_50MA)?;
        self.write(reg::TSC_CTRL, bits::TSC_ENABLE)?;
        self.write(reg::INT_STA, bits::INT_CLEAR_ALL)?;
        delay.delay_ms(2);

        Ok(())
    }

    /// Read the 16-bit chip identifier
    pub fn chip_id(&mut self) -> Result<u16, Stmpe811Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(STMPE811_ADDR, &[reg::CHIP_ID], &mut buf)
            .map_err(Stmpe811Error::I2c)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Read one raw sample if the panel is touched
    ///
    /// Returns 12-bit (x, y) panel coordinates. The FIFO is flushed after
    /// each read so the next poll sees a fresh sample.
    pub fn read_raw(&mut self) -> Result<Option<(u16, u16)>, Stmpe811Error<I2C::Error>> {
        let touched = self.read(reg::TSC_CTRL)? & bits::TSC_TOUCH_DET != 0;
        if !touched {
            self.reset_fifo()?;
            return Ok(None);
        }

        if self.read(reg::FIFO_SIZE)? == 0 {
            return Ok(None);
        }

        let mut data = [0u8; 4];
        self.i2c
            .write_read(STMPE811_ADDR, &[reg::TSC_DATA_XYZ], &mut data)
            .map_err(Stmpe811Error::I2c)?;
        self.reset_fifo()?;

        let word = u32::from_be_bytes(data);
        let x = ((word >> 20) & 0x0FFF) as u16;
        let y = ((word >> 8) & 0x0FFF) as u16;
        Ok(Some((x, y)))
    }

    /// Map a raw panel reading to screen pixels
    ///
    /// Fixed calibration of the STM32F429I-DISCO panel; results are clamped
    /// to the screen.
    pub fn to_screen(&self, raw_x: u16, raw_y: u16) -> (u16, u16) {
        let (x, y) = calibrate(raw_x, raw_y);
        let (width, height) = self.screen;
        (clamp_axis(x, width), clamp_axis(y, height))
    }

    /// Check whether a raw reading calibrates to a point off the screen
    pub fn is_off_screen(&self, raw_x: u16, raw_y: u16) -> bool {
        let (x, y) = calibrate(raw_x, raw_y);
        let (width, height) = self.screen;
        x < 0 || y < 0 || x >= width as i32 || y >= height as i32
    }

    /// Failed polls since boot
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Samples that landed off the screen since boot
    pub fn off_screen(&self) -> u32 {
        self.off_screen
    }

    fn reset_fifo(&mut self) -> Result<(), Stmpe811Error<I2C::Error>> {
        self.write(reg::FIFO_STA, bits::FIFO_RESET)?;
        self.write(reg::FIFO_STA, 0x00)
    }

    fn read(&mut self, register: u8) -> Result<u8, Stmpe811Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(STMPE811_ADDR, &[register], &mut buf)
            .map_err(Stmpe811Error::I2c)?;
        Ok(buf[0])
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Stmpe811Error<I2C::Error>> {
        self.i2c
            .write(STMPE811_ADDR, &[register, value])
            .map_err(Stmpe811Error::I2c)
    }
}

/// Unclamped screen position of a raw reading
fn calibrate(raw_x: u16, raw_y: u16) -> (i32, i32) {
    let y = (raw_y as i32 - 360) / 11;

    let offset = if raw_x <= 3000 { 3870 } else { 3800 };
    let x = (offset - raw_x as i32) / 15;

    (x, y)
}

fn clamp_axis(value: i32, bound: u16) -> u16 {
    if value <= 0 {
        0
    } else if value >= bound as i32 {
        bound.saturating_sub(1)
    } else {
        value as u16
    }
}

impl<I2C: I2c> TouchPanel for Stmpe811<I2C> {
    fn poll_state(&mut self) -> TouchState {
        let raw = match self.read_raw() {
            Ok(raw) => raw,
            Err(_) => {
                self.errors = self.errors.saturating_add(1);
                None
            }
        };

        let Some((raw_x, raw_y)) = raw else {
            return TouchState::released();
        };

        if self.is_off_screen(raw_x, raw_y) {
            self.off_screen = self.off_screen.saturating_add(1);
        }

        let (x, y) = self.to_screen(raw_x, raw_y);
        let moved = x.abs_diff(self.last.0) + y.abs_diff(self.last.1);
        if moved > JITTER_PX {
            self.last = (x, y);
        }

        TouchState::at(self.last.0, self.last.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Debug, PartialEq)]
    struct MockError;

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    // Register-file mock of the controller
    struct MockI2c {
        regs: [u8; 256],
        sample: [u8; 4],
        writes: heapless::Vec<(u8, u8), 64>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 256];
            regs[reg::CHIP_ID as usize] = 0x08;
            regs[reg::CHIP_ID as usize + 1] = 0x11;
            regs[reg::SYS_CTRL2 as usize] = 0x0F;
            Self {
                regs,
                sample: [0; 4],
                writes: heapless::Vec::new(),
                fail: false,
            }
        }

        fn touch(&mut self, raw_x: u16, raw_y: u16) {
            self.regs[reg::TSC_CTRL as usize] = bits::TSC_TOUCH_DET | bits::TSC_ENABLE;
            self.regs[reg::FIFO_SIZE as usize] = 1;
            let word = ((raw_x as u32) << 20) | ((raw_y as u32) << 8);
            self.sample = word.to_be_bytes();
        }

        fn lift(&mut self) {
            self.regs[reg::TSC_CTRL as usize] = bits::TSC_ENABLE;
            self.regs[reg::FIFO_SIZE as usize] = 0;
        }
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, STMPE811_ADDR);
            if self.fail {
                return Err(MockError);
            }

            let mut pointer = 0u8;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        pointer = bytes[0];
                        if let [register, value] = bytes[..] {
                            self.regs[register as usize] = value;
                            let _ = self.writes.push((register, value));
                        }
                    }
                    Operation::Read(buf) => {
                        if pointer == reg::TSC_DATA_XYZ {
                            buf.copy_from_slice(&self.sample[..buf.len()]);
                        } else {
                            let start = pointer as usize;
                            buf.copy_from_slice(&self.regs[start..start + buf.len()]);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn touch() -> Stmpe811<MockI2c> {
        Stmpe811::new(MockI2c::new(), (240, 320))
    }

    #[test]
    fn test_chip_id() {
        let mut ts = touch();
        assert_eq!(ts.chip_id(), Ok(0x0811));
    }

    #[test]
    fn test_init_sequence() {
        let mut ts = touch();
        ts.init(&mut NoDelay).unwrap();

        let i2c = ts.i2c;
        assert_eq!(i2c.writes[0], (reg::SYS_CTRL1, bits::SOFT_RESET));
        assert_eq!(i2c.regs[reg::SYS_CTRL2 as usize], 0x08);
        assert_eq!(i2c.regs[reg::TSC_CFG as usize], bits::TSC_CFG_DEFAULT);
        assert_eq!(i2c.regs[reg::TSC_CTRL as usize], bits::TSC_ENABLE);
        assert_eq!(i2c.regs[reg::INT_STA as usize], bits::INT_CLEAR_ALL);
        // FIFO reset is pulsed, then released
        assert!(i2c.writes.contains(&(reg::FIFO_STA, bits::FIFO_RESET)));
        assert_eq!(i2c.regs[reg::FIFO_STA as usize], 0x00);
    }

    #[test]
    fn test_init_rejects_wrong_chip() {
        let mut i2c = MockI2c::new();
        i2c.regs[1] = 0x12;
        let mut ts = Stmpe811::new(i2c, (240, 320));
        assert_eq!(
            ts.init(&mut NoDelay),
            Err(Stmpe811Error::WrongChipId(0x0812))
        );
    }

    #[test]
    fn test_screen_mapping() {
        let ts = touch();
        // y: (2120 - 360) / 11 = 160; x: (3870 - 2070) / 15 = 120
        assert_eq!(ts.to_screen(2070, 2120), (120, 160));
        // x above 3000 uses the second offset: (3800 - 3500) / 15 = 20
        assert_eq!(ts.to_screen(3500, 2120).0, 20);
    }

    #[test]
    fn test_screen_mapping_clamps() {
        let ts = touch();
        assert_eq!(ts.to_screen(0, 0), (239, 0));
        assert_eq!(ts.to_screen(3900, 4095), (0, 319));
    }

    #[test]
    fn test_off_screen_detection() {
        let ts = touch();
        assert!(ts.is_off_screen(0, 4095));
        assert!(ts.is_off_screen(2970, 100));
        assert!(!ts.is_off_screen(2970, 1240));
        // Exactly on the left edge is still on screen
        assert!(!ts.is_off_screen(3790, 1240));
    }

    #[test]
    fn test_poll_counts_off_screen_samples() {
        let mut ts = touch();
        ts.i2c.touch(0, 4095);
        // Still delivered on the edge so zone handling is unchanged
        assert_eq!(ts.poll_state(), TouchState::at(239, 319));
        assert_eq!(ts.off_screen(), 1);

        ts.i2c.touch(2970, 1240);
        ts.poll_state();
        assert_eq!(ts.off_screen(), 1);
    }

    #[test]
    fn test_poll_released() {
        let mut ts = touch();
        ts.i2c.lift();
        assert_eq!(ts.poll_state(), TouchState::released());
    }

    #[test]
    fn test_poll_touched() {
        let mut ts = touch();
        ts.i2c.touch(2970, 1240);
        // x: (3870 - 2970) / 15 = 60; y: (1240 - 360) / 11 = 80
        assert_eq!(ts.poll_state(), TouchState::at(60, 80));
    }

    #[test]
    fn test_jitter_filtered() {
        let mut ts = touch();
        ts.i2c.touch(2970, 1240);
        ts.poll_state();

        // Two pixels off on each axis: hold previous position
        ts.i2c.touch(2940, 1262);
        assert_eq!(ts.poll_state(), TouchState::at(60, 80));

        ts.i2c.touch(2070, 2120);
        assert_eq!(ts.poll_state(), TouchState::at(120, 160));
    }

    #[test]
    fn test_bus_error_reads_as_released() {
        let mut ts = touch();
        ts.i2c.touch(2970, 1240);
        ts.i2c.fail = true;
        assert_eq!(ts.poll_state(), TouchState::released());
        assert_eq!(ts.errors(), 1);
    }
}
