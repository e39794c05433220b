//! ILI9341 TFT driver
//!
//! Driver for 240x320 ILI9341 panels over a 4-wire SPI bus (separate
//! data/command pin), in RGB565 portrait mode. Pixels are written straight
//! to panel RAM; there is no frame buffer.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel width (portrait)
const WIDTH: u16 = 240;

/// Panel height (portrait)
const HEIGHT: u16 = 320;

/// Pixels streamed per SPI write in solid fills
const FILL_CHUNK: usize = 32;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const PAGE_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

/// MADCTL: column order flipped, BGR panel
const MADCTL_PORTRAIT: u8 = 0x48;

/// COLMOD: 16 bits per pixel
const COLMOD_16BIT: u8 = 0x55;

/// ILI9341 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error {
    /// SPI transfer failed
    Bus,
    /// Chip-select or data/command pin failed
    Pin,
}

/// ILI9341 SPI driver
pub struct Ili9341<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> Ili9341<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new driver
    pub fn new(spi: SPI, cs: CS, dc: DC) -> Self {
        Self { spi, cs, dc }
    }

    /// Reset the controller and configure RGB565 portrait mode
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Ili9341Error> {
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;

        self.command(cmd::SW_RESET, &[])?;
        delay.delay_ms(5);
        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::MEMORY_ACCESS, &[MADCTL_PORTRAIT])?;
        self.command(cmd::PIXEL_FORMAT, &[COLMOD_16BIT])?;
        self.command(cmd::DISPLAY_ON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Send a command followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error> {
        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = self.command_selected(command, params);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result
    }

    fn command_selected(&mut self, command: u8, params: &[u8]) -> Result<(), Ili9341Error> {
        self.dc.set_low().map_err(|_| Ili9341Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| Ili9341Error::Bus)?;
        self.spi.flush().map_err(|_| Ili9341Error::Bus)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Ili9341Error::Pin)?;
            self.spi.write(params).map_err(|_| Ili9341Error::Bus)?;
            self.spi.flush().map_err(|_| Ili9341Error::Bus)?;
        }
        Ok(())
    }

    /// Set the RAM write window (inclusive corners)
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Ili9341Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PAGE_ADDR, &[y0h, y0l, y1h, y1l])
    }

    /// Stream `count` pixels of one color into the current window
    fn write_repeated(&mut self, color: Rgb565, count: u32) -> Result<(), Ili9341Error> {
        let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = self.stream(cmd::MEMORY_WRITE, &chunk, count);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result
    }

    fn stream(&mut self, command: u8, chunk: &[u8], count: u32) -> Result<(), Ili9341Error> {
        self.command_selected(command, &[])?;
        self.dc.set_high().map_err(|_| Ili9341Error::Pin)?;

        let mut remaining = count as usize;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.spi
                .write(&chunk[..n * 2])
                .map_err(|_| Ili9341Error::Bus)?;
            remaining -= n;
        }
        self.spi.flush().map_err(|_| Ili9341Error::Bus)
    }

    /// Stream per-pixel colors into the current window
    fn stream_colors<I>(&mut self, colors: I) -> Result<(), Ili9341Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.command_selected(cmd::MEMORY_WRITE, &[])?;
        self.dc.set_high().map_err(|_| Ili9341Error::Pin)?;

        let mut chunk = [0u8; FILL_CHUNK * 2];
        let mut len = 0;
        for color in colors {
            let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
            chunk[len] = hi;
            chunk[len + 1] = lo;
            len += 2;
            if len == chunk.len() {
                self.spi.write(&chunk).map_err(|_| Ili9341Error::Bus)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi
                .write(&chunk[..len])
                .map_err(|_| Ili9341Error::Bus)?;
        }
        self.spi.flush().map_err(|_| Ili9341Error::Bus)
    }
}

impl<SPI, CS, DC> OriginDimensions for Ili9341<SPI, CS, DC> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, CS, DC> DrawTarget for Ili9341<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    type Color = Rgb565;
    type Error = Ili9341Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 || coord.x >= WIDTH as i32 || coord.y >= HEIGHT as i32 {
                continue;
            }
            let (x, y) = (coord.x as u16, coord.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_repeated(color, 1)?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let bounds = self.bounding_box();
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        // Partially visible areas go pixel by pixel
        if !bounds.contains(area.top_left) || !bounds.contains(bottom_right) {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;

        self.cs.set_low().map_err(|_| Ili9341Error::Pin)?;
        let result = self.stream_colors(colors);
        self.cs.set_high().map_err(|_| Ili9341Error::Pin)?;
        result
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_repeated(color, area.size.width * area.size.height)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    // Records every byte on the bus, tagged with the D/C level
    struct MockSpi {
        log: heapless::Vec<(bool, u8), 256>,
        data_mode: &'static core::cell::Cell<bool>,
        bytes: u32,
    }

    impl SpiErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            for &w in words {
                self.bytes += 1;
                let _ = self.log.push((self.data_mode.get(), w));
            }
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct MockPin {
        level: &'static core::cell::Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level.set(true);
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    extern crate std;

    fn panel() -> (Ili9341<MockSpi, MockPin, MockPin>, &'static core::cell::Cell<bool>) {
        let dc: &'static core::cell::Cell<bool> =
            std::boxed::Box::leak(std::boxed::Box::new(core::cell::Cell::new(false)));
        let cs: &'static core::cell::Cell<bool> =
            std::boxed::Box::leak(std::boxed::Box::new(core::cell::Cell::new(false)));
        let spi = MockSpi {
            log: heapless::Vec::new(),
            data_mode: dc,
            bytes: 0,
        };
        (
            Ili9341::new(spi, MockPin { level: cs }, MockPin { level: dc }),
            cs,
        )
    }

    fn commands(log: &[(bool, u8)]) -> heapless::Vec<u8, 32> {
        log.iter()
            .filter(|(data, _)| !data)
            .map(|(_, byte)| *byte)
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (mut lcd, cs) = panel();
        lcd.init(&mut NoDelay).unwrap();

        let spi = lcd.spi;
        assert_eq!(
            commands(&spi.log).as_slice(),
            &[
                cmd::SW_RESET,
                cmd::SLEEP_OUT,
                cmd::MEMORY_ACCESS,
                cmd::PIXEL_FORMAT,
                cmd::DISPLAY_ON
            ]
        );
        assert!(spi.log.contains(&(true, COLMOD_16BIT)));
        // Deselected after the sequence
        assert!(cs.get());
    }

    #[test]
    fn test_fill_solid_window_and_count() {
        let (mut lcd, _) = panel();
        let area = Rectangle::new(Point::new(10, 20), Size::new(4, 3));
        lcd.fill_solid(&area, Rgb565::RED).unwrap();

        let spi = lcd.spi;
        assert_eq!(
            commands(&spi.log).as_slice(),
            &[cmd::COLUMN_ADDR, cmd::PAGE_ADDR, cmd::MEMORY_WRITE]
        );
        // Column window 10..=13, page window 20..=22
        assert_eq!(spi.log[1..5], [(true, 0), (true, 10), (true, 0), (true, 13)]);
        assert_eq!(spi.log[6..10], [(true, 0), (true, 20), (true, 0), (true, 22)]);
        // 12 pixels of 2 bytes after 11 command/parameter bytes
        assert_eq!(spi.bytes, 11 + 24);
        assert_eq!(spi.log[11], (true, 0xF8));
        assert_eq!(spi.log[12], (true, 0x00));
    }

    #[test]
    fn test_fill_clipped_to_panel() {
        let (mut lcd, _) = panel();
        let area = Rectangle::new(Point::new(238, 318), Size::new(10, 10));
        lcd.fill_solid(&area, Rgb565::BLACK).unwrap();

        let spi = lcd.spi;
        assert_eq!(spi.bytes, 11 + 4 * 2);
    }

    #[test]
    fn test_off_panel_fill_is_noop() {
        let (mut lcd, _) = panel();
        let area = Rectangle::new(Point::new(300, 400), Size::new(10, 10));
        lcd.fill_solid(&area, Rgb565::BLACK).unwrap();

        let spi = lcd.spi;
        assert_eq!(spi.bytes, 0);
    }

    #[test]
    fn test_fill_contiguous_streams_colors() {
        let (mut lcd, _) = panel();
        let area = Rectangle::new(Point::new(0, 0), Size::new(2, 1));
        lcd.fill_contiguous(&area, [Rgb565::RED, Rgb565::WHITE])
            .unwrap();

        let spi = lcd.spi;
        assert_eq!(spi.bytes, 11 + 4);
        assert_eq!(
            spi.log[11..15],
            [(true, 0xF8), (true, 0x00), (true, 0xFF), (true, 0xFF)]
        );
    }

    #[test]
    fn test_fill_contiguous_partially_visible() {
        let (mut lcd, _) = panel();
        let area = Rectangle::new(Point::new(239, 0), Size::new(2, 1));
        lcd.fill_contiguous(&area, [Rgb565::RED, Rgb565::RED])
            .unwrap();

        // Only the on-panel pixel is written, with its own window
        let spi = lcd.spi;
        assert_eq!(spi.bytes, 11 + 2);
    }

    #[test]
    fn test_draw_iter_skips_outside_pixels() {
        let (mut lcd, _) = panel();
        lcd.draw_iter([
            Pixel(Point::new(-1, 0), Rgb565::WHITE),
            Pixel(Point::new(5, 5), Rgb565::WHITE),
            Pixel(Point::new(240, 0), Rgb565::WHITE),
        ])
        .unwrap();

        let spi = lcd.spi;
        assert_eq!(spi.bytes, 11 + 2);
    }
}
