//! STM32F429I-DISCO peripheral wiring
//!
//! | Function      | Peripheral | Pins                     |
//! |---------------|------------|--------------------------|
//! | LM35 sensor   | ADC1       | PA0                      |
//! | Fan PWM       | TIM3 CH1   | PA6                      |
//! | Touch STMPE811| I2C3       | PA8 (SCL), PC9 (SDA)     |
//! | ILI9341 panel | SPI5       | PF7 (SCK), PF9 (MOSI)    |
//! | Panel control | GPIO       | PC2 (CS), PD13 (D/C)     |

use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::gpio::Output;
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::{ADC1, TIM3};
use embassy_stm32::spi::Spi;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;

use thermofan_core::sensor::SensorReader;
use thermofan_drivers::display::{GraphicsDisplay, Ili9341};
use thermofan_drivers::fan::PwmFan;
use thermofan_drivers::sensor::{AdcReader, NormalizedAdc};
use thermofan_drivers::touch::Stmpe811;

/// I2C3 clock for the touch controller
pub const TOUCH_I2C_HZ: u32 = 100_000;

/// SPI5 clock for the panel
pub const PANEL_SPI_HZ: u32 = 10_000_000;

/// LM35 input on ADC1
pub struct BoardAdc {
    adc: Adc<'static, ADC1>,
    channel: AnyAdcChannel<ADC1>,
}

impl BoardAdc {
    pub fn new(adc: Adc<'static, ADC1>, channel: AnyAdcChannel<ADC1>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for BoardAdc {
    fn read(&mut self) -> Result<u16, ()> {
        Ok(self.adc.blocking_read(&mut self.channel))
    }
}

/// Temperature sensor
pub type Sensor = SensorReader<NormalizedAdc<BoardAdc>>;

/// Fan output
pub type Fan = PwmFan<SimplePwmChannel<'static, TIM3>>;

/// Touch controller
pub type Touch = Stmpe811<I2c<'static, Blocking>>;

/// Status display
pub type Display =
    GraphicsDisplay<Ili9341<Spi<'static, Blocking>, Output<'static>, Output<'static>>>;
