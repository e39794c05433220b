//! Thermofan - Temperature-Actuated Fan Controller Firmware
//!
//! Reads an LM35 on the STM32F429I-DISCO, ramps a PWM fan when the
//! temperature exceeds a user threshold, and shows both values on the
//! touch screen with "+"/"-" controls for the threshold.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel, SampleTime};
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_time::{Delay, Instant};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermofan_core::config::ControlConfig;
use thermofan_core::input::ThresholdEditor;
use thermofan_core::sensor::{initial_threshold, SensorReader};
use thermofan_core::ui::StatusPresenter;
use thermofan_drivers::display::{GraphicsDisplay, Ili9341};
use thermofan_drivers::fan::{frequency_hz, PwmFan};
use thermofan_drivers::sensor::NormalizedAdc;
use thermofan_drivers::touch::Stmpe811;

use crate::board::{BoardAdc, PANEL_SPI_HZ, TOUCH_I2C_HZ};
use crate::channels::STATE;

mod board;
mod channels;
mod tasks;

// Configuration must live forever for task references
static CONFIG: StaticCell<ControlConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermofan firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static ControlConfig = CONFIG.init(ControlConfig::default());
    if let Err(e) = config.validate() {
        panic!("Invalid configuration: {}", e);
    }
    info!(
        "Config: ramp {}us/{}ms, monitor {}ms, cooldown {}ms",
        config.ramp_step, config.ramp_interval_ms, config.monitor_interval_ms, config.touch_cooldown_ms
    );

    // Fan PWM on TIM3 CH1, timer period taken from the config, off until
    // the monitor says otherwise
    let fan_pin = PwmPin::new(p.PA6, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(fan_pin),
        None,
        None,
        None,
        Hertz(frequency_hz(config.pwm_period_us)),
        CountingMode::EdgeAlignedUp,
    );
    let mut fan_channel = pwm.split().ch1;
    fan_channel.set_duty_cycle_fully_off();
    fan_channel.enable();
    let fan = PwmFan::new(fan_channel, config.pwm_period_us);
    info!("Fan PWM initialized");

    // LM35 on PA0
    let mut adc = Adc::new(p.ADC1);
    adc.set_sample_time(SampleTime::CYCLES480);
    let mut sensor = SensorReader::new(NormalizedAdc::new(BoardAdc::new(
        adc,
        p.PA0.degrade_adc(),
    )));

    // Threshold starts just above the boot temperature
    let reading = sensor.read(&STATE);
    let threshold = initial_threshold(reading.celsius, config.threshold_offset_c);
    STATE.set_threshold(threshold);
    info!(
        "Boot temperature {}C, threshold {}C",
        reading.celsius, threshold
    );

    // ILI9341 on SPI5
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(PANEL_SPI_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI5, p.PF7, p.PF9, spi_config);
    let cs = Output::new(p.PC2, Level::High, Speed::VeryHigh);
    let dc = Output::new(p.PD13, Level::Low, Speed::VeryHigh);
    let mut panel = Ili9341::new(spi, cs, dc);
    if let Err(e) = panel.init(&mut Delay) {
        error!("Panel init failed: {}", e);
    }

    let mut display = GraphicsDisplay::new(panel);
    let mut presenter = StatusPresenter::new(config);
    if let Err(e) = presenter.draw_splash(&mut display) {
        warn!("Splash failed: {}", e);
    }
    info!("Display initialized");

    // STMPE811 on I2C3
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz(TOUCH_I2C_HZ);
    let i2c = I2c::new_blocking(p.I2C3, p.PA8, p.PC9, i2c_config);
    let mut touch = Stmpe811::new(i2c, config.screen);
    match touch.init(&mut Delay) {
        Ok(()) => info!("Touch controller initialized"),
        Err(e) => warn!("Touch controller init failed: {}", e),
    }

    // Touch cooldown runs from boot
    let editor = ThresholdEditor::new(config, Instant::now().as_millis());

    let ui = tasks::UiContext {
        touch,
        sensor,
        display,
        editor,
        presenter,
    };

    info!("Spawning tasks...");
    spawner.spawn(unwrap!(tasks::fan_task(fan, config)));
    spawner.spawn(unwrap!(tasks::monitor_task(config)));
    spawner.spawn(unwrap!(tasks::ui_task(ui)));

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
    }
}
