//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermofan-core for the board peripherals:
//!
//! - Analog temperature input (LM35 on a 12-bit ADC)
//! - Fan PWM output over `embedded-hal` duty-cycle channels
//! - STMPE811 resistive touch controller (I2C)
//! - ILI9341 TFT panel (SPI) and an `embedded-graphics` display adapter

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod fan;
pub mod sensor;
pub mod touch;
