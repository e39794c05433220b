//! Temperature sensor inputs

pub mod adc;

pub use adc::{AdcReader, NormalizedAdc, ADC_MAX};
