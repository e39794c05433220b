//! Display drivers
//!
//! - `ili9341`: SPI panel driver implementing `DrawTarget`
//! - `graphics`: adapts any RGB565 `DrawTarget` to the core `DisplayDriver`

pub mod graphics;
pub mod ili9341;

pub use graphics::{rgb565, GraphicsDisplay, TEXT_FONT};
pub use ili9341::{Ili9341, Ili9341Error};
