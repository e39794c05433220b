//! Touch controllers

pub mod stmpe811;

pub use stmpe811::{Stmpe811, Stmpe811Error, STMPE811_ADDR};
