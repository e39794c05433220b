//! Build script for thermofan-firmware
//!
//! The memory layout comes from embassy-stm32's `memory-x` feature; this
//! script only passes the linker scripts.

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}
