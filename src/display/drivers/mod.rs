// src/display/drivers/mod.rs
//! Surface driver implementations.

pub mod headless;

#[cfg(use_x11_display)]
pub mod x11;
