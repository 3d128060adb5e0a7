// src/display/mod.rs
//! Display binding: the `SurfaceDriver` seam and its implementations.
//!
//! - `SurfaceDriver`: the platform primitive the engine presents through
//! - `drivers::x11`: real full-screen output via Xlib
//! - `drivers::headless`: recording driver for tests and CI

pub mod driver;
pub mod drivers;

pub use driver::SurfaceDriver;
pub use drivers::headless::{HeadlessSurfaceDriver, PresentTrace};

#[cfg(use_x11_display)]
pub use drivers::x11::X11SurfaceDriver;
