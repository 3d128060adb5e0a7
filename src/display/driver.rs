// src/display/driver.rs
//! SurfaceDriver trait - the minimal platform primitive for presentation.
//!
//! All staging, validation and double-buffer logic lives above this seam;
//! a driver only knows how to own one full-screen output and push native
//! pixels to it.
//!
//! ## Threading Model
//! A driver is owned by one presentation context and `present` must always
//! be called from it (display command submission is single-threaded on most
//! platforms). Staging runs on any thread; it never reaches the driver.
//!
//! ## Lifecycle
//! Construction claims the output (each implementation exposes its own
//! `open`-style constructor); `Drop` restores the prior display state. No
//! explicit shutdown method.

use crate::error::ScreenError;

pub trait SurfaceDriver {
    /// Native resolution of the claimed output in pixels. Pure query.
    fn geometry(&self) -> (u32, u32);

    /// Push one native-format buffer (BGRX, 4 bytes per pixel,
    /// `width * height * 4` bytes) to the output.
    ///
    /// Blocks until the display has latched the frame, bounded by the
    /// configured present timeout; on expiry returns
    /// [`ScreenError::PresentationTimeout`] instead of hanging the caller.
    fn present(&mut self, native: &[u8]) -> Result<(), ScreenError>;
}
