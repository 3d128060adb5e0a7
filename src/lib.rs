// src/lib.rs

//! Double-buffered full-screen image presentation for projector-camera
//! capture.
//!
//! A structured-light or photometric rig projects known patterns and
//! captures camera frames in lock-step. The engine guarantees the timing
//! side of that: after `swap_buffers` returns, the image staged by the most
//! recent `set_next` is the one latched on the physical output, so the
//! producer can fire its camera trigger knowing what the sensor will see.
//!
//! ```no_run
//! use glimshow::FullScreen;
//!
//! # fn main() -> Result<(), glimshow::ScreenError> {
//! let mut screen = FullScreen::new()?;
//! let (h, w, ch) = screen.shape();
//! let pattern = vec![128u8; (h * w * ch) as usize];
//!
//! // Two-step protocol: stage, then swap right before the trigger.
//! screen.set_next(&pattern)?;
//! let changed = screen.swap_buffers()?;
//! assert!(changed);
//! // ... fire the camera trigger here, stage the next pattern meanwhile ...
//! # Ok(())
//! # }
//! ```
//!
//! Input images are packed 8-bit RGB, `height * width * 3` bytes; anything
//! else is rejected, never resized. One engine may be live per process.

pub mod buffer;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod exclusive;
pub mod pixel;
pub mod vsync;

pub use config::{Config, DisplayConfig, TimingConfig, CONFIG};
pub use engine::{FullScreen, Stager};
pub use error::ScreenError;
