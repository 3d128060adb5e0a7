// src/error.rs
//! Error taxonomy for the presentation engine.
//!
//! Every fallible operation returns one of these; nothing is swallowed
//! internally. A dropped or delayed frame would corrupt the timing contract
//! the capture loop relies on, so failures always reach the caller.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenError {
    /// No exclusive full-screen output could be claimed. Fatal to
    /// construction; never retried internally.
    #[error("display unavailable: {0}")]
    DisplayUnavailable(String),

    /// A second engine was requested while one is live. The full-screen
    /// output is a single physical resource.
    #[error("a full-screen engine is already active in this process")]
    AlreadyActive,

    /// Supplied image does not match the surface geometry. Recoverable; the
    /// staging slot is left untouched.
    #[error(
        "invalid image size: expected {height}x{width}x3 ({expected} bytes), got {actual} bytes"
    )]
    GeometryMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The display did not latch a frame within the bounded wait. Treat as a
    /// dropped frame; the FRONT/BACK bookkeeping stays consistent.
    #[error("display did not latch the frame within {waited:?}")]
    PresentationTimeout { waited: Duration },
}
