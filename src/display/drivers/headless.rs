// src/display/drivers/headless.rs
//! Headless recording driver.
//!
//! Stands in for a physical output in tests and CI: every presented buffer
//! is appended to a trace the test keeps a handle to after the engine takes
//! ownership of the driver. Optionally fails presents to exercise the
//! timeout path.

use crate::display::driver::SurfaceDriver;
use crate::error::ScreenError;
use log::trace;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type Frames = Arc<Mutex<Vec<Box<[u8]>>>>;

pub struct HeadlessSurfaceDriver {
    width: u32,
    height: u32,
    frames: Frames,
    fail_presents: bool,
}

impl HeadlessSurfaceDriver {
    pub fn new(width: u32, height: u32) -> Self {
        HeadlessSurfaceDriver {
            width,
            height,
            frames: Arc::new(Mutex::new(Vec::new())),
            fail_presents: false,
        }
    }

    /// Handle onto the presentation trace; stays valid after the driver is
    /// boxed into an engine.
    pub fn trace(&self) -> PresentTrace {
        PresentTrace(Arc::clone(&self.frames))
    }

    /// Make every subsequent present fail with `PresentationTimeout`.
    pub fn fail_presents(&mut self, fail: bool) {
        self.fail_presents = fail;
    }
}

impl SurfaceDriver for HeadlessSurfaceDriver {
    fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, native: &[u8]) -> Result<(), ScreenError> {
        if self.fail_presents {
            return Err(ScreenError::PresentationTimeout {
                waited: Duration::from_millis(33),
            });
        }
        trace!("HeadlessSurfaceDriver: present ({} bytes)", native.len());
        lock(&self.frames).push(native.into());
        Ok(())
    }
}

/// Frames a headless driver has presented, in order.
#[derive(Clone)]
pub struct PresentTrace(Frames);

impl PresentTrace {
    pub fn len(&self) -> usize {
        lock(&self.0).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.0).is_empty()
    }

    /// Copy of the i-th presented frame (native BGRX bytes).
    pub fn frame(&self, index: usize) -> Option<Vec<u8>> {
        lock(&self.0).get(index).map(|f| f.to_vec())
    }

    pub fn last(&self) -> Option<Vec<u8>> {
        lock(&self.0).last().map(|f| f.to_vec())
    }
}

fn lock(frames: &Frames) -> MutexGuard<'_, Vec<Box<[u8]>>> {
    frames.lock().unwrap_or_else(PoisonError::into_inner)
}
