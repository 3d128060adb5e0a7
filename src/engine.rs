// src/engine.rs

//! FullScreen - the presentation engine facade.
//!
//! Owns the display claim, the platform driver and the FRONT/BACK pair.
//! The producer protocol is two-step: `set_next` stages an image into BACK
//! (cheap-ish, does not touch the display), `swap_buffers` promotes BACK to
//! FRONT and presents, returning only once the frame is latched. That lets
//! a capture loop overlap next-frame preparation with the current exposure
//! and fire its hardware trigger right after `swap_buffers` returns.
//! `imshow` is the one-step convenience for callers that do not need the
//! staging window.

use crate::buffer::{BackSlot, DoubleBuffer};
use crate::config::{Config, CONFIG};
use crate::display::SurfaceDriver;
use crate::error::ScreenError;
use crate::exclusive::DisplayClaim;
use log::{info, trace};
use std::sync::Arc;

pub struct FullScreen {
    // Declaration order matters on drop: driver releases the output before
    // the claim frees the slot for a successor engine.
    driver: Option<Box<dyn SurfaceDriver>>,
    claim: Option<DisplayClaim>,
    buffers: DoubleBuffer,
    width: u32,
    height: u32,
}

impl FullScreen {
    /// Claim the default output using the process-global configuration.
    pub fn new() -> Result<Self, ScreenError> {
        Self::with_config(CONFIG.clone())
    }

    /// Claim the default output with an explicit configuration.
    pub fn with_config(config: Config) -> Result<Self, ScreenError> {
        let claim = DisplayClaim::acquire()?;
        let driver = open_default_driver(&config)?;
        Self::build(claim, driver, &config)
    }

    /// Build on a caller-supplied driver (alternate backends, test doubles).
    pub fn with_driver(
        driver: Box<dyn SurfaceDriver>,
        config: &Config,
    ) -> Result<Self, ScreenError> {
        let claim = DisplayClaim::acquire()?;
        Self::build(claim, driver, config)
    }

    fn build(
        claim: DisplayClaim,
        mut driver: Box<dyn SurfaceDriver>,
        config: &Config,
    ) -> Result<Self, ScreenError> {
        let (width, height) = driver.geometry();
        let mut buffers = DoubleBuffer::new(width, height);

        // Present a uniform background a number of times so the output
        // pipeline settles before the first real frame.
        if config.display.warmup_frames > 0 {
            buffers.fill_front_gray(config.display.background_gray);
            for _ in 0..config.display.warmup_frames {
                driver.present(buffers.front_pixels())?;
            }
        }

        info!("FullScreen: engine ready ({}x{})", width, height);
        Ok(FullScreen {
            driver: Some(driver),
            claim: Some(claim),
            buffers,
            width,
            height,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(height, width, 3)` - the shape of a valid input image.
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.height, self.width, 3)
    }

    /// Stage `rgb` (packed `height * width * 3` bytes) as the next frame.
    ///
    /// Does not touch the display. Repeated calls overwrite the staged
    /// image; only the most recent one survives to the next swap.
    pub fn set_next(&self, rgb: &[u8]) -> Result<(), ScreenError> {
        self.buffers.stage(rgb)
    }

    /// Cloneable handle for staging from a producer thread while this
    /// engine swaps and presents on its own.
    pub fn stager(&self) -> Stager {
        Stager {
            back: self.buffers.back_handle(),
        }
    }

    /// Promote the staged frame and present it, blocking until the display
    /// has latched it. Returns whether the on-screen content changed.
    ///
    /// With nothing staged this re-presents the current frame and returns
    /// `false` (same frame shown again); before anything was ever staged it
    /// is a no-op.
    pub fn swap_buffers(&mut self) -> Result<bool, ScreenError> {
        let driver = self
            .driver
            .as_mut()
            .ok_or_else(|| ScreenError::DisplayUnavailable("engine is closed".to_string()))?;

        let changed = self.buffers.promote();
        if changed || self.buffers.front_occupied() {
            driver.present(self.buffers.front_pixels())?;
        } else {
            trace!("FullScreen: swap with nothing ever staged; skipping present");
        }
        Ok(changed)
    }

    /// Stage and immediately swap: `set_next` followed by `swap_buffers`,
    /// with the same timing contract.
    pub fn imshow(&mut self, rgb: &[u8]) -> Result<(), ScreenError> {
        self.set_next(rgb)?;
        self.swap_buffers()?;
        Ok(())
    }

    /// Release the output and the process-wide claim. Idempotent; a new
    /// engine can be constructed afterwards. Called on drop as well.
    pub fn close(&mut self) {
        if self.driver.take().is_some() {
            info!("FullScreen: closed");
        }
        self.claim.take();
    }
}

impl Drop for FullScreen {
    fn drop(&mut self) {
        self.close();
    }
}

/// Staging handle usable from threads other than the presenting one.
///
/// Staging and an in-flight swap serialize on the BACK slot lock; the pixel
/// copy never overlaps the promote exchange.
#[derive(Clone)]
pub struct Stager {
    back: Arc<BackSlot>,
}

impl Stager {
    /// See [`FullScreen::set_next`].
    pub fn set_next(&self, rgb: &[u8]) -> Result<(), ScreenError> {
        self.back.stage(rgb)
    }
}

#[cfg(use_x11_display)]
fn open_default_driver(config: &Config) -> Result<Box<dyn SurfaceDriver>, ScreenError> {
    let driver = crate::display::X11SurfaceDriver::open(&config.display, &config.timing)?;
    Ok(Box::new(driver))
}

#[cfg(use_headless_display)]
fn open_default_driver(config: &Config) -> Result<Box<dyn SurfaceDriver>, ScreenError> {
    let driver = crate::display::HeadlessSurfaceDriver::new(
        config.display.headless_width,
        config.display.headless_height,
    );
    Ok(Box::new(driver))
}
