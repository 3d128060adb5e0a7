// src/buffer.rs

//! FRONT/BACK frame slots and the identity-exchange controller.
//!
//! Two fixed-geometry slots exist for the lifetime of the engine. BACK is
//! written by `stage` (any thread, behind a mutex); FRONT is owned by the
//! presenting side and mutated only by `promote`, which exchanges the two
//! buffer allocations instead of copying pixels. That keeps the operation
//! the producer runs right before a hardware trigger O(1).

use crate::error::ScreenError;
use crate::pixel;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One fixed-geometry pixel buffer in the native surface layout, plus an
/// occupancy flag.
pub struct FrameSlot {
    data: Box<[u8]>,
    occupied: bool,
}

impl FrameSlot {
    fn new(width: u32, height: u32) -> Self {
        FrameSlot {
            data: vec![0u8; pixel::native_len(width, height)].into_boxed_slice(),
            occupied: false,
        }
    }

    pub fn occupied(&self) -> bool {
        self.occupied
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}

/// The staging half of the double buffer: geometry plus the BACK slot.
///
/// Shared via `Arc` so producers may stage from a different thread than the
/// one presenting. The lock covers the slot identity and occupancy as well
/// as the pixel copy; `promote` holds it only for the pointer exchange, so a
/// producer can stage the next image while a present is still blocking.
pub struct BackSlot {
    width: u32,
    height: u32,
    slot: Mutex<FrameSlot>,
}

impl BackSlot {
    /// Validate geometry and copy `rgb` into BACK, expanding to the native
    /// layout. Repeated calls overwrite; only the most recent staged image
    /// survives to the next promote. On geometry mismatch the slot keeps its
    /// previous content and occupancy.
    pub fn stage(&self, rgb: &[u8]) -> Result<(), ScreenError> {
        let expected = pixel::image_len(self.width, self.height);
        if rgb.len() != expected {
            return Err(ScreenError::GeometryMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: rgb.len(),
            });
        }
        let mut slot = self.lock();
        pixel::expand_rgb_to_native(rgb, &mut slot.data);
        slot.occupied = true;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, FrameSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Double-buffer controller: FRONT owned here, BACK shared with stagers.
pub struct DoubleBuffer {
    front: FrameSlot,
    back: Arc<BackSlot>,
}

impl DoubleBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        DoubleBuffer {
            front: FrameSlot::new(width, height),
            back: Arc::new(BackSlot {
                width,
                height,
                slot: Mutex::new(FrameSlot::new(width, height)),
            }),
        }
    }

    /// Handle for staging from other threads.
    pub fn back_handle(&self) -> Arc<BackSlot> {
        Arc::clone(&self.back)
    }

    /// Stage through the owned handle. See [`BackSlot::stage`].
    pub fn stage(&self, rgb: &[u8]) -> Result<(), ScreenError> {
        self.back.stage(rgb)
    }

    /// Promote BACK to FRONT if BACK is occupied. The two buffer
    /// allocations swap identities; no pixels are copied. The new BACK is
    /// marked unoccupied. Returns whether FRONT's content changed.
    pub fn promote(&mut self) -> bool {
        let mut back = self.back.lock();
        if !back.occupied {
            return false;
        }
        std::mem::swap(&mut self.front.data, &mut back.data);
        self.front.occupied = true;
        back.occupied = false;
        true
    }

    pub fn front_occupied(&self) -> bool {
        self.front.occupied
    }

    /// Native-format pixels of the currently promoted frame.
    pub fn front_pixels(&self) -> &[u8] {
        &self.front.data
    }

    /// Paint FRONT with a uniform gray and mark it occupied (warm-up
    /// background; it is presented, so it counts as shown content).
    pub fn fill_front_gray(&mut self, gray: u8) {
        pixel::fill_native_gray(&mut self.front.data, gray);
        self.front.occupied = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_fill(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        rgb.iter()
            .copied()
            .cycle()
            .take(pixel::image_len(width, height))
            .collect()
    }

    #[test]
    fn promote_exchanges_identities_without_copy() {
        let mut buffers = DoubleBuffer::new(4, 2);
        let front_ptr = buffers.front.data.as_ptr();
        let back_ptr = buffers.back.lock().data.as_ptr();

        buffers.stage(&rgb_fill(4, 2, [1, 2, 3])).expect("stage");
        assert!(buffers.promote());

        assert_eq!(buffers.front.data.as_ptr(), back_ptr);
        assert_eq!(buffers.back.lock().data.as_ptr(), front_ptr);
        assert!(buffers.front_occupied());
        assert!(!buffers.back.lock().occupied);
    }

    #[test]
    fn promote_with_nothing_staged_is_a_noop() {
        let mut buffers = DoubleBuffer::new(4, 2);
        assert!(!buffers.promote());
        assert!(!buffers.front_occupied());

        // A frame already promoted stays put across an empty promote.
        buffers.stage(&rgb_fill(4, 2, [9, 9, 9])).expect("stage");
        assert!(buffers.promote());
        let shown: Vec<u8> = buffers.front_pixels().to_vec();
        assert!(!buffers.promote());
        assert_eq!(buffers.front_pixels(), &shown[..]);
    }

    #[test]
    fn restaging_overwrites_the_previous_back() {
        let mut buffers = DoubleBuffer::new(2, 2);
        buffers.stage(&rgb_fill(2, 2, [10, 20, 30])).expect("stage");
        buffers.stage(&rgb_fill(2, 2, [40, 50, 60])).expect("stage");
        assert!(buffers.promote());

        let mut expected = vec![0u8; pixel::native_len(2, 2)];
        pixel::expand_rgb_to_native(&rgb_fill(2, 2, [40, 50, 60]), &mut expected);
        assert_eq!(buffers.front_pixels(), &expected[..]);
    }

    #[test]
    fn geometry_mismatch_leaves_back_untouched() {
        let buffers = DoubleBuffer::new(4, 2);
        buffers.stage(&rgb_fill(4, 2, [7, 7, 7])).expect("stage");
        let before: Vec<u8> = buffers.back.lock().data.to_vec();

        let err = buffers.stage(&[0u8; 5]).expect_err("short buffer");
        match err {
            ScreenError::GeometryMismatch {
                width,
                height,
                expected,
                actual,
            } => {
                assert_eq!((width, height), (4, 2));
                assert_eq!(expected, 4 * 2 * 3);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(buffers.back.lock().occupied);
        assert_eq!(buffers.back.lock().data.to_vec(), before);
    }
}
