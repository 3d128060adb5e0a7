// src/pixel.rs

//! Pixel format contract.
//!
//! The public API accepts tightly packed, row-major **RGB** — 3 channels,
//! 8 bits each, `height * width * 3` bytes. The surface itself stores the
//! X11 ZPixmap layout for depth-24 visuals: 4 bytes per pixel, little-endian
//! BGRX. Conversion happens once, during staging, so the swap stays a pure
//! pointer exchange.
//!
//! Channel order is easy to get silently wrong (the image still shows, just
//! with red and blue exchanged), so the mapping is pinned by a test below.

/// Channels per pixel on the public API.
pub const CHANNELS: usize = 3;

/// Bytes per pixel in the native surface layout (BGRX).
pub const NATIVE_BYTES_PER_PIXEL: usize = 4;

/// Byte length of a valid input image for the given geometry.
pub fn image_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Byte length of a native surface buffer for the given geometry.
pub fn native_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * NATIVE_BYTES_PER_PIXEL
}

/// Expand packed RGB into the native BGRX layout.
///
/// Both slices must describe the same pixel count; staging validates the
/// input length before calling this.
pub fn expand_rgb_to_native(rgb: &[u8], native: &mut [u8]) {
    debug_assert_eq!(
        rgb.len() / CHANNELS,
        native.len() / NATIVE_BYTES_PER_PIXEL,
        "pixel count mismatch between input and surface buffer"
    );
    for (src, dst) in rgb
        .chunks_exact(CHANNELS)
        .zip(native.chunks_exact_mut(NATIVE_BYTES_PER_PIXEL))
    {
        dst[0] = src[2]; // blue
        dst[1] = src[1]; // green
        dst[2] = src[0]; // red
        dst[3] = 0;
    }
}

/// Fill a native buffer with a uniform gray (warm-up background).
pub fn fill_native_gray(native: &mut [u8], gray: u8) {
    for dst in native.chunks_exact_mut(NATIVE_BYTES_PER_PIXEL) {
        dst[0] = gray;
        dst[1] = gray;
        dst[2] = gray;
        dst[3] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_lands_in_bgrx_order() {
        let rgb = [10u8, 20, 30, 40, 50, 60];
        let mut native = [0u8; 8];
        expand_rgb_to_native(&rgb, &mut native);
        assert_eq!(native, [30, 20, 10, 0, 60, 50, 40, 0]);
    }

    #[test]
    fn gray_fill_covers_color_channels_only() {
        let mut native = [0xFFu8; 8];
        fill_native_gray(&mut native, 128);
        assert_eq!(native, [128, 128, 128, 0, 128, 128, 128, 0]);
    }

    #[test]
    fn lengths_match_geometry() {
        assert_eq!(image_len(1920, 1080), 1920 * 1080 * 3);
        assert_eq!(native_len(1920, 1080), 1920 * 1080 * 4);
    }
}
