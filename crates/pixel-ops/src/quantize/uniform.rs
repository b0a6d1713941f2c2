//! Uniform bit-depth truncation.

use crate::buffer::PixelBuffer;

/// Per-channel masks: keep the top 3 bits of R and G, top 2 bits of B.
pub const UNIFORM_MASK: [u8; 3] = [0xE0, 0xE0, 0xC0];

/// Round an RGB triple down onto the uniform grid.
#[inline]
pub fn truncate_uniform(rgb: [u8; 3]) -> [u8; 3] {
    [
        rgb[0] & UNIFORM_MASK[0],
        rgb[1] & UNIFORM_MASK[1],
        rgb[2] & UNIFORM_MASK[2],
    ]
}

/// Reduce the image to an 8-bit (3-3-2) color cube in place.
///
/// Idempotent; alpha is untouched.
pub fn quantize_uniform(image: &mut PixelBuffer) {
    for pixel in image.pixels_mut() {
        for (c, mask) in pixel[..3].iter_mut().zip(UNIFORM_MASK) {
            *c &= mask;
        }
    }
}
