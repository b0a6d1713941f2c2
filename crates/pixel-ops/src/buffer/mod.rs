//! The RGBA8 raster every operation works on.
//!
//! Pixels are stored row-major, top row first, four interleaved channels
//! (R, G, B, A) per pixel. Codecs that store rows bottom-to-top must call
//! [`PixelBuffer::reverse_rows`] exactly once on load and once on save.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// Channel offsets within a pixel.
pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const ALPHA: usize = 3;

/// Color emitted for fully transparent pixels by [`unpremultiply`].
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Luma of a pixel: `0.30 R + 0.59 G + 0.11 B`, in `[0, 255]`.
#[inline]
pub fn luma(pixel: &[u8]) -> f64 {
    0.30 * pixel[RED] as f64 + 0.59 * pixel[GREEN] as f64 + 0.11 * pixel[BLUE] as f64
}

/// Divide the alpha back out of a premultiplied pixel.
///
/// Transparent pixels become [`BACKGROUND`]; every other channel is
/// `floor(c * 255 / alpha)` clamped to `[0, 255]`.
#[inline]
pub fn unpremultiply(pixel: &[u8]) -> [u8; 3] {
    let alpha = pixel[ALPHA];
    if alpha == 0 {
        return BACKGROUND;
    }

    let scale = 255.0_f32 / alpha as f32;
    let mut rgb = [0u8; 3];
    for (out, &c) in rgb.iter_mut().zip(&pixel[..3]) {
        *out = (c as f32 * scale).floor().clamp(0.0, 255.0) as u8;
    }
    rgb
}
