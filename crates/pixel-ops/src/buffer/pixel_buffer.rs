//! Owned RGBA8 raster with bounds-checked access.

use super::{luma, unpremultiply, ALPHA, BLUE, CHANNELS, GREEN, RED};
use crate::error::{RasterError, Result};

/// A `width x height` RGBA8 raster.
///
/// The data length is always `width * height * 4`. Size-changing
/// operations go through [`PixelBuffer::replace`], which swaps the
/// dimensions and the storage together.
///
/// # Example
///
/// ```
/// use pixel_ops::PixelBuffer;
///
/// let mut image = PixelBuffer::filled(2, 2, [10, 20, 30, 255]).unwrap();
/// image.get_mut(1, 1).unwrap()[0] = 99;
///
/// assert_eq!(image.pixel(1, 1).unwrap(), [99, 20, 30, 255]);
/// assert!(image.get(2, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create an all-zero (transparent black) buffer.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create a buffer with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyBuffer);
        }
        Ok(Self {
            width,
            height,
            data: rgba.repeat(width * height),
        })
    }

    /// Wrap raw RGBA8 bytes (row-major, top row first).
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyBuffer);
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes. The length cannot change through this view.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) * CHANNELS)
    }

    /// The four channels of pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<&[u8]> {
        let i = self.offset(x, y)?;
        Ok(&self.data[i..i + CHANNELS])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut [u8]> {
        let i = self.offset(x, y)?;
        Ok(&mut self.data[i..i + CHANNELS])
    }

    /// Copy of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<[u8; 4]> {
        let p = self.get(x, y)?;
        Ok([p[RED], p[GREEN], p[BLUE], p[ALPHA]])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) -> Result<()> {
        self.get_mut(x, y)?.copy_from_slice(&rgba);
        Ok(())
    }

    /// Iterate pixels in scan order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Check that `other` has the same dimensions as `self`.
    pub fn ensure_same_size(&self, other: &PixelBuffer) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(RasterError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Packed RGB (3 bytes per pixel) with alpha divided out against a
    /// black background.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for pixel in self.pixels() {
            rgb.extend_from_slice(&unpremultiply(pixel));
        }
        rgb
    }

    /// Zero every channel, alpha included.
    pub fn clear_to_black(&mut self) {
        self.data.fill(0);
    }

    /// A copy with the row order flipped top to bottom.
    pub fn reverse_rows(&self) -> PixelBuffer {
        let stride = self.width * CHANNELS;
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.data.chunks_exact(stride).rev() {
            data.extend_from_slice(row);
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Replace R, G and B with the rounded luma. Alpha is unchanged.
    pub fn to_grayscale(&mut self) {
        for pixel in self.pixels_mut() {
            let gray = luma(pixel).round().clamp(0.0, 255.0) as u8;
            pixel[RED] = gray;
            pixel[GREEN] = gray;
            pixel[BLUE] = gray;
        }
    }

    /// Swap in new storage and dimensions together.
    ///
    /// Callers inside the crate have already validated the sizes.
    pub(crate) fn replace(&mut self, width: usize, height: usize, data: Vec<u8>) {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        self.width = width;
        self.height = height;
        self.data = data;
    }

    /// Swap in new storage of the same dimensions.
    pub(crate) fn replace_data(&mut self, data: Vec<u8>) {
        self.replace(self.width, self.height, data);
    }
}
