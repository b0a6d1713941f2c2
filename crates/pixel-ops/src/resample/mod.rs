//! Downsampling.

use crate::buffer::{PixelBuffer, ALPHA, CHANNELS};
use crate::error::{RasterError, Result};

/// One axis of the 3x3 pre-blur; the full kernel is its outer product.
const BLUR_ROW: [u32; 3] = [1, 2, 1];
const BLUR_DIVISOR: u32 = 16;

/// Halve both dimensions.
///
/// The image is first blurred with the 1-2-1 kernel, mirroring taps that
/// fall off an edge back into the raster. Each output pixel is then the
/// blurred sample at `(2u + 1, 2v + 1)`, alpha taken from the same source
/// pixel. A trailing odd row or column is dropped.
///
/// Returns `TooSmall` when either dimension is below 2.
pub fn half_size(image: &mut PixelBuffer) -> Result<()> {
    let (width, height) = image.dimensions();
    let (out_width, out_height) = (width / 2, height / 2);
    if out_width == 0 || out_height == 0 {
        return Err(RasterError::TooSmall { width, height });
    }

    let source = image.as_bytes();
    let mut output = Vec::with_capacity(out_width * out_height * CHANNELS);
    for v in 0..out_height {
        let y = 2 * v + 1;
        for u in 0..out_width {
            let x = 2 * u + 1;
            let mut sum = [0u32; 3];
            for (i, &wy) in BLUR_ROW.iter().enumerate() {
                let sy = mirror(y as i64 + i as i64 - 1, height);
                for (j, &wx) in BLUR_ROW.iter().enumerate() {
                    let sx = mirror(x as i64 + j as i64 - 1, width);
                    let idx = (sy * width + sx) * CHANNELS;
                    for c in 0..3 {
                        sum[c] += source[idx + c] as u32 * wy * wx;
                    }
                }
            }

            let center = (y * width + x) * CHANNELS;
            output.extend(sum.iter().map(|&s| (s / BLUR_DIVISOR) as u8));
            output.push(source[center + ALPHA]);
        }
    }

    tracing::debug!(width, height, out_width, out_height, "Half size");
    image.replace(out_width, out_height, output);
    Ok(())
}

/// Reflect `i` across the nearest edge of `0..len`.
#[inline]
fn mirror(i: i64, len: usize) -> usize {
    let last = len as i64 - 1;
    let reflected = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    reflected.clamp(0, last) as usize
}
