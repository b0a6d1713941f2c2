//! Kernel convolution over RGB, reading from an immutable snapshot.

use serde::Deserialize;

use crate::buffer::{PixelBuffer, CHANNELS};

use super::FilterKernel;

/// How taps that fall outside the raster are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Drop out-of-range taps but still divide by the full divisor.
    /// Edges come out darker; this matches the legacy filters.
    #[default]
    Omit,
    /// Clamp out-of-range taps to the nearest edge pixel.
    Replicate,
}

/// Convolve R, G and B of `image` with `kernel`. Alpha is kept.
///
/// Each output channel is the weighted sum divided (truncating toward
/// zero) by the kernel divisor, clamped to `[0, 255]`. All sums read the
/// pre-pass pixels. Sums are 128-bit: `255 * divisor` can exceed `i64`
/// for the largest binomial kernels.
pub fn convolve(image: &mut PixelBuffer, kernel: &FilterKernel, boundary: BoundaryPolicy) {
    let (width, height) = image.dimensions();
    let radius = kernel.radius() as i64;
    let divisor = kernel.divisor() as i128;

    let output = {
        let source = image.as_bytes();
        let mut output = source.to_vec();

        for y in 0..height {
            for x in 0..width {
                let mut sum = [0i128; 3];
                for ky in 0..kernel.size() {
                    let Some(sy) = resolve(y as i64 + ky as i64 - radius, height, boundary) else {
                        continue;
                    };
                    for kx in 0..kernel.size() {
                        let Some(sx) = resolve(x as i64 + kx as i64 - radius, width, boundary)
                        else {
                            continue;
                        };
                        let weight = kernel.weight(ky, kx) as i128;
                        let idx = (sy * width + sx) * CHANNELS;
                        for c in 0..3 {
                            sum[c] += source[idx + c] as i128 * weight;
                        }
                    }
                }

                let idx = (y * width + x) * CHANNELS;
                for c in 0..3 {
                    output[idx + c] = (sum[c] / divisor).clamp(0, 255) as u8;
                }
            }
        }
        output
    };

    image.replace_data(output);
}

/// Map a tap coordinate onto the raster, or `None` when it is dropped.
#[inline]
fn resolve(i: i64, len: usize, boundary: BoundaryPolicy) -> Option<usize> {
    if (0..len as i64).contains(&i) {
        return Some(i as usize);
    }
    match boundary {
        BoundaryPolicy::Omit => None,
        BoundaryPolicy::Replicate => Some(i.clamp(0, len as i64 - 1) as usize),
    }
}
