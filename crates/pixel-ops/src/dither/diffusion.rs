//! Floyd-Steinberg error diffusion, grayscale and color.
//!
//! Both variants walk the raster row by row (serpentine by default),
//! quantize the current pixel, and push the per-channel error onto the
//! forward neighbors listed in [`FLOYD_STEINBERG`]. Neighbor updates are
//! clamped to `[0, 255]` and stored back as bytes, so later decisions see
//! the saturated value. Neighbors outside the raster are skipped and their
//! share of the error is dropped.
//!
//! The scan runs over a working copy that replaces the buffer contents only
//! once the whole image is done.

use crate::buffer::{PixelBuffer, CHANNELS, RED};
use crate::quantize::truncate_uniform;

use super::{DitherOptions, Kernel, FLOYD_STEINBERG};

/// Red-channel cutoff for the grayscale variant.
const GRAY_THRESHOLD: u8 = 128;

/// Grayscale Floyd-Steinberg to pure black and white.
///
/// The image is converted to grayscale first; each pixel becomes white when
/// its (error-adjusted) red channel is at least 128.
pub fn dither_floyd_steinberg(image: &mut PixelBuffer, options: &DitherOptions) {
    image.to_grayscale();
    diffuse(image, &FLOYD_STEINBERG, options, |pixel| {
        if pixel[RED] >= GRAY_THRESHOLD {
            [255; 3]
        } else {
            [0; 3]
        }
    });
}

/// Floyd-Steinberg over the uniform 3-3-2 color cube.
///
/// Each pixel is truncated like uniform quantization and the per-channel
/// truncation error is diffused independently.
pub fn dither_color(image: &mut PixelBuffer, options: &DitherOptions) {
    diffuse(image, &FLOYD_STEINBERG, options, |pixel| {
        truncate_uniform([pixel[0], pixel[1], pixel[2]])
    });
}

/// Run error diffusion with `quantize` choosing each output color.
fn diffuse<F>(image: &mut PixelBuffer, kernel: &Kernel, options: &DitherOptions, quantize: F)
where
    F: Fn(&[u8]) -> [u8; 3],
{
    let (width, height) = image.dimensions();
    let mut work = image.as_bytes().to_vec();

    for y in 0..height {
        let reverse = options.serpentine && y % 2 == 1;
        let direction = if reverse { -1 } else { 1 };

        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = (y * width + x) * CHANNELS;

            let quantized = quantize(&work[idx..idx + CHANNELS]);
            let mut error = [0.0f64; 3];
            for c in 0..3 {
                error[c] = work[idx + c] as f64 - quantized[c] as f64;
                work[idx + c] = quantized[c];
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + (dx * direction) as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }

                let n_idx = (ny as usize * width + nx as usize) * CHANNELS;
                let share = weight as f64 / kernel.divisor as f64;
                for c in 0..3 {
                    let value = work[n_idx + c] as f64 + error[c] * share;
                    work[n_idx + c] = value.clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    image.replace_data(work);
}
