//! Dithering to black and white (or to the uniform color cube).
//!
//! # Algorithms
//!
//! - **Threshold**: normalized luma against 0.5
//! - **Random**: threshold with seeded uniform noise
//! - **Floyd-Steinberg**: serpentine error diffusion in grayscale
//! - **Bright**: global threshold that preserves mean brightness
//! - **Cluster**: 4x4 clustered-dot ordered dithering
//! - **Color**: Floyd-Steinberg over the 3-3-2 uniform palette
//!
//! Every variant keeps alpha and writes channels in `[0, 255]`.
//!
//! # Example
//!
//! ```
//! use pixel_ops::{apply_dither, DitherMethod, DitherOptions, PixelBuffer};
//!
//! let mut image = PixelBuffer::filled(4, 4, [255, 0, 0, 255]).unwrap();
//! apply_dither(&mut image, DitherMethod::Threshold, &DitherOptions::new()).unwrap();
//! assert!(image.pixels().all(|p| p == [0, 0, 0, 255]));
//! ```

mod diffusion;
mod kernel;
mod options;
mod ordered;
mod threshold;

pub use diffusion::{dither_color, dither_floyd_steinberg};
pub use kernel::*;
pub use options::DitherOptions;
pub use ordered::{dither_cluster, CLUSTER_MATRIX};
pub use threshold::{dither_bright, dither_random, dither_threshold, THRESHOLD};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Dithering algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum DitherMethod {
    Threshold,
    /// Random threshold noise drawn from a generator seeded with `seed`.
    Random {
        #[serde(default)]
        seed: u64,
    },
    FloydSteinberg,
    Bright,
    Cluster,
    Color,
}

/// Dither `image` in place with the selected algorithm.
pub fn apply_dither(
    image: &mut PixelBuffer,
    method: DitherMethod,
    options: &DitherOptions,
) -> Result<()> {
    tracing::debug!(?method, width = image.width(), height = image.height(), "Dithering");
    match method {
        DitherMethod::Threshold => dither_threshold(image),
        DitherMethod::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            dither_random(image, &mut rng, options)?;
        }
        DitherMethod::FloydSteinberg => dither_floyd_steinberg(image, options),
        DitherMethod::Bright => dither_bright(image),
        DitherMethod::Cluster => dither_cluster(image),
        DitherMethod::Color => dither_color(image, options),
    }
    Ok(())
}

/// Set RGB to pure white or pure black, leaving alpha alone.
#[inline]
pub(crate) fn set_binary(pixel: &mut [u8], white: bool) {
    let value = if white { 255 } else { 0 };
    pixel[..3].fill(value);
}
