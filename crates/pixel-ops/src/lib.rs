//! pixel-ops: pixel transformations on RGBA8 rasters
//!
//! Every operation works in place on a [`PixelBuffer`]: a row-major,
//! top-to-bottom raster with four interleaved 8-bit channels. Operations
//! validate first and return a [`RasterError`] without touching the buffer
//! when their inputs are unusable.
//!
//! # Quick Start
//!
//! ```
//! use pixel_ops::{quantize_uniform, ConvolutionFilter, PixelBuffer};
//!
//! let mut image = PixelBuffer::filled(8, 8, [200, 120, 90, 255]).unwrap();
//! quantize_uniform(&mut image);
//! assert_eq!(image.pixel(0, 0).unwrap(), [192, 96, 64, 255]);
//!
//! let mut filter = ConvolutionFilter::new();
//! filter.box_blur(&mut image).unwrap();
//! assert_eq!(image.pixel(4, 4).unwrap(), [192, 96, 64, 255]);
//! ```
//!
//! # Operations
//!
//! - Color reduction: [`quantize_uniform`] (3-3-2 bit truncation) and
//!   [`quantize_popularity`] (most frequent colors, nearest match).
//! - Dithering: threshold, seeded random, Floyd-Steinberg in gray and
//!   color, brightness-preserving and clustered-dot, see [`dither`].
//! - Convolution: box, Bartlett, Gaussian, NxN binomial, edge detection
//!   and enhancement through [`ConvolutionFilter`].
//! - Compositing: Porter-Duff [`composite`] and [`difference`].
//! - Resampling: [`half_size`].
//!
//! # Conventions
//!
//! Channel arithmetic saturates to `[0, 255]`. Filters and error diffusion
//! read from a snapshot of the pre-pass pixels and swap the result in when
//! the pass finishes. Random dithering never seeds itself; the caller
//! passes the generator.

pub mod buffer;
pub mod composite;
pub mod dither;
pub mod error;
pub mod filter;
pub mod quantize;
pub mod resample;


pub use buffer::{luma, unpremultiply, PixelBuffer};
pub use composite::{composite, difference, CompositeOp};
pub use dither::{
    apply_dither, dither_bright, dither_cluster, dither_color, dither_floyd_steinberg,
    dither_random, dither_threshold, DitherMethod, DitherOptions,
};
pub use error::{RasterError, Result};
pub use filter::{BoundaryPolicy, ConvolutionFilter, EdgeMode, FilterKernel, KernelKind};
pub use quantize::{quantize_popularity, quantize_uniform, PaletteColor, PopularityOptions};
pub use resample::half_size;
