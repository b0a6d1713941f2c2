//! Convolution filters: blurs, edge detection and enhancement.
//!
//! [`ConvolutionFilter`] owns a [`KernelCache`] and the boundary and edge
//! settings; each method convolves the buffer in place from a snapshot.
//!
//! # Example
//!
//! ```
//! use pixel_ops::{ConvolutionFilter, PixelBuffer};
//!
//! let mut image = PixelBuffer::filled(9, 9, [80, 80, 80, 255]).unwrap();
//! let mut filter = ConvolutionFilter::new();
//! filter.gaussian_n(&mut image, 3).unwrap();
//! assert_eq!(image.pixel(4, 4).unwrap(), [80, 80, 80, 255]);
//! assert!(filter.gaussian_n(&mut image, 4).is_err());
//! ```

mod convolve;
mod kernel;

pub use convolve::{convolve, BoundaryPolicy};
pub use kernel::{FilterKernel, KernelCache, KernelKind, MAX_KERNEL_SIZE};

use serde::Deserialize;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Number of passes for the edge filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Three full passes of the high-pass kernel, as the legacy filter ran.
    #[default]
    Legacy,
    /// One pass.
    Single,
}

impl EdgeMode {
    pub fn passes(self) -> usize {
        match self {
            EdgeMode::Legacy => 3,
            EdgeMode::Single => 1,
        }
    }
}

/// Convolution filters with cached kernels.
#[derive(Debug, Default)]
pub struct ConvolutionFilter {
    boundary: BoundaryPolicy,
    edge_mode: EdgeMode,
    cache: KernelCache,
}

impl ConvolutionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// Convolve with the kernel for `kind`.
    ///
    /// [`KernelKind::Edge`] runs as many passes as the edge mode asks for.
    /// An invalid kernel size is reported before the buffer is touched.
    pub fn apply(&mut self, image: &mut PixelBuffer, kind: KernelKind) -> Result<()> {
        let kernel = self.cache.get(kind)?;
        let passes = match kind {
            KernelKind::Edge => self.edge_mode.passes(),
            _ => 1,
        };
        for _ in 0..passes {
            convolve(image, &kernel, self.boundary);
        }
        Ok(())
    }

    /// 5x5 box blur.
    pub fn box_blur(&mut self, image: &mut PixelBuffer) -> Result<()> {
        self.apply(image, KernelKind::Box)
    }

    /// 5x5 Bartlett blur.
    pub fn bartlett(&mut self, image: &mut PixelBuffer) -> Result<()> {
        self.apply(image, KernelKind::Bartlett)
    }

    /// Fixed 5x5 Gaussian blur.
    pub fn gaussian(&mut self, image: &mut PixelBuffer) -> Result<()> {
        self.apply(image, KernelKind::Gaussian)
    }

    /// NxN binomial Gaussian blur; `n` must be odd.
    pub fn gaussian_n(&mut self, image: &mut PixelBuffer, n: usize) -> Result<()> {
        self.apply(image, KernelKind::GaussianN(n))
    }

    /// High-pass edge detection.
    pub fn edge(&mut self, image: &mut PixelBuffer) -> Result<()> {
        self.apply(image, KernelKind::Edge)
    }

    /// Unsharp-mask enhancement.
    pub fn enhance(&mut self, image: &mut PixelBuffer) -> Result<()> {
        self.apply(image, KernelKind::Enhance)
    }
}
