//! Error type shared by every pixel operation.
//!
//! Operations validate their inputs before touching pixel data, so a
//! returned error always means the buffer was left unchanged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("Empty buffer: width and height must be non-zero")]
    EmptyBuffer,

    #[error("Pixel data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error(
        "Dimension mismatch: expected {}x{}, got {}x{}",
        expected.0,
        expected.1,
        actual.0,
        actual.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid kernel size: {0} (must be a positive odd number)")]
    InvalidKernelSize(usize),

    #[error("Kernel size {size} exceeds the maximum of {max}")]
    KernelTooLarge { size: usize, max: usize },

    #[error("Buffer too small for operation: {width}x{height}")]
    TooSmall { width: usize, height: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub type Result<T> = std::result::Result<T, RasterError>;
