use std::path::PathBuf;

use pixel_ops::RasterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported color type: {0:?}")]
    UnsupportedColorType(png::ColorType),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Step {index} ({op}) failed: {source}")]
    Step {
        index: usize,
        op: &'static str,
        source: RasterError,
    },
}
