//! imgops - image operations driven by a pipeline file
//!
//! Wraps the `pixel-ops` engine with file codecs and a YAML-configured
//! pipeline of steps.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;

pub use error::{CodecError, PipelineError};
pub use models::{PipelineConfig, Step};
pub use services::{load_image, save_image, ImageCodec, Pipeline, PngCodec, RowOrder};
