use std::path::{Path, PathBuf};

use pixel_ops::{
    apply_dither, composite, difference, half_size, quantize_popularity, quantize_uniform,
    ConvolutionFilter, DitherMethod, DitherOptions, KernelKind, PixelBuffer, RasterError,
};

use crate::error::PipelineError;
use crate::models::{PipelineConfig, Step};
use crate::services::codec::{load_image, save_image, ImageCodec, PngCodec};

/// Applies a configured sequence of operations to an image.
pub struct Pipeline {
    config: PipelineConfig,
    filter: ConvolutionFilter,
    codec: Box<dyn ImageCodec>,
    /// Directory relative operand paths are resolved against
    operand_dir: PathBuf,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let filter = ConvolutionFilter::new()
            .boundary(config.boundary)
            .edge_mode(config.edge_mode);
        Self {
            config,
            filter,
            codec: Box::new(PngCodec),
            operand_dir: PathBuf::from("."),
        }
    }

    /// Load the configuration from `path`; operands resolve against its
    /// directory.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let config = PipelineConfig::load(path)?;
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::new(config).operand_dir(dir))
    }

    pub fn codec(mut self, codec: impl ImageCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn operand_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.operand_dir = dir.into();
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every step on `image` in order.
    ///
    /// Stops at the first failing step. Steps before it have already been
    /// applied; the failing step itself leaves the image as it was.
    pub fn run(&mut self, image: &mut PixelBuffer) -> Result<(), PipelineError> {
        let Self {
            config,
            filter,
            codec,
            operand_dir,
        } = self;

        for (index, step) in config.steps.iter().enumerate() {
            tracing::info!(
                index,
                op = step.name(),
                width = image.width(),
                height = image.height(),
                "Applying step"
            );

            let operand = match step.operand() {
                Some(path) => Some(load_image(&**codec, &operand_dir.join(path))?),
                None => None,
            };

            apply_step(image, step, operand.as_ref(), config, filter).map_err(|source| {
                tracing::warn!(index, op = step.name(), %source, "Step failed");
                PipelineError::Step {
                    index,
                    op: step.name(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Load `input`, run the pipeline and save the result to `output`.
    pub fn process_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<PixelBuffer, PipelineError> {
        let mut image = load_image(&*self.codec, input.as_ref())?;
        self.run(&mut image)?;
        save_image(&*self.codec, output.as_ref(), &image)?;
        tracing::info!(
            output = %output.as_ref().display(),
            width = image.width(),
            height = image.height(),
            "Pipeline complete"
        );
        Ok(image)
    }
}

fn apply_step(
    image: &mut PixelBuffer,
    step: &Step,
    operand: Option<&PixelBuffer>,
    config: &PipelineConfig,
    filter: &mut ConvolutionFilter,
) -> Result<(), RasterError> {
    let options = DitherOptions::new();
    let dither = |image: &mut PixelBuffer, method| apply_dither(image, method, &options);

    match step {
        Step::Grayscale => image.to_grayscale(),
        Step::QuantUniform => quantize_uniform(image),
        Step::QuantPopulosity => {
            let palette = quantize_popularity(image, &config.popularity)?;
            tracing::debug!(colors = palette.len(), "Popularity palette");
        }
        Step::DitherThreshold => dither(image, DitherMethod::Threshold)?,
        Step::DitherRandom => dither(image, DitherMethod::Random { seed: config.seed })?,
        Step::DitherFloydSteinberg => dither(image, DitherMethod::FloydSteinberg)?,
        Step::DitherBright => dither(image, DitherMethod::Bright)?,
        Step::DitherCluster => dither(image, DitherMethod::Cluster)?,
        Step::DitherColor => dither(image, DitherMethod::Color)?,
        Step::FilterBox => filter.apply(image, KernelKind::Box)?,
        Step::FilterBartlett => filter.apply(image, KernelKind::Bartlett)?,
        Step::FilterGaussian => filter.apply(image, KernelKind::Gaussian)?,
        Step::FilterGaussianN { size } => filter.apply(image, KernelKind::GaussianN(*size))?,
        Step::FilterEdge => filter.apply(image, KernelKind::Edge)?,
        Step::FilterEnhance => filter.apply(image, KernelKind::Enhance)?,
        Step::Composite { mode, .. } => composite(image, operand_of(operand)?, *mode)?,
        Step::Difference { .. } => difference(image, operand_of(operand)?)?,
        Step::HalfSize => half_size(image)?,
    }
    Ok(())
}

fn operand_of(operand: Option<&PixelBuffer>) -> Result<&PixelBuffer, RasterError> {
    operand.ok_or(RasterError::InvalidParameter("step requires an operand image"))
}
