use std::path::{Path, PathBuf};

use pixel_ops::{BoundaryPolicy, CompositeOp, EdgeMode, PopularityOptions};
use serde::Deserialize;

use crate::error::PipelineError;

/// Pipeline configuration loaded from YAML
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PipelineConfig {
    /// Seed for random dithering steps
    #[serde(default)]
    pub seed: u64,

    /// Edge handling for convolution filters
    #[serde(default)]
    pub boundary: BoundaryPolicy,

    /// Pass count for edge detection
    #[serde(default)]
    pub edge_mode: EdgeMode,

    /// Settings for `quant_populosity` steps
    #[serde(default)]
    pub popularity: PopularityOptions,

    /// Operations applied in order
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One operation in a pipeline.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Grayscale,
    QuantUniform,
    QuantPopulosity,
    DitherThreshold,
    DitherRandom,
    #[serde(rename = "dither_fs")]
    DitherFloydSteinberg,
    DitherBright,
    DitherCluster,
    DitherColor,
    FilterBox,
    FilterBartlett,
    FilterGaussian,
    FilterGaussianN {
        size: usize,
    },
    FilterEdge,
    FilterEnhance,
    /// Composite the current image over (or in, out, ...) another image.
    Composite {
        mode: CompositeOp,
        /// Path to the bottom layer
        operand: PathBuf,
    },
    Difference {
        operand: PathBuf,
    },
    HalfSize,
}

impl Step {
    /// Config name of the step.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Grayscale => "grayscale",
            Step::QuantUniform => "quant_uniform",
            Step::QuantPopulosity => "quant_populosity",
            Step::DitherThreshold => "dither_threshold",
            Step::DitherRandom => "dither_random",
            Step::DitherFloydSteinberg => "dither_fs",
            Step::DitherBright => "dither_bright",
            Step::DitherCluster => "dither_cluster",
            Step::DitherColor => "dither_color",
            Step::FilterBox => "filter_box",
            Step::FilterBartlett => "filter_bartlett",
            Step::FilterGaussian => "filter_gaussian",
            Step::FilterGaussianN { .. } => "filter_gaussian_n",
            Step::FilterEdge => "filter_edge",
            Step::FilterEnhance => "filter_enhance",
            Step::Composite { .. } => "composite",
            Step::Difference { .. } => "difference",
            Step::HalfSize => "half_size",
        }
    }

    /// Path of the second image this step reads, if any.
    pub fn operand(&self) -> Option<&Path> {
        match self {
            Step::Composite { operand, .. } | Step::Difference { operand } => Some(operand),
            _ => None,
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, PipelineError> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            steps = config.steps.len(),
            "Loaded pipeline configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.seed, 0);
        assert_eq!(config.boundary, BoundaryPolicy::Omit);
        assert_eq!(config.edge_mode, EdgeMode::Legacy);
        assert_eq!(config.popularity, PopularityOptions::default());
        assert!(config.steps.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
seed: 42
boundary: replicate
edge_mode: single
popularity:
  palette_size: 16
steps:
  - op: grayscale
  - op: dither_fs
  - op: filter_gaussian_n
    size: 7
  - op: composite
    mode: atop
    operand: layers/bottom.png
  - op: difference
    operand: reference.png
  - op: half_size
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.boundary, BoundaryPolicy::Replicate);
        assert_eq!(config.edge_mode, EdgeMode::Single);
        assert_eq!(config.popularity.palette_size, 16);
        assert_eq!(config.popularity.bits_per_channel, 5);
        assert_eq!(
            config.steps,
            vec![
                Step::Grayscale,
                Step::DitherFloydSteinberg,
                Step::FilterGaussianN { size: 7 },
                Step::Composite {
                    mode: CompositeOp::Atop,
                    operand: PathBuf::from("layers/bottom.png"),
                },
                Step::Difference {
                    operand: PathBuf::from("reference.png"),
                },
                Step::HalfSize,
            ]
        );
    }

    #[test]
    fn test_step_names_round_trip_through_yaml() {
        let names = [
            "grayscale",
            "quant_uniform",
            "quant_populosity",
            "dither_threshold",
            "dither_random",
            "dither_fs",
            "dither_bright",
            "dither_cluster",
            "dither_color",
            "filter_box",
            "filter_bartlett",
            "filter_gaussian",
            "filter_edge",
            "filter_enhance",
            "half_size",
        ];
        for name in names {
            let step: Step = serde_yaml::from_str(&format!("op: {name}")).unwrap();
            assert_eq!(step.name(), name);
            assert!(step.operand().is_none());
        }
    }

    #[test]
    fn test_operand_paths() {
        let step = Step::Difference {
            operand: PathBuf::from("other.png"),
        };
        assert_eq!(step.operand(), Some(Path::new("other.png")));
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        let result = PipelineConfig::from_yaml_str("steps:\n  - op: double_size\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_missing_kernel_size_is_rejected() {
        let result = PipelineConfig::from_yaml_str("steps:\n  - op: filter_gaussian_n\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = PipelineConfig::load("/nonexistent/pipeline.yaml");
        assert!(matches!(result, Err(PipelineError::ConfigRead { .. })));
    }
}
