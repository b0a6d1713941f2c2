//! Dithering options.

/// Configuration shared by the dithering operations.
///
/// # Defaults
///
/// - Serpentine scanning: enabled
/// - Noise amplitude: 0.2 (random dithering perturbs normalized luma by
///   a uniform value in `[-0.2, 0.2]`)
///
/// # Example
///
/// ```
/// use pixel_ops::DitherOptions;
///
/// let options = DitherOptions::new().serpentine(false).noise_amplitude(0.1);
/// assert!(!options.serpentine);
/// ```
#[derive(Debug, Clone)]
pub struct DitherOptions {
    /// Alternate scan direction per row during error diffusion.
    ///
    /// Even rows run left to right, odd rows right to left with the
    /// kernel mirrored.
    ///
    /// Default: `true`
    pub serpentine: bool,

    /// Half-width of the uniform noise added by random dithering.
    ///
    /// Default: `0.2`
    pub noise_amplitude: f64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            serpentine: true,
            noise_amplitude: 0.2,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    #[inline]
    pub fn noise_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }
}
