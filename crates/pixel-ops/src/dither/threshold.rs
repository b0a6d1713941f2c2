//! Global threshold dithering: fixed, randomly perturbed, and
//! brightness preserving.

use rand::Rng;

use crate::buffer::{luma, PixelBuffer};
use crate::error::{RasterError, Result};

use super::{set_binary, DitherOptions};

/// Normalized luma cutoff for [`dither_threshold`].
pub const THRESHOLD: f64 = 0.5;

/// White where normalized luma is at least 0.5, black elsewhere.
pub fn dither_threshold(image: &mut PixelBuffer) {
    for pixel in image.pixels_mut() {
        let white = luma(pixel) / 255.0 >= THRESHOLD;
        set_binary(pixel, white);
    }
}

/// Threshold dithering with per-pixel uniform noise.
///
/// Each pixel draws one value in `[-amplitude, amplitude]` from `rng` and
/// adds it to the normalized luma before comparing against 0.5. Seed the
/// generator to get reproducible output.
///
/// # Example
///
/// ```
/// use pixel_ops::{dither_random, DitherOptions, PixelBuffer};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut a = PixelBuffer::filled(8, 8, [128, 128, 128, 255]).unwrap();
/// let mut b = a.clone();
/// dither_random(&mut a, &mut StdRng::seed_from_u64(7), &DitherOptions::new()).unwrap();
/// dither_random(&mut b, &mut StdRng::seed_from_u64(7), &DitherOptions::new()).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn dither_random<R: Rng + ?Sized>(
    image: &mut PixelBuffer,
    rng: &mut R,
    options: &DitherOptions,
) -> Result<()> {
    let amplitude = options.noise_amplitude;
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(RasterError::InvalidParameter(
            "noise_amplitude must be finite and non-negative",
        ));
    }

    for pixel in image.pixels_mut() {
        let noise = rng.gen_range(-amplitude..=amplitude);
        let white = luma(pixel) / 255.0 + noise >= THRESHOLD;
        set_binary(pixel, white);
    }
    Ok(())
}

/// Threshold at the luma rank that keeps the average brightness.
///
/// With `avg` the mean normalized luma, the cutoff is the sorted luma at
/// index `floor((1 - avg) * pixel_count)`, so roughly an `avg` fraction of
/// pixels come out white.
pub fn dither_bright(image: &mut PixelBuffer) {
    let mut sorted: Vec<f64> = image.pixels().map(|p| luma(p) / 255.0).collect();
    let average = sorted.iter().sum::<f64>() / sorted.len() as f64;
    sorted.sort_by(f64::total_cmp);

    let rank = (((1.0 - average) * sorted.len() as f64) as usize).min(sorted.len() - 1);
    let threshold = sorted[rank];
    tracing::debug!(average, rank, threshold, "Brightness-preserving threshold");

    for pixel in image.pixels_mut() {
        let white = luma(pixel) / 255.0 >= threshold;
        set_binary(pixel, white);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_binary(image: &PixelBuffer) -> bool {
        image
            .pixels()
            .all(|p| p[..3] == [0, 0, 0] || p[..3] == [255, 255, 255])
    }

    #[test]
    fn test_threshold_pure_red_goes_black() {
        let mut image = PixelBuffer::filled(4, 4, [255, 0, 0, 255]).unwrap();
        dither_threshold(&mut image);
        assert!(image.pixels().all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // Gray 128 has normalized luma 128/255 > 0.5; gray 127 is below.
        let mut image =
            PixelBuffer::from_rgba(2, 1, vec![128, 128, 128, 200, 127, 127, 127, 10]).unwrap();
        dither_threshold(&mut image);
        assert_eq!(image.as_bytes(), &[255, 255, 255, 200, 0, 0, 0, 10]);
    }

    #[test]
    fn test_random_is_binary_and_keeps_alpha() {
        let data: Vec<u8> = (0..64u8).flat_map(|i| [i * 4, i * 4, i * 4, i]).collect();
        let mut image = PixelBuffer::from_rgba(8, 8, data).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        dither_random(&mut image, &mut rng, &DitherOptions::new()).unwrap();

        assert!(is_binary(&image));
        for (i, pixel) in image.pixels().enumerate() {
            assert_eq!(pixel[3], i as u8);
        }
    }

    #[test]
    fn test_random_same_seed_same_output() {
        let source = PixelBuffer::filled(16, 16, [120, 130, 140, 255]).unwrap();
        let mut a = source.clone();
        let mut b = source.clone();
        dither_random(&mut a, &mut StdRng::seed_from_u64(9), &DitherOptions::new()).unwrap();
        dither_random(&mut b, &mut StdRng::seed_from_u64(9), &DitherOptions::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_far_from_threshold_is_stable() {
        // Luma well outside 0.5 +/- 0.2 is never flipped by the noise.
        let mut dark = PixelBuffer::filled(8, 8, [20, 20, 20, 255]).unwrap();
        let mut light = PixelBuffer::filled(8, 8, [240, 240, 240, 255]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        dither_random(&mut dark, &mut rng, &DitherOptions::new()).unwrap();
        dither_random(&mut light, &mut rng, &DitherOptions::new()).unwrap();
        assert!(dark.pixels().all(|p| p[..3] == [0, 0, 0]));
        assert!(light.pixels().all(|p| p[..3] == [255, 255, 255]));
    }

    #[test]
    fn test_random_rejects_negative_amplitude() {
        let mut image = PixelBuffer::filled(2, 2, [1, 2, 3, 4]).unwrap();
        let before = image.clone();
        let result = dither_random(
            &mut image,
            &mut StdRng::seed_from_u64(0),
            &DitherOptions::new().noise_amplitude(-1.0),
        );
        assert!(result.is_err());
        assert_eq!(image, before);
    }

    #[test]
    fn test_bright_keeps_two_tone_image() {
        let mut data = Vec::new();
        for i in 0..16 {
            let v = if i % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let mut image = PixelBuffer::from_rgba(4, 4, data).unwrap();
        let original = image.clone();
        dither_bright(&mut image);
        assert_eq!(image, original);
    }

    #[test]
    fn test_bright_white_fraction_tracks_average() {
        // A horizontal ramp: the share of white pixels should follow the
        // mean brightness.
        let width = 64;
        let data: Vec<u8> = (0..width)
            .flat_map(|x| {
                let v = (x * 4) as u8;
                [v, v, v, 255]
            })
            .collect();
        let mut image = PixelBuffer::from_rgba(width, 1, data).unwrap();
        dither_bright(&mut image);

        assert!(is_binary(&image));
        let white = image.pixels().filter(|p| p[0] == 255).count();
        let ratio = white as f64 / width as f64;
        assert!((ratio - 0.5).abs() < 0.1, "white ratio {ratio}");
    }

    #[test]
    fn test_bright_cutoff_is_rank_not_mean() {
        // Ten dark pixels and two bright ones: the mean luma is about 0.24,
        // so rank floor(0.76 * 12) = 9 lands on a dark value and every pixel
        // clears it. A mean cutoff would whiten only the bright pair.
        let data: Vec<u8> = (0..12)
            .flat_map(|i| {
                let v = if i == 3 || i == 7 { 230 } else { 26 };
                [v, v, v, 255]
            })
            .collect();
        let mut image = PixelBuffer::from_rgba(4, 3, data).unwrap();
        dither_bright(&mut image);
        assert!(image.pixels().all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_bright_uniform_image_turns_white() {
        let mut image = PixelBuffer::filled(3, 3, [0, 0, 0, 255]).unwrap();
        dither_bright(&mut image);
        // Every luma equals the threshold, so the image turns white: the
        // rank cutoff is inclusive.
        assert!(image.pixels().all(|p| p == [255, 255, 255, 255]));
    }
}
