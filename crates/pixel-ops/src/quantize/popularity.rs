//! Popularity (populosity) quantization.
//!
//! The image is first truncated to `bits_per_channel` bits per channel,
//! the most frequent truncated colors become the palette, and every pixel
//! is mapped to its nearest palette entry in RGB space.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::buffer::PixelBuffer;
use crate::error::{RasterError, Result};

/// A histogram bucket considered for the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Number of pixels that fell into this bucket.
    pub count: u32,
    pub selected: bool,
}

impl PaletteColor {
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Popularity quantization settings.
///
/// # Defaults
///
/// - `palette_size`: 256
/// - `bits_per_channel`: 5 (a 32x32x32 histogram)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PopularityOptions {
    /// Maximum number of palette entries.
    pub palette_size: usize,
    /// Bits kept per channel by the pre-pass and histogram key.
    pub bits_per_channel: u8,
}

impl Default for PopularityOptions {
    fn default() -> Self {
        Self {
            palette_size: 256,
            bits_per_channel: 5,
        }
    }
}

impl PopularityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    pub fn bits_per_channel(mut self, bits: u8) -> Self {
        self.bits_per_channel = bits;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.palette_size == 0 {
            return Err(RasterError::InvalidParameter("palette_size must be at least 1"));
        }
        if !(1..=8).contains(&self.bits_per_channel) {
            return Err(RasterError::InvalidParameter(
                "bits_per_channel must be between 1 and 8",
            ));
        }
        Ok(())
    }
}

/// Quantize the image to at most `palette_size` colors, in place.
///
/// Buckets are chosen by descending count; equal counts go to the bucket
/// that comes first in (R, G, B) key order. Pixels map to the palette
/// entry at minimum Euclidean distance, the earliest entry winning ties.
/// Only populated buckets enter the palette, so small images get a
/// palette shorter than `palette_size`.
///
/// Returns the palette in selection order. Alpha is untouched.
pub fn quantize_popularity(
    image: &mut PixelBuffer,
    options: &PopularityOptions,
) -> Result<Vec<PaletteColor>> {
    options.validate()?;
    let shift = 8 - options.bits_per_channel;

    for pixel in image.pixels_mut() {
        for c in &mut pixel[..3] {
            *c = (*c >> shift) << shift;
        }
    }

    let histogram = build_histogram(image, shift);
    let palette = select_palette(&histogram, shift, options.palette_size);
    tracing::debug!(
        buckets = histogram.len(),
        palette = palette.len(),
        "Built popularity palette"
    );

    // The pre-pass leaves few distinct colors, so memoize the search.
    let mut nearest: HashMap<[u8; 3], [u8; 3]> = HashMap::new();
    for pixel in image.pixels_mut() {
        let rgb = [pixel[0], pixel[1], pixel[2]];
        let mapped = *nearest
            .entry(rgb)
            .or_insert_with(|| palette[nearest_index(&palette, rgb)].rgb());
        pixel[..3].copy_from_slice(&mapped);
    }

    Ok(palette)
}

/// Occurrence counts keyed by the truncated channel indices.
///
/// A `BTreeMap` iterates keys in ascending (R, G, B) order, which is the
/// tie-break order for palette selection.
fn build_histogram(image: &PixelBuffer, shift: u8) -> BTreeMap<[u8; 3], u32> {
    let mut histogram = BTreeMap::new();
    for pixel in image.pixels() {
        let key = [pixel[0] >> shift, pixel[1] >> shift, pixel[2] >> shift];
        *histogram.entry(key).or_insert(0) += 1;
    }
    histogram
}

fn select_palette(
    histogram: &BTreeMap<[u8; 3], u32>,
    shift: u8,
    palette_size: usize,
) -> Vec<PaletteColor> {
    let mut buckets: Vec<PaletteColor> = histogram
        .iter()
        .map(|(key, &count)| PaletteColor {
            r: key[0] << shift,
            g: key[1] << shift,
            b: key[2] << shift,
            count,
            selected: false,
        })
        .collect();

    // Stable sort keeps key order among equal counts.
    buckets.sort_by_key(|bucket| Reverse(bucket.count));
    buckets.truncate(palette_size);
    for bucket in &mut buckets {
        bucket.selected = true;
    }
    buckets
}

/// Index of the closest palette entry; the first one wins on ties.
fn nearest_index(palette: &[PaletteColor], rgb: [u8; 3]) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, entry) in palette.iter().enumerate() {
        let distance = squared_distance(rgb, entry.rgb());
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

#[inline]
fn squared_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}
