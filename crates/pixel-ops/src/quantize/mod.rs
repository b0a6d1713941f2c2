//! Color reduction.
//!
//! - [`quantize_uniform`]: fixed 3-3-2 bit truncation (8 red, 8 green,
//!   4 blue levels).
//! - [`quantize_popularity`]: histogram palette of the most frequent
//!   colors, then nearest-color mapping.

mod popularity;
mod uniform;

pub use popularity::{quantize_popularity, PaletteColor, PopularityOptions};
pub use uniform::{quantize_uniform, truncate_uniform, UNIFORM_MASK};
