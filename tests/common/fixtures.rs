//! Test images and config snippets.

use std::path::Path;

use imgops::{save_image, PngCodec};
use pixel_ops::PixelBuffer;

/// Horizontal red ramp over a vertical green ramp, opaque.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let data: Vec<u8> = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]
            })
        })
        .collect();
    PixelBuffer::from_rgba(width, height, data).expect("valid gradient")
}

/// One row per color, `rows` rows tall; row `y` is filled with `[y * 10, 0, 0, 255]`.
pub fn striped_rows(width: usize, rows: usize) -> PixelBuffer {
    let data: Vec<u8> = (0..rows)
        .flat_map(|y| (0..width).flat_map(move |_| [(y * 10) as u8, 0, 0, 255]))
        .collect();
    PixelBuffer::from_rgba(width, rows, data).expect("valid stripes")
}

/// Write `image` as a PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, image: &PixelBuffer) -> std::path::PathBuf {
    let path = dir.join(name);
    save_image(&PngCodec, &path, image).expect("write fixture png");
    path
}

/// Pipeline that exercises every step kind that needs no operand.
pub const ALL_UNARY_STEPS: &str = r#"
seed: 3
steps:
  - op: grayscale
  - op: quant_uniform
  - op: quant_populosity
  - op: filter_box
  - op: filter_bartlett
  - op: filter_gaussian
  - op: filter_gaussian_n
    size: 5
  - op: filter_edge
  - op: filter_enhance
  - op: dither_color
  - op: dither_threshold
  - op: dither_random
  - op: dither_fs
  - op: dither_bright
  - op: dither_cluster
  - op: half_size
"#;
