//! Clustered-dot ordered dithering.

use crate::buffer::{luma, PixelBuffer};

use super::set_binary;

/// 4x4 clustered-dot threshold matrix, indexed `[y % 4][x % 4]`.
pub const CLUSTER_MATRIX: [[f64; 4]; 4] = [
    [0.7059, 0.3529, 0.5882, 0.2353],
    [0.0588, 0.9412, 0.8235, 0.4118],
    [0.4706, 0.7647, 0.8824, 0.1176],
    [0.1765, 0.5294, 0.2941, 0.6471],
];

/// White where normalized luma reaches the tiled matrix value.
pub fn dither_cluster(image: &mut PixelBuffer) {
    let width = image.width();
    for (i, pixel) in image.pixels_mut().enumerate() {
        let (x, y) = (i % width, i / width);
        let white = luma(pixel) / 255.0 >= CLUSTER_MATRIX[y % 4][x % 4];
        set_binary(pixel, white);
    }
}
