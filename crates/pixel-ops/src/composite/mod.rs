//! Binary operators between two equally sized buffers.
//!
//! The buffer that is mutated is the top layer (A); the operand is the
//! bottom layer (B). Porter-Duff operators treat both as premultiplied
//! RGBA, normalized to `[0, 1]`, and round the result back to bytes.

use serde::Deserialize;

use crate::buffer::{unpremultiply, PixelBuffer, ALPHA, CHANNELS};
use crate::error::Result;

/// Porter-Duff operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    /// A over B.
    Over,
    /// A where B is.
    In,
    /// A where B is not.
    Out,
    /// A over B, clipped to B.
    Atop,
    /// A and B where the other is not.
    Xor,
}

impl CompositeOp {
    /// Fractions `(fa, fb)` of A and B that survive, given both alphas.
    ///
    /// Every operator is `C = Ca*fa + Cb*fb` and `α = αa*fa + αb*fb`.
    fn factors(self, alpha_a: f64, alpha_b: f64) -> (f64, f64) {
        match self {
            CompositeOp::Over => (1.0, 1.0 - alpha_a),
            CompositeOp::In => (alpha_b, 0.0),
            CompositeOp::Out => (1.0 - alpha_b, 0.0),
            CompositeOp::Atop => (alpha_b, 1.0 - alpha_a),
            CompositeOp::Xor => (1.0 - alpha_b, 1.0 - alpha_a),
        }
    }
}

/// Composite `top` with `bottom` in place, writing into `top`.
///
/// Fails with `DimensionMismatch` before touching either buffer when the
/// sizes differ.
pub fn composite(top: &mut PixelBuffer, bottom: &PixelBuffer, op: CompositeOp) -> Result<()> {
    top.ensure_same_size(bottom)?;
    tracing::debug!(?op, width = top.width(), height = top.height(), "Compositing");

    for (a, b) in top.pixels_mut().zip(bottom.pixels()) {
        let alpha_a = normalize(a[ALPHA]);
        let alpha_b = normalize(b[ALPHA]);
        let (fa, fb) = op.factors(alpha_a, alpha_b);

        for c in 0..CHANNELS {
            let value = normalize(a[c]) * fa + normalize(b[c]) * fb;
            a[c] = denormalize(value);
        }
    }
    Ok(())
}

/// Per-channel absolute difference of the unpremultiplied colors.
///
/// The result is opaque everywhere. Fails with `DimensionMismatch` when
/// the sizes differ.
pub fn difference(image: &mut PixelBuffer, other: &PixelBuffer) -> Result<()> {
    image.ensure_same_size(other)?;

    for (a, b) in image.pixels_mut().zip(other.pixels()) {
        let rgb_a = unpremultiply(a);
        let rgb_b = unpremultiply(b);
        for c in 0..3 {
            a[c] = rgb_a[c].abs_diff(rgb_b[c]);
        }
        a[ALPHA] = 255;
    }
    Ok(())
}

#[inline]
fn normalize(byte: u8) -> f64 {
    byte as f64 / 255.0
}

#[inline]
fn denormalize(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use pretty_assertions::assert_eq;

    fn pair(a: [u8; 4], b: [u8; 4], op: CompositeOp) -> [u8; 4] {
        let mut top = PixelBuffer::filled(1, 1, a).unwrap();
        let bottom = PixelBuffer::filled(1, 1, b).unwrap();
        composite(&mut top, &bottom, op).unwrap();
        top.pixel(0, 0).unwrap()
    }

    fn gradient(width: usize, height: usize, alpha: u8) -> PixelBuffer {
        let data: Vec<u8> = (0..width * height)
            .flat_map(|i| {
                let v = (i * 37 % 256) as u8;
                // Premultiplied: no channel exceeds alpha.
                [v.min(alpha), (255 - v).min(alpha), (v / 3).min(alpha), alpha]
            })
            .collect();
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_over_opaque_top_is_identity() {
        let original = gradient(5, 4, 255);
        let bottom = gradient(5, 4, 128);
        let mut top = original.clone();
        composite(&mut top, &bottom, CompositeOp::Over).unwrap();
        assert_eq!(top, original);
    }

    #[test]
    fn test_over_transparent_top_shows_bottom() {
        assert_eq!(
            pair([0, 0, 0, 0], [10, 20, 30, 200], CompositeOp::Over),
            [10, 20, 30, 200]
        );
    }

    #[test]
    fn test_over_half_alpha() {
        // 0.5 of red over opaque blue: blue keeps 1 - 128/255 of itself.
        assert_eq!(
            pair([128, 0, 0, 128], [0, 0, 255, 255], CompositeOp::Over),
            [128, 0, 127, 255]
        );
    }

    #[test]
    fn test_in_and_out_split_top() {
        let a = [200, 100, 50, 255];
        let b = [0, 0, 0, 0];
        assert_eq!(pair(a, b, CompositeOp::In), [0, 0, 0, 0]);
        assert_eq!(pair(a, b, CompositeOp::Out), a);

        let opaque = [9, 9, 9, 255];
        assert_eq!(pair(a, opaque, CompositeOp::In), a);
        assert_eq!(pair(a, opaque, CompositeOp::Out), [0, 0, 0, 0]);
    }

    #[test]
    fn test_atop_keeps_bottom_alpha() {
        assert_eq!(
            pair([200, 100, 50, 255], [10, 20, 30, 0], CompositeOp::Atop),
            [0, 0, 0, 0]
        );
        assert_eq!(
            pair([0, 0, 0, 0], [10, 20, 30, 40], CompositeOp::Atop),
            [10, 20, 30, 40]
        );
        assert_eq!(
            pair([200, 100, 50, 255], [10, 20, 30, 255], CompositeOp::Atop),
            [200, 100, 50, 255]
        );
    }

    #[test]
    fn test_xor_opaque_layers_cancel() {
        assert_eq!(
            pair([200, 100, 50, 255], [10, 20, 30, 255], CompositeOp::Xor),
            [0, 0, 0, 0]
        );
        assert_eq!(
            pair([200, 100, 50, 255], [10, 20, 30, 0], CompositeOp::Xor),
            [200, 100, 50, 255]
        );
    }

    #[test]
    fn test_mismatch_leaves_both_untouched() {
        let mut top = gradient(3, 3, 255);
        let bottom = gradient(4, 3, 255);
        let before = top.clone();
        assert_eq!(
            composite(&mut top, &bottom, CompositeOp::Over),
            Err(RasterError::DimensionMismatch {
                expected: (3, 3),
                actual: (4, 3),
            })
        );
        assert!(difference(&mut top, &bottom).is_err());
        assert_eq!(top, before);
    }

    #[test]
    fn test_difference_with_self_is_opaque_black() {
        let image = gradient(6, 5, 90);
        let mut diff = image.clone();
        difference(&mut diff, &image).unwrap();
        assert!(diff.pixels().all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_difference_unpremultiplies() {
        // (50, 50, 50, 127) unpremultiplies to floor(50 * 255 / 127) = 100.
        let mut a = PixelBuffer::filled(1, 1, [50, 50, 50, 127]).unwrap();
        let b = PixelBuffer::filled(1, 1, [30, 200, 100, 255]).unwrap();
        difference(&mut a, &b).unwrap();
        assert_eq!(a.pixel(0, 0).unwrap(), [70, 100, 0, 255]);
    }

    #[test]
    fn test_op_deserializes_from_snake_case() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let de: StrDeserializer<'_, Error> = "atop".into_deserializer();
        assert_eq!(CompositeOp::deserialize(de).unwrap(), CompositeOp::Atop);
    }
}
