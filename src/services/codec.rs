//! Image file codecs.
//!
//! A codec moves pixels between a file and a [`PixelBuffer`] in the file's
//! own row order. [`load_image`] and [`save_image`] flip bottom-up codecs
//! exactly once, so the engine always sees the top row first.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use pixel_ops::PixelBuffer;

use crate::error::CodecError;

/// Order in which a file format stores its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    TopDown,
    BottomUp,
}

/// Reads and writes RGBA8 images in a file format's native row order.
pub trait ImageCodec {
    fn row_order(&self) -> RowOrder;

    /// Decode `path`, first stored row first.
    fn load(&self, path: &Path) -> Result<PixelBuffer, CodecError>;

    /// Encode `image` to `path`, its first row written as the first stored
    /// row.
    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<(), CodecError>;
}

/// Load an image, top row first.
pub fn load_image(codec: &dyn ImageCodec, path: &Path) -> Result<PixelBuffer, CodecError> {
    let image = codec.load(path)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(match codec.row_order() {
        RowOrder::TopDown => image,
        RowOrder::BottomUp => image.reverse_rows(),
    })
}

/// Save a top-row-first image.
pub fn save_image(
    codec: &dyn ImageCodec,
    path: &Path,
    image: &PixelBuffer,
) -> Result<(), CodecError> {
    match codec.row_order() {
        RowOrder::TopDown => codec.save(path, image)?,
        RowOrder::BottomUp => codec.save(path, &image.reverse_rows())?,
    }
    tracing::debug!(path = %path.display(), "Saved image");
    Ok(())
}

/// PNG files, decoded to 8-bit RGBA.
///
/// Palette, 16-bit and low bit depth images are normalized to 8 bits per
/// channel; gray and RGB images get an opaque alpha channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn row_order(&self) -> RowOrder {
        RowOrder::TopDown
    }

    fn load(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
        let file = File::open(path)?;
        let mut decoder = png::Decoder::new(BufReader::new(file));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;

        let (width, height) = (info.width as usize, info.height as usize);
        let pixels = width * height;
        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => buf[..pixels * 4].to_vec(),
            png::ColorType::Rgb => buf[..pixels * 3]
                .chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf[..pixels * 2]
                .chunks_exact(2)
                .flat_map(|c| [c[0], c[0], c[0], c[1]])
                .collect(),
            png::ColorType::Grayscale => buf[..pixels]
                .iter()
                .flat_map(|&g| [g, g, g, 255])
                .collect(),
            other => return Err(CodecError::UnsupportedColorType(other)),
        };

        Ok(PixelBuffer::from_rgba(width, height, rgba)?)
    }

    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<(), CodecError> {
        let (width, height) = image.dimensions();
        let unsupported = || CodecError::UnsupportedDimensions { width, height };
        let png_width = u32::try_from(width).map_err(|_| unsupported())?;
        let png_height = u32::try_from(height).map_err(|_| unsupported())?;

        let file = File::create(path)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), png_width, png_height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_bytes())?;
        writer.finish()?;
        Ok(())
    }
}
