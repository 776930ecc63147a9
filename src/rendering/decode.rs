//! PNG upload decoding into the RGBA8 buffer the core samples.

use std::io::Cursor;

use halftone_core::{HalftoneError, RasterImage};

use crate::error::RenderError;

/// Largest accepted upload, in pixels
pub const MAX_IMAGE_PIXELS: u64 = 64_000_000;

/// Decoded image with straight (non-premultiplied) RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Borrow the pixels as a core raster.
    pub fn raster(&self) -> Result<RasterImage<'_>, HalftoneError> {
        RasterImage::new(self.width, self.height, &self.rgba)
    }
}

/// Decode PNG bytes to RGBA8.
///
/// Palette, low bit depth and 16-bit images are normalized to 8-bit
/// channels; grey and RGB images get an opaque alpha channel.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width as u64 * height as u64 > MAX_IMAGE_PIXELS {
        return Err(RenderError::ImageTooLarge {
            width,
            height,
            max: MAX_IMAGE_PIXELS,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(width, height, color = ?frame.color_type, "Decoded PNG");

    Ok(DecodedImage {
        width,
        height,
        rgba,
    })
}
