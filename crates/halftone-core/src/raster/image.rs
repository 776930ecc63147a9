//! Borrowed RGBA raster.

use crate::api::{ConfigurationError, DegenerateGeometryError, HalftoneError};
use crate::color::Rgba;

/// Read-only view of a decoded RGBA image owned by the host.
///
/// 4 bytes per pixel, row-major, top-left origin. The core never mutates
/// the buffer.
#[derive(Clone, Copy, Debug)]
pub struct RasterImage<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> RasterImage<'a> {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`DegenerateGeometryError`] when `width` or `height` is zero.
    /// - [`ConfigurationError::BufferLength`] when `data` is not exactly
    ///   `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, HalftoneError> {
        if width == 0 || height == 0 {
            return Err(DegenerateGeometryError { width, height }.into());
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ConfigurationError::BufferLength {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some(Rgba::from_slice(&self.data[idx..idx + 4]))
    }
}
