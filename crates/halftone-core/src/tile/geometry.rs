//! Physical print geometry and pixel scale.

use crate::api::{require_non_negative, require_positive, Axis, ConfigurationError};

/// Media and printable area of the output device, in physical units.
///
/// Units are whatever the caller uses consistently (the host uses
/// millimetres); only ratios against [`Scale`] matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintGeometry {
    pub media_width: f64,
    pub media_height: f64,
    pub printable_width: f64,
    pub printable_height: f64,
    /// Margin shared by adjacent tiles on both axes
    pub overlap: f64,
}

impl PrintGeometry {
    pub fn new(
        media_width: f64,
        media_height: f64,
        printable_width: f64,
        printable_height: f64,
        overlap: f64,
    ) -> Self {
        Self {
            media_width,
            media_height,
            printable_width,
            printable_height,
            overlap,
        }
    }

    /// Printable area equal to the media, for devices without margins.
    pub fn borderless(width: f64, height: f64, overlap: f64) -> Self {
        Self::new(width, height, width, height, overlap)
    }

    /// Check every bound a tiling depends on.
    ///
    /// # Errors
    ///
    /// - Any dimension not finite and positive, or a negative overlap
    /// - Printable area larger than the media on either axis
    /// - Overlap not strictly smaller than the printable size on either axis
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        require_positive("media_width", self.media_width)?;
        require_positive("media_height", self.media_height)?;
        require_positive("printable_width", self.printable_width)?;
        require_positive("printable_height", self.printable_height)?;
        require_non_negative("overlap", self.overlap)?;

        for (axis, printable, media) in [
            (Axis::Horizontal, self.printable_width, self.media_width),
            (Axis::Vertical, self.printable_height, self.media_height),
        ] {
            if printable > media {
                return Err(ConfigurationError::PrintableExceedsMedia {
                    axis,
                    printable,
                    media,
                });
            }
            if printable - self.overlap <= 0.0 {
                return Err(ConfigurationError::OverlapTooLarge {
                    axis,
                    overlap: self.overlap,
                    printable,
                });
            }
        }
        Ok(())
    }

    /// Printable size minus the overlap, per axis.
    #[inline]
    pub fn effective_printable(&self) -> (f64, f64) {
        (
            self.printable_width - self.overlap,
            self.printable_height - self.overlap,
        )
    }
}

/// US letter with the margins of a typical desktop printer, in mm.
impl Default for PrintGeometry {
    fn default() -> Self {
        Self::new(215.9, 279.4, 186.33, 237.0, 10.0)
    }
}

/// Pixels per physical unit on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn uniform(pixels_per_unit: f64) -> Self {
        Self::new(pixels_per_unit, pixels_per_unit)
    }

    /// Scale at which an image `image_width_px` wide prints
    /// `target_width` units wide. Aspect ratio is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when either input is not finite and
    /// positive.
    pub fn from_target_width(
        image_width_px: u32,
        target_width: f64,
    ) -> Result<Self, ConfigurationError> {
        require_positive("image_width", image_width_px as f64)?;
        require_positive("target_width", target_width)?;
        Ok(Self::uniform(image_width_px as f64 / target_width))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        require_positive("scale_x", self.x)?;
        require_positive("scale_y", self.y)?;
        Ok(())
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
