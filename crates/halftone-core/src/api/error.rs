//! Error types for the halftone-core public API.
//!
//! Every failure is detected before any sampling starts and names the
//! offending parameter and the bound it violated. The one arithmetic
//! degeneracy in the pipeline (pure black in the CMYK conversion) is
//! recovered locally and never surfaces here.

use std::fmt;

/// Axis of a two-dimensional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Invalid configuration value.
///
/// Never clamped or corrected: the caller gets the parameter name and the
/// violated bound back and must fix its input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Value must be strictly positive
    NonPositive {
        /// Parameter name
        parameter: &'static str,
        /// Offending value
        value: f64,
    },
    /// Value must not be negative
    Negative {
        /// Parameter name
        parameter: &'static str,
        /// Offending value
        value: f64,
    },
    /// Value is NaN or infinite
    NonFinite {
        /// Parameter name
        parameter: &'static str,
    },
    /// Overlap leaves no printable stride on one axis
    OverlapTooLarge {
        axis: Axis,
        overlap: f64,
        printable: f64,
    },
    /// Printable area is larger than the media it is printed on
    PrintableExceedsMedia {
        axis: Axis,
        printable: f64,
        media: f64,
    },
    /// Pixel buffer length does not match `width * height * 4`
    BufferLength { expected: usize, actual: usize },
    /// Channel set is empty
    NoChannels,
    /// The same channel id appears twice in a channel set
    DuplicateChannel { id: String },
    /// Channel id is empty or uses characters outside `[A-Za-z0-9_-]`
    InvalidChannelId { id: String },
    /// The tile layout would need more panels than [`MAX_TILES`](crate::tile::MAX_TILES)
    TooManyTiles { columns: f64, rows: f64, max: usize },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositive { parameter, value } => {
                write!(f, "{} must be greater than 0 (got {})", parameter, value)
            }
            ConfigurationError::Negative { parameter, value } => {
                write!(f, "{} must not be negative (got {})", parameter, value)
            }
            ConfigurationError::NonFinite { parameter } => {
                write!(f, "{} must be a finite number", parameter)
            }
            ConfigurationError::OverlapTooLarge {
                axis,
                overlap,
                printable,
            } => write!(
                f,
                "{} overlap {} must be smaller than the printable size {}",
                axis, overlap, printable
            ),
            ConfigurationError::PrintableExceedsMedia {
                axis,
                printable,
                media,
            } => write!(
                f,
                "{} printable size {} exceeds the media size {}",
                axis, printable, media
            ),
            ConfigurationError::BufferLength { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {} (width * height * 4)",
                actual, expected
            ),
            ConfigurationError::NoChannels => write!(f, "channel set cannot be empty"),
            ConfigurationError::DuplicateChannel { id } => {
                write!(f, "channel '{}' appears more than once", id)
            }
            ConfigurationError::InvalidChannelId { id } => write!(
                f,
                "channel id '{}' must be non-empty and use only letters, digits, '-' and '_'",
                id
            ),
            ConfigurationError::TooManyTiles { columns, rows, max } => write!(
                f,
                "tile layout of {} x {} exceeds the limit of {} tiles (scale too small for the printable size)",
                columns, rows, max
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// The image has nothing to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateGeometryError {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl fmt::Display for DegenerateGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "image has no area to sample ({}x{})",
            self.width, self.height
        )
    }
}

impl std::error::Error for DegenerateGeometryError {}

/// Unified error type for the halftone-core public API.
///
/// # Example
///
/// ```
/// use halftone_core::{HalftoneError, PrintGeometry};
///
/// fn check() -> Result<(), HalftoneError> {
///     PrintGeometry::new(210.0, 297.0, 200.0, 280.0, 10.0).validate()?;
///     Ok(())
/// }
/// assert!(check().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum HalftoneError {
    /// Invalid configuration value
    Configuration(ConfigurationError),
    /// Image with zero width or height
    DegenerateGeometry(DegenerateGeometryError),
}

impl fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalftoneError::Configuration(err) => write!(f, "configuration error: {}", err),
            HalftoneError::DegenerateGeometry(err) => write!(f, "degenerate geometry: {}", err),
        }
    }
}

impl std::error::Error for HalftoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalftoneError::Configuration(err) => Some(err),
            HalftoneError::DegenerateGeometry(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for HalftoneError {
    fn from(err: ConfigurationError) -> Self {
        HalftoneError::Configuration(err)
    }
}

impl From<DegenerateGeometryError> for HalftoneError {
    fn from(err: DegenerateGeometryError) -> Self {
        HalftoneError::DegenerateGeometry(err)
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::NonFinite { parameter });
    }
    if value <= 0.0 {
        return Err(ConfigurationError::NonPositive { parameter, value });
    }
    Ok(())
}

/// Check that `value` is finite and not negative.
pub(crate) fn require_non_negative(
    parameter: &'static str,
    value: f64,
) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::NonFinite { parameter });
    }
    if value < 0.0 {
        return Err(ConfigurationError::Negative { parameter, value });
    }
    Ok(())
}
