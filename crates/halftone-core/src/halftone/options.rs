//! Sampling grid and dot sizing options.
//!
//! [`LayerOptions`] controls how a channel's rotated raster is walked and
//! how block averages turn into dots.
//!
//! # Defaults
//!
//! - Cell size: 10 px
//! - Shape: circle
//! - Maximum dot size: half a cell for circles (a radius), a full cell for
//!   squares (a side)
//! - Minimum dot size: 0 (only empty cells are dropped)
//!
//! # Example
//!
//! ```
//! use halftone_core::{DotShape, LayerOptions, SampleGrid};
//!
//! let options = LayerOptions::new(SampleGrid::new(8, DotShape::Square))
//!     .min_dot_size(0.5);
//! assert_eq!(options.effective_max_dot_size(), 8.0);
//! ```

use crate::api::{require_non_negative, require_positive, ConfigurationError};

/// Dot primitive emitted per grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotShape {
    /// Circle; size is its radius
    #[default]
    Circle,
    /// Axis-aligned square in the rotated frame; size is its side
    Square,
}

/// Square sampling grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    /// Cell edge length in pixels (must be at least 1)
    pub cell_size: u32,
    /// Dot primitive
    pub shape: DotShape,
}

impl SampleGrid {
    #[inline]
    pub fn new(cell_size: u32, shape: DotShape) -> Self {
        Self { cell_size, shape }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cell_size == 0 {
            return Err(ConfigurationError::NonPositive {
                parameter: "cell_size",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::new(10, DotShape::Circle)
    }
}

/// Options for turning one channel into a halftone layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerOptions {
    /// Sampling grid
    pub grid: SampleGrid,
    /// Dot size for a fully saturated cell (None = derive from the grid)
    pub max_dot_size: Option<f64>,
    /// Dots at or below this size are dropped rather than drawn
    pub min_dot_size: f64,
}

impl LayerOptions {
    #[inline]
    pub fn new(grid: SampleGrid) -> Self {
        Self {
            grid,
            max_dot_size: None,
            min_dot_size: 0.0,
        }
    }

    #[inline]
    pub fn max_dot_size(mut self, size: f64) -> Self {
        self.max_dot_size = Some(size);
        self
    }

    #[inline]
    pub fn min_dot_size(mut self, size: f64) -> Self {
        self.min_dot_size = size;
        self
    }

    /// Maximum dot size after applying the per-shape default.
    pub fn effective_max_dot_size(&self) -> f64 {
        self.max_dot_size.unwrap_or(match self.grid.shape {
            DotShape::Circle => self.grid.cell_size as f64 / 2.0,
            DotShape::Square => self.grid.cell_size as f64,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.grid.validate()?;
        if let Some(max) = self.max_dot_size {
            require_positive("max_dot_size", max)?;
        }
        require_non_negative("min_dot_size", self.min_dot_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = LayerOptions::default();
        assert_eq!(opts.grid.cell_size, 10);
        assert_eq!(opts.grid.shape, DotShape::Circle);
        assert_eq!(opts.max_dot_size, None);
        assert_eq!(opts.min_dot_size, 0.0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_effective_max_dot_size_per_shape() {
        let circle = LayerOptions::new(SampleGrid::new(10, DotShape::Circle));
        assert_eq!(circle.effective_max_dot_size(), 5.0);

        let square = LayerOptions::new(SampleGrid::new(10, DotShape::Square));
        assert_eq!(square.effective_max_dot_size(), 10.0);

        let explicit = square.max_dot_size(7.5);
        assert_eq!(explicit.effective_max_dot_size(), 7.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_cell = LayerOptions::new(SampleGrid::new(0, DotShape::Circle));
        assert_eq!(
            zero_cell.validate(),
            Err(ConfigurationError::NonPositive {
                parameter: "cell_size",
                value: 0.0
            })
        );

        let bad_max = LayerOptions::default().max_dot_size(0.0);
        assert!(matches!(
            bad_max.validate(),
            Err(ConfigurationError::NonPositive {
                parameter: "max_dot_size",
                ..
            })
        ));

        let bad_min = LayerOptions::default().min_dot_size(-1.0);
        assert!(matches!(
            bad_min.validate(),
            Err(ConfigurationError::Negative {
                parameter: "min_dot_size",
                ..
            })
        ));

        let nan_min = LayerOptions::default().min_dot_size(f64::NAN);
        assert_eq!(
            nan_min.validate(),
            Err(ConfigurationError::NonFinite {
                parameter: "min_dot_size"
            })
        );
    }
}
