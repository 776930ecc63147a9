//! One rendered halftone dot.

use std::sync::Arc;

use super::options::DotShape;
use crate::color::ChannelKey;

/// A single dot emitted for one grid cell of one channel.
///
/// `x` and `y` are in the rotated sampling frame: the cell's top-left
/// corner for squares, the corner offset by half the maximum dot size for
/// circles. Use
/// [`HalftoneLayer::placed_center`](crate::HalftoneLayer::placed_center) to
/// find where the dot lands on the original image.
#[derive(Debug, Clone, PartialEq)]
pub struct HalftoneShape {
    pub channel: ChannelKey,
    /// Grid column in the rotated frame
    pub column: u32,
    /// Grid row in the rotated frame
    pub row: u32,
    pub x: f64,
    pub y: f64,
    /// Radius for circles, side for squares
    pub size: f64,
    pub shape: DotShape,
    pub fill: Arc<str>,
}

impl HalftoneShape {
    /// Centre of the dot in the rotated frame.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        match self.shape {
            DotShape::Circle => (self.x, self.y),
            DotShape::Square => (self.x + self.size / 2.0, self.y + self.size / 2.0),
        }
    }
}
