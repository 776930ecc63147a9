//! Placement transform between the rotated sampling frame and image space.

use super::rotation::RotationSolution;

/// Maps rotated-frame points back into the un-rotated image frame.
///
/// Equivalent to the SVG transform `rotate(-θ) translate(-ox, -oy)`:
/// `p_image = R(-θ) · (p_rotated - origin)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    sin: f64,
    cos: f64,
    origin_x: f64,
    origin_y: f64,
}

impl Transform2d {
    /// Inverse placement transform for a solved rotation.
    pub fn inverse_of(rotation: &RotationSolution) -> Self {
        let (sin, cos) = rotation.radians().sin_cos();
        Self {
            sin,
            cos,
            origin_x: rotation.origin_x,
            origin_y: rotation.origin_y,
        }
    }

    /// Map a rotated-frame point into image space.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.origin_x;
        let dy = y - self.origin_y;
        (
            dx * self.cos + dy * self.sin,
            -dx * self.sin + dy * self.cos,
        )
    }

    /// Map an image-space point into the rotated frame.
    #[inline]
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.cos - y * self.sin + self.origin_x,
            x * self.sin + y * self.cos + self.origin_y,
        )
    }

    /// Half-extent of the axis-aligned box around a square of side `side`
    /// after it is placed into image space.
    #[inline]
    pub fn square_half_extent(&self, side: f64) -> f64 {
        side / 2.0 * (self.cos.abs() + self.sin.abs())
    }
}
