//! No-clip rotation of a rectangular image.
//!
//! Rotating a `w x h` image by θ about its top-left corner sweeps some of it
//! into negative coordinates. [`solve_rotation`] returns the canvas size that
//! holds the whole rotated image and the translation that moves it inside
//! that canvas: drawing with `translate(origin) · rotate(θ)` at (0, 0) lands
//! every source pixel inside `0..bounding_width x 0..bounding_height`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Result of [`solve_rotation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSolution {
    /// Screen angle normalized to `0.0..360.0` degrees
    pub angle_degrees: f64,
    /// Width of the rotated image's bounding box
    pub bounding_width: f64,
    /// Height of the rotated image's bounding box
    pub bounding_height: f64,
    /// Horizontal translation applied before drawing the rotated image
    pub origin_x: f64,
    /// Vertical translation applied before drawing the rotated image
    pub origin_y: f64,
}

impl RotationSolution {
    /// Normalized angle in radians.
    #[inline]
    pub fn radians(&self) -> f64 {
        self.angle_degrees.to_radians()
    }

    /// Canvas size in whole pixels that holds the bounding box.
    ///
    /// Rounds up, but ignores float noise so a 90 degree rotation of a
    /// 100 x 50 image stays 50 x 100 instead of growing to 51 x 101.
    pub fn canvas_size(&self) -> (u32, u32) {
        (ceil_px(self.bounding_width), ceil_px(self.bounding_height))
    }
}

fn ceil_px(v: f64) -> u32 {
    (v - 1e-9).ceil().max(0.0) as u32
}

/// Normalize an angle in degrees into `0.0..360.0`.
///
/// Non-finite input normalizes to 0.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let norm = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if norm >= 360.0 {
        0.0
    } else {
        norm
    }
}

/// Size of the axis-aligned box around a `width x height` rectangle rotated
/// by `radians`.
#[inline]
pub fn projected_size(width: f64, height: f64, radians: f64) -> (f64, f64) {
    let (sin, cos) = radians.sin_cos();
    (
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}

/// Solve the bounding box and translation origin for a no-clip rotation.
///
/// `degrees` may be negative or larger than 360; it is normalized first, so
/// `solve_rotation(w, h, θ)` and `solve_rotation(w, h, θ + 360)` agree.
///
/// The origin is piecewise over eight octants. The octant boundaries sit at
/// `atan(w / h)` and its reflections across each quadrant; inside each
/// octant the anchor is the smaller or larger of the two projected edge
/// lengths, or the full bounding extent.
///
/// # Example
///
/// ```
/// use halftone_core::solve_rotation;
///
/// let r = solve_rotation(100.0, 50.0, 90.0);
/// assert!((r.bounding_width - 50.0).abs() < 1e-9);
/// assert!((r.bounding_height - 100.0).abs() < 1e-9);
/// assert!((r.origin_x - 50.0).abs() < 1e-9);
/// assert!(r.origin_y.abs() < 1e-9);
/// ```
pub fn solve_rotation(width: f64, height: f64, degrees: f64) -> RotationSolution {
    let angle_degrees = normalize_degrees(degrees);
    let rad = angle_degrees.to_radians();
    let (bounding_width, bounding_height) = projected_size(width, height, rad);

    let (sin, cos) = rad.sin_cos();
    let sin_height = height * sin.abs();
    let cos_height = height * cos.abs();
    let cos_width = width * cos.abs();
    let sin_width = width * sin.abs();

    let boundary = if height > 0.0 {
        (width / height).atan()
    } else {
        FRAC_PI_2
    };

    let (origin_x, origin_y) = if rad < boundary {
        (sin_height.min(cos_width), 0.0)
    } else if rad < FRAC_PI_2 {
        (sin_height.max(cos_width), 0.0)
    } else if rad < FRAC_PI_2 + boundary {
        (bounding_width, cos_height.min(sin_width))
    } else if rad < PI {
        (bounding_width, cos_height.max(sin_width))
    } else if rad < PI + boundary {
        (sin_height.max(cos_width), bounding_height)
    } else if rad < 3.0 * FRAC_PI_2 {
        (sin_height.min(cos_width), bounding_height)
    } else if rad < 3.0 * FRAC_PI_2 + boundary {
        (0.0, cos_height.max(sin_width))
    } else if rad < TAU {
        (0.0, cos_height.min(sin_width))
    } else {
        (0.0, 0.0)
    };

    RotationSolution {
        angle_degrees,
        bounding_width,
        bounding_height,
        origin_x,
        origin_y,
    }
}
