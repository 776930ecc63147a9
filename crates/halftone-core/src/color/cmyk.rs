//! CMYK(+W) sample and the RGB conversion.

use super::key::ChannelKey;
use super::rgba::Rgba;

/// Fractional ink intensities for one pixel or one averaged block.
///
/// Every component is in `0.0..=1.0`. `w` is the complement of `k`, so
/// `k + w == 1.0` holds exactly for converted pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CmykSample {
    /// Cyan intensity
    pub c: f64,
    /// Magenta intensity
    pub m: f64,
    /// Yellow intensity
    pub y: f64,
    /// Key (black) intensity
    pub k: f64,
    /// White intensity
    pub w: f64,
}

impl CmykSample {
    /// Returns the intensity of one channel.
    #[inline]
    pub fn channel(&self, key: ChannelKey) -> f64 {
        match key {
            ChannelKey::Cyan => self.c,
            ChannelKey::Magenta => self.m,
            ChannelKey::Yellow => self.y,
            ChannelKey::Key => self.k,
            ChannelKey::White => self.w,
        }
    }
}

/// Convert one RGBA pixel to a CMYK(+W) sample.
///
/// ```text
/// k = 1 - max(r, g, b) / 255
/// c = (1 - r/255 - k) / (1 - k)      (m, y likewise)
/// w = 1 - k
/// ```
///
/// Pure black (`k == 1`) would divide by zero; c, m and y are defined as 0
/// there instead of NaN. Alpha is ignored here: callers that aggregate
/// pixels skip transparent ones before converting.
///
/// # Example
///
/// ```
/// use halftone_core::{convert_to_cmyk, Rgba};
///
/// let black = convert_to_cmyk(Rgba::opaque(0, 0, 0));
/// assert_eq!((black.c, black.m, black.y, black.k, black.w), (0.0, 0.0, 0.0, 1.0, 0.0));
/// ```
pub fn convert_to_cmyk(pixel: Rgba) -> CmykSample {
    let r = pixel.r as f64 / 255.0;
    let g = pixel.g as f64 / 255.0;
    let b = pixel.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let k = 1.0 - max;
    let w = max;

    // max == 0 exactly when k == 1
    if max == 0.0 {
        return CmykSample {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 1.0,
            w: 0.0,
        };
    }

    let ink = |ratio: f64| ((1.0 - ratio - k) / max).clamp(0.0, 1.0);

    CmykSample {
        c: ink(r),
        m: ink(g),
        y: ink(b),
        k,
        w,
    }
}
