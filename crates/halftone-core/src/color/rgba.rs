//! RGBA pixel type
//!
//! The host hands the core a row-major buffer of 4 bytes per pixel. [`Rgba`]
//! is a typed view of one of those pixels.

/// One 8-bit RGBA pixel.
///
/// Alpha is informative only: a pixel with `a == 0` is treated as absent
/// and is excluded from every aggregate. Any other alpha value counts the
/// pixel at full weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0 = absent)
    pub a: u8,
}

impl Rgba {
    /// Fully transparent pixel, used for canvas areas with no source content.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a pixel from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Read a pixel from the first four bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than four bytes.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the pixel as `[R, G, B, A]`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether the pixel is absent (alpha 0).
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}
