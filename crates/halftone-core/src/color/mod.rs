//! Color types and the RGB to CMYK(+W) conversion
//!
//! This module provides the per-pixel color model used by the separation
//! pipeline.
//!
//! # Types
//!
//! - [`Rgba`]: One 8-bit pixel as stored in the host's decoded buffer.
//! - [`CmykSample`]: Fractional ink intensities derived from a pixel.
//! - [`ChannelKey`]: Stable identifier of an ink channel.
//!
//! # Example
//!
//! ```
//! use halftone_core::{convert_to_cmyk, ChannelKey, Rgba};
//!
//! let sample = convert_to_cmyk(Rgba::new(255, 0, 0, 255));
//! assert_eq!(sample.channel(ChannelKey::Magenta), 1.0);
//! assert_eq!(sample.channel(ChannelKey::Key), 0.0);
//! ```

mod cmyk;
mod key;
mod rgba;

pub use cmyk::{convert_to_cmyk, CmykSample};
pub use key::{ChannelKey, ParseChannelError};
pub use rgba::Rgba;
