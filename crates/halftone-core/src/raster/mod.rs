//! Raster access
//!
//! - [`RasterImage`]: borrowed view of the host's decoded RGBA buffer.
//! - [`sample_block`]: mean channel intensity over one grid cell.
//! - [`rotate_raster`]: resample an image onto a rotated, no-clip canvas.

mod image;
mod rotate;
mod sample;

pub use image::RasterImage;
pub use rotate::{rotate_raster, RotatedRaster};
pub use sample::sample_block;
