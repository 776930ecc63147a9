//! halftone-core: halftone color separation and print tile partitioning
//!
//! This library turns an RGBA raster into per-ink halftone dot layers
//! sampled on rotated screens, and splits those layers into overlapping
//! panels sized for a physical printer.
//!
//! # Quick Start
//!
//! The [`Separator`] builder is the primary entry point:
//!
//! ```
//! use halftone_core::{ChannelSet, PrintGeometry, RasterImage, Scale, Separator};
//!
//! let pixels = [30u8, 90, 160, 255].repeat(120 * 80);
//! let image = RasterImage::new(120, 80, &pixels).unwrap();
//!
//! let separation = Separator::new(ChannelSet::standard()).separate(&image).unwrap();
//! let tiles = separation
//!     .partition(&PrintGeometry::borderless(60.0, 60.0, 10.0), Scale::uniform(1.0))
//!     .unwrap();
//!
//! assert_eq!(separation.layers.len(), 4);
//! assert_eq!(tiles.len(), 3 * 2);
//! ```
//!
//! # Pipeline
//!
//! 1. [`convert_to_cmyk`]: per-pixel ink fractions, plus a white channel
//!    that is the complement of black.
//! 2. [`solve_rotation`]: bounding box and origin of the image rotated to
//!    a channel's screen angle, so no corner is clipped.
//! 3. [`generate_layer`]: resample onto the rotated canvas, average each
//!    grid cell with [`sample_block`] and emit one dot per cell.
//! 4. [`partition_tiles`]: place every dot back in image space and assign
//!    it to each tile it overlaps.
//!
//! Rotation is solved before sampling and stored on the layer; a renderer
//! places a layer's dots with `rotate(-θ) translate(-origin)`.
//!
//! # Coordinates
//!
//! - Dots are in the rotated sampling frame of their layer.
//! - Tiles and [`HalftoneLayer::placed_bounds`] are in image pixels.
//! - [`PrintGeometry`] is in physical units; [`Scale`] converts to pixels.
//!
//! # Errors
//!
//! Configuration is checked before any pixel is read. Invalid values are
//! reported, never clamped, as [`ConfigurationError`] naming the parameter
//! and the bound. An image with no area is a [`DegenerateGeometryError`].
//! Pure black in the color conversion is not an error: its ink fractions
//! are defined as zero.
//!
//! # Parallelism
//!
//! Grid rows, channels and tiles run on the rayon thread pool. Results are
//! gathered in a fixed order, so output is identical across runs.

pub mod api;
pub mod channel;
pub mod color;
pub mod geometry;
pub mod halftone;
pub mod raster;
pub mod tile;


pub use api::{
    Axis, ConfigurationError, DegenerateGeometryError, HalftoneError, Separation, Separator,
};
pub use channel::{ChannelSet, InkChannel, SkipRule};
pub use color::{convert_to_cmyk, ChannelKey, CmykSample, ParseChannelError, Rgba};
pub use geometry::{solve_rotation, Rect, RotationSolution, Transform2d};
pub use halftone::{
    generate_layer, generate_layers, DotShape, HalftoneLayer, HalftoneShape, LayerOptions,
    SampleGrid,
};
pub use raster::{rotate_raster, sample_block, RasterImage, RotatedRaster};
pub use tile::{
    partition_tiles, plan_tiles, PrintGeometry, Scale, Tile, TileGrid, TileLayer, MAX_TILES,
};
