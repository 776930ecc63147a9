//! Print tile partitioning
//!
//! Splits full-image halftone layers into overlapping panels sized to a
//! physical printable area, so a large print can be assembled from sheets.

mod geometry;
mod partition;

pub use geometry::{PrintGeometry, Scale};
pub use partition::{partition_tiles, plan_tiles, Tile, TileGrid, TileLayer, MAX_TILES};
