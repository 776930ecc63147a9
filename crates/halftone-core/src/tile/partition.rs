//! Tile planning and shape partitioning.
//!
//! Tiles are full printable-size panels placed at a stride shortened by
//! the overlap, so adjacent panels share exactly `overlap * scale` pixels:
//!
//! ```text
//! origin(i) = i * printable_px - i * overlap_px
//! ```
//!
//! Shapes are filtered, never cut: a dot whose placed bounds overlap a tile
//! is kept whole, so dots near a seam appear on both neighbouring tiles.

use std::sync::Arc;

use rayon::prelude::*;

use super::geometry::{PrintGeometry, Scale};
use crate::api::{ConfigurationError, DegenerateGeometryError, HalftoneError};
use crate::color::ChannelKey;
use crate::geometry::{Rect, RotationSolution};
use crate::halftone::{placed_bounds_with, HalftoneLayer, HalftoneShape};

/// Largest number of tiles a layout may have.
pub const MAX_TILES: usize = 10_000;

/// Tile layout for one image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
    /// Full printable width of one tile
    pub tile_width_px: f64,
    pub tile_height_px: f64,
    /// Distance between the origins of adjacent tiles
    pub stride_x_px: f64,
    pub stride_y_px: f64,
    pub overlap_x_px: f64,
    pub overlap_y_px: f64,
}

impl TileGrid {
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Pixel rectangle of tile `(column, row)`.
    pub fn bounds(&self, column: u32, row: u32) -> Rect {
        let x = column as f64 * self.tile_width_px - column as f64 * self.overlap_x_px;
        let y = row as f64 * self.tile_height_px - row as f64 * self.overlap_y_px;
        Rect::new(x, y, self.tile_width_px, self.tile_height_px)
    }

    /// Tile indices in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |column| (column, row)))
    }
}

/// Shapes of one channel that fall on one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub id: Arc<str>,
    pub channel: ChannelKey,
    pub fill: Arc<str>,
    /// Rotation of the source layer, needed to place the shapes
    pub rotation: RotationSolution,
    pub shapes: Vec<HalftoneShape>,
}

/// One printable panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub column: u32,
    pub row: u32,
    /// Pixel rectangle in image space
    pub bounds: Rect,
    /// One entry per input layer, in layer order
    pub layers: Vec<TileLayer>,
}

impl Tile {
    /// Total number of shapes across all channels.
    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(|l| l.shapes.len()).sum()
    }

    /// Layer with the given channel id.
    pub fn layer(&self, id: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| &*l.id == id)
    }
}

/// Compute the tile layout for an image.
///
/// `columns = ceil(image_w / ((printable_w - overlap) * scale.x))`, and
/// likewise for rows.
///
/// # Errors
///
/// - [`HalftoneError::DegenerateGeometry`] if either image dimension is 0
/// - [`HalftoneError::Configuration`] if the geometry or scale is invalid,
///   or if the layout would need more than [`MAX_TILES`] tiles
pub fn plan_tiles(
    image_width: u32,
    image_height: u32,
    geometry: &PrintGeometry,
    scale: Scale,
) -> Result<TileGrid, HalftoneError> {
    geometry.validate()?;
    scale.validate()?;
    if image_width == 0 || image_height == 0 {
        return Err(DegenerateGeometryError {
            width: image_width,
            height: image_height,
        }
        .into());
    }

    let (effective_w, effective_h) = geometry.effective_printable();
    let stride_x_px = effective_w * scale.x;
    let stride_y_px = effective_h * scale.y;

    let columns = count_along(image_width, stride_x_px);
    let rows = count_along(image_height, stride_y_px);
    // counts are infinite if the stride underflowed to 0
    if columns * rows > MAX_TILES as f64 {
        return Err(ConfigurationError::TooManyTiles {
            columns,
            rows,
            max: MAX_TILES,
        }
        .into());
    }

    Ok(TileGrid {
        columns: columns as u32,
        rows: rows as u32,
        tile_width_px: geometry.printable_width * scale.x,
        tile_height_px: geometry.printable_height * scale.y,
        stride_x_px,
        stride_y_px,
        overlap_x_px: geometry.overlap * scale.x,
        overlap_y_px: geometry.overlap * scale.y,
    })
}

fn count_along(image_px: u32, stride_px: f64) -> f64 {
    (image_px as f64 / stride_px).ceil().max(1.0)
}

/// Split full-image layers into printable tiles.
///
/// Tiles come back in row-major order. Each tile carries one
/// [`TileLayer`] per input layer holding the shapes whose placed
/// image-space bounds overlap the tile with positive area. Shapes that only
/// touch a tile edge are dropped from that tile.
///
/// # Errors
///
/// Same as [`plan_tiles`].
///
/// # Example
///
/// ```
/// use halftone_core::{partition_tiles, PrintGeometry, Scale};
///
/// let geometry = PrintGeometry::borderless(60.0, 60.0, 10.0);
/// let tiles = partition_tiles(100, 100, &[], &geometry, Scale::uniform(1.0)).unwrap();
///
/// let origins: Vec<_> = tiles.iter().map(|t| (t.bounds.x, t.bounds.y)).collect();
/// assert_eq!(origins, [(0.0, 0.0), (50.0, 0.0), (0.0, 50.0), (50.0, 50.0)]);
/// ```
pub fn partition_tiles(
    image_width: u32,
    image_height: u32,
    layers: &[HalftoneLayer],
    geometry: &PrintGeometry,
    scale: Scale,
) -> Result<Vec<Tile>, HalftoneError> {
    let grid = plan_tiles(image_width, image_height, geometry, scale)?;

    // Placement is per shape, not per tile: compute it once.
    let placed: Vec<Vec<Rect>> = layers
        .par_iter()
        .map(|layer| {
            let transform = layer.transform();
            layer
                .shapes
                .iter()
                .map(|shape| placed_bounds_with(&transform, shape))
                .collect()
        })
        .collect();

    let positions: Vec<(u32, u32)> = grid.positions().collect();
    let tiles = positions
        .into_par_iter()
        .map(|(column, row)| {
            let bounds = grid.bounds(column, row);
            let layers = layers
                .iter()
                .zip(&placed)
                .map(|(layer, rects)| TileLayer {
                    id: Arc::clone(&layer.id),
                    channel: layer.channel,
                    fill: Arc::clone(&layer.fill),
                    rotation: layer.rotation,
                    shapes: layer
                        .shapes
                        .iter()
                        .zip(rects)
                        .filter(|(_, rect)| rect.intersects(&bounds))
                        .map(|(shape, _)| shape.clone())
                        .collect(),
                })
                .collect();
            Tile {
                column,
                row,
                bounds,
                layers,
            }
        })
        .collect();

    Ok(tiles)
}
