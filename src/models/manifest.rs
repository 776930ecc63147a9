//! JSON summary of one separation run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use halftone_core::{DotShape, LayerOptions, Scale, Separation, Tile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::config::ShapeKind;
use crate::rendering::tile_file_name;

/// Separation manifest returned by the API and written by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeparationManifest {
    /// Content id (hash of the image and the parameters)
    pub id: String,
    /// When the separation was computed
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Pixels per millimetre
    pub scale: f64,
    /// Sampling cell size in pixels
    pub cell_size: u32,
    pub shape: ShapeKind,
    /// Tile grid columns
    pub columns: u32,
    /// Tile grid rows
    pub rows: u32,
    pub layers: Vec<LayerSummary>,
    pub tiles: Vec<TileSummary>,
}

/// One ink layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LayerSummary {
    /// Channel id; the short name (c, m, y, k, w) unless configured otherwise
    pub key: String,
    /// Channel the dots were sampled from (c, m, y, k, w)
    pub channel: String,
    pub fill: String,
    /// Screen angle in degrees, normalized to [0, 360)
    pub angle: f64,
    /// Translation applied after rotating, in pixels
    pub origin: [f64; 2],
    /// Size of the rotated sampling canvas, in pixels
    pub bounding: [f64; 2],
    pub shape_count: usize,
}

/// One printable tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TileSummary {
    pub column: u32,
    pub row: u32,
    /// Pixel rectangle in image space
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Dots per channel id on this tile
    pub shape_counts: BTreeMap<String, usize>,
}

impl SeparationManifest {
    pub fn new(
        id: String,
        created_at: DateTime<Utc>,
        separation: &Separation,
        tiles: &[Tile],
        options: &LayerOptions,
        scale: Scale,
    ) -> Self {
        let layers = separation
            .layers
            .iter()
            .map(|layer| LayerSummary {
                key: layer.id.to_string(),
                channel: layer.channel.to_string(),
                fill: layer.fill.to_string(),
                angle: layer.rotation.angle_degrees,
                origin: [layer.rotation.origin_x, layer.rotation.origin_y],
                bounding: [
                    layer.rotation.bounding_width,
                    layer.rotation.bounding_height,
                ],
                shape_count: layer.len(),
            })
            .collect();

        let tiles: Vec<TileSummary> = tiles.iter().map(TileSummary::from).collect();
        let columns = tiles.iter().map(|t| t.column + 1).max().unwrap_or(0);
        let rows = tiles.iter().map(|t| t.row + 1).max().unwrap_or(0);

        Self {
            id,
            created_at,
            width: separation.width,
            height: separation.height,
            scale: scale.x,
            cell_size: options.grid.cell_size,
            shape: match options.grid.shape {
                DotShape::Circle => ShapeKind::Circle,
                DotShape::Square => ShapeKind::Square,
            },
            columns,
            rows,
            layers,
            tiles,
        }
    }

    /// Tile file names in the order they are written (`{key}-chop-{col}-{row}.svg`).
    pub fn tile_file_names(&self) -> Vec<String> {
        self.layers
            .iter()
            .flat_map(|layer| {
                self.tiles
                    .iter()
                    .map(move |tile| tile_file_name(&layer.key, tile.column, tile.row))
            })
            .collect()
    }
}

impl From<&Tile> for TileSummary {
    fn from(tile: &Tile) -> Self {
        Self {
            column: tile.column,
            row: tile.row,
            x: tile.bounds.x,
            y: tile.bounds.y,
            width: tile.bounds.width,
            height: tile.bounds.height,
            shape_counts: tile
                .layers
                .iter()
                .map(|l| (l.id.to_string(), l.shapes.len()))
                .collect(),
        }
    }
}
