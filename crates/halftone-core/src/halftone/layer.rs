//! Halftone layer generation.
//!
//! A layer is produced in three ordered steps:
//!
//! 1. Solve the no-clip rotation for the channel's screen angle.
//! 2. Resample the image onto the rotated canvas.
//! 3. Walk the canvas in `cell_size` steps, average the channel over each
//!    full cell and emit one dot per cell whose size clears the minimum.
//!
//! The solved rotation is stored on the layer: dots live in rotated-pixel
//! space and a renderer places them with `rotate(-θ) translate(-origin)`.

use std::sync::Arc;

use rayon::prelude::*;

use super::options::{DotShape, LayerOptions};
use super::shape::HalftoneShape;
use crate::api::HalftoneError;
use crate::channel::InkChannel;
use crate::color::ChannelKey;
use crate::geometry::{solve_rotation, Rect, RotationSolution, Transform2d};
use crate::raster::{rotate_raster, sample_block, RasterImage};

/// Ordered dots for one channel plus the transform that places them.
#[derive(Debug, Clone, PartialEq)]
pub struct HalftoneLayer {
    /// Id of the [`InkChannel`] the layer came from
    pub id: Arc<str>,
    /// Channel the dots were sampled from
    pub channel: ChannelKey,
    pub fill: Arc<str>,
    /// Rotation the dots were sampled under
    pub rotation: RotationSolution,
    /// Sampling grid cell size in pixels
    pub cell_size: u32,
    /// Dots in row-major grid order
    pub shapes: Vec<HalftoneShape>,
}

impl HalftoneLayer {
    /// Transform from the rotated sampling frame into image space.
    #[inline]
    pub fn transform(&self) -> Transform2d {
        Transform2d::inverse_of(&self.rotation)
    }

    /// Where a dot's centre lands on the original image.
    pub fn placed_center(&self, shape: &HalftoneShape) -> (f64, f64) {
        let (cx, cy) = shape.center();
        self.transform().apply(cx, cy)
    }

    /// Axis-aligned bounds of a dot after placement into image space.
    pub fn placed_bounds(&self, shape: &HalftoneShape) -> Rect {
        placed_bounds_with(&self.transform(), shape)
    }

    /// Number of dots in the layer.
    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// [`HalftoneLayer::placed_bounds`] with a precomputed transform.
pub(crate) fn placed_bounds_with(transform: &Transform2d, shape: &HalftoneShape) -> Rect {
    let (cx, cy) = shape.center();
    let (x, y) = transform.apply(cx, cy);
    let half = match shape.shape {
        DotShape::Circle => shape.size,
        DotShape::Square => transform.square_half_extent(shape.size),
    };
    Rect::centered(x, y, half)
}

/// Generate the halftone layer for one channel.
///
/// Cells are non-overlapping; a trailing partial row or column of the
/// rotated canvas is dropped. A dot is emitted when
/// `max_dot_size * average > min_dot_size` and the channel's skip rule does
/// not fire. Pure: the same image and options always give the same layer.
///
/// # Errors
///
/// Returns [`HalftoneError::Configuration`] for invalid options or channel
/// settings, before any pixel is read.
///
/// # Example
///
/// ```
/// use halftone_core::{generate_layer, ChannelKey, InkChannel, LayerOptions, RasterImage};
///
/// let data = [0u8, 0, 0, 255].repeat(20 * 20);
/// let image = RasterImage::new(20, 20, &data).unwrap();
/// let channel = InkChannel::new(ChannelKey::Key, 0.0, "black");
///
/// let layer = generate_layer(&image, &channel, &LayerOptions::default()).unwrap();
/// assert_eq!(layer.shapes.len(), 4);
/// assert!(layer.shapes.iter().all(|s| s.size == 5.0));
/// ```
pub fn generate_layer(
    image: &RasterImage<'_>,
    channel: &InkChannel,
    options: &LayerOptions,
) -> Result<HalftoneLayer, HalftoneError> {
    options.validate()?;
    channel.validate()?;

    let rotation = solve_rotation(
        image.width() as f64,
        image.height() as f64,
        channel.screen_angle,
    );
    let rotated = rotate_raster(image, &rotation);
    let fill: Arc<str> = Arc::from(channel.fill.as_str());

    let shapes = match rotated.view() {
        Some(view) => sample_cells(&view, channel, options, &fill),
        None => Vec::new(),
    };

    Ok(HalftoneLayer {
        id: Arc::from(channel.id.as_str()),
        channel: channel.key,
        fill,
        rotation,
        cell_size: options.grid.cell_size,
        shapes,
    })
}

/// Generate layers for every channel, in channel order.
///
/// Channels are processed in parallel; the output order matches the input.
pub fn generate_layers<'c>(
    image: &RasterImage<'_>,
    channels: impl IntoIterator<Item = &'c InkChannel>,
    options: &LayerOptions,
) -> Result<Vec<HalftoneLayer>, HalftoneError> {
    options.validate()?;
    let channels: Vec<&InkChannel> = channels.into_iter().collect();
    channels
        .par_iter()
        .map(|channel| generate_layer(image, channel, options))
        .collect()
}

fn sample_cells(
    view: &RasterImage<'_>,
    channel: &InkChannel,
    options: &LayerOptions,
    fill: &Arc<str>,
) -> Vec<HalftoneShape> {
    let cell = options.grid.cell_size;
    let columns = view.width() / cell;
    let rows = view.height() / cell;
    let max_dot = options.effective_max_dot_size();
    let shape_kind = options.grid.shape;

    let per_row: Vec<Vec<HalftoneShape>> = (0..rows)
        .into_par_iter()
        .map(|row| {
            let y = row * cell;
            let mut out = Vec::new();
            for column in 0..columns {
                let x = column * cell;
                let average = sample_block(view, x, y, cell, channel.key);
                if channel.skip.skips(average) {
                    continue;
                }
                let size = max_dot * average;
                if !(size > options.min_dot_size) {
                    continue;
                }
                // circles sit half a full-size dot in from the cell corner
                let (px, py) = match shape_kind {
                    DotShape::Circle => (x as f64 + max_dot / 2.0, y as f64 + max_dot / 2.0),
                    DotShape::Square => (x as f64, y as f64),
                };
                out.push(HalftoneShape {
                    channel: channel.key,
                    column,
                    row,
                    x: px,
                    y: py,
                    size,
                    shape: shape_kind,
                    fill: Arc::clone(fill),
                });
            }
            out
        })
        .collect();

    per_row.into_iter().flatten().collect()
}
