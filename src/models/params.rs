//! Per-run overrides and settings resolution.
//!
//! [`SeparationParams`] is what a request or a CLI invocation may change.
//! [`AppConfig::resolve`] merges it over the loaded config and validates the
//! result with the core's own checks, so bad values are rejected before any
//! pixel is decoded.

use halftone_core::{
    ChannelKey, ChannelSet, DotShape, InkChannel, LayerOptions, ParseChannelError, PrintGeometry,
    SampleGrid, Scale, Separator, SkipRule,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::config::{AppConfig, ChannelConfig, ChannelPreset, ChannelsConfig, ShapeKind};
use crate::error::ApiError;

/// Overrides for one separation run
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, IntoParams, clap::Args)]
#[into_params(parameter_in = Query)]
pub struct SeparationParams {
    /// Sampling cell size in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Dot shape
    #[arg(long, value_enum)]
    pub shape: Option<ShapeKind>,

    /// Black channel only
    #[arg(long)]
    #[serde(default)]
    pub greyscale: bool,

    /// Inverted screen on a black background
    #[arg(long)]
    #[serde(default)]
    pub invert: bool,

    /// Add a white underbase channel
    #[arg(long)]
    #[serde(default)]
    pub white: bool,

    /// Dots at or below this size are dropped
    #[arg(long)]
    pub min_dot_size: Option<f64>,

    /// Dot size for a fully saturated cell
    #[arg(long)]
    pub max_dot_size: Option<f64>,

    /// Printed width of the whole image (mm)
    #[arg(long)]
    pub target_width: Option<f64>,

    /// Media width (mm)
    #[arg(long)]
    pub media_width: Option<f64>,

    /// Media height (mm)
    #[arg(long)]
    pub media_height: Option<f64>,

    /// Printable width per sheet (mm)
    #[arg(long)]
    pub printable_width: Option<f64>,

    /// Printable height per sheet (mm)
    #[arg(long)]
    pub printable_height: Option<f64>,

    /// Overlap between adjacent sheets (mm)
    #[arg(long)]
    pub overlap: Option<f64>,
}

/// Fully resolved and validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationSettings {
    pub channels: ChannelSet,
    pub options: LayerOptions,
    pub geometry: PrintGeometry,
    /// Printed width of the whole image (mm)
    pub target_width: f64,
    /// Background fill drawn under all layers
    pub background: Option<String>,
}

impl SeparationSettings {
    pub fn separator(&self) -> Separator {
        Separator::new(self.channels.clone()).options(self.options.clone())
    }

    /// Pixels per millimetre for an image of the given width.
    pub fn scale(&self, image_width: u32) -> Result<Scale, ApiError> {
        Ok(Scale::from_target_width(image_width, self.target_width)?)
    }
}

impl AppConfig {
    /// Merge `params` over this config and validate the result.
    pub fn resolve(&self, params: &SeparationParams) -> Result<SeparationSettings, ApiError> {
        let inverted =
            params.invert || self.channels == ChannelsConfig::Preset(ChannelPreset::Inverted);
        let mut channels = if params.invert {
            ChannelSet::inverted()
        } else {
            match &self.channels {
                ChannelsConfig::Preset(preset) => preset_channels(*preset),
                ChannelsConfig::Custom(list) => custom_channels(list)?,
            }
        };
        if params.greyscale {
            channels = channels.into_key_only();
        }
        if params.white || self.white.is_some() {
            let white = self.white.clone().unwrap_or_default();
            channels = channels.with_white(white.angle, white.fill);
        }
        channels.validate()?;

        let shape: DotShape = params.shape.unwrap_or(self.grid.shape).into();
        let mut options = LayerOptions::new(SampleGrid::new(
            params.cell_size.unwrap_or(self.grid.cell_size),
            shape,
        ))
        .min_dot_size(params.min_dot_size.unwrap_or(self.min_dot_size));
        if let Some(max) = params.max_dot_size.or(self.max_dot_size) {
            options = options.max_dot_size(max);
        }
        options.validate()?;

        let print = &self.print;
        let geometry = PrintGeometry::new(
            params.media_width.unwrap_or(print.media_width),
            params.media_height.unwrap_or(print.media_height),
            params.printable_width.unwrap_or(print.printable_width),
            params.printable_height.unwrap_or(print.printable_height),
            params.overlap.unwrap_or(print.overlap),
        );
        geometry.validate()?;

        let target_width = params.target_width.unwrap_or(print.target_width);
        // checks target_width only
        Scale::from_target_width(1, target_width)?;

        let background = inverted.then(|| "black".to_string());

        Ok(SeparationSettings {
            channels,
            options,
            geometry,
            target_width,
            background,
        })
    }
}

fn preset_channels(preset: ChannelPreset) -> ChannelSet {
    match preset {
        ChannelPreset::Standard => ChannelSet::standard(),
        ChannelPreset::Inverted => ChannelSet::inverted(),
        ChannelPreset::KeyOnly => ChannelSet::key_only(),
    }
}

fn custom_channels(list: &[ChannelConfig]) -> Result<ChannelSet, ApiError> {
    let channels = list
        .iter()
        .map(|c| {
            let key: ChannelKey = c
                .key
                .parse()
                .map_err(|e: ParseChannelError| ApiError::InvalidSettings(e.to_string()))?;
            let skip = c.skip_at.map(SkipRule::AtOrAbove).unwrap_or_default();
            let channel = InkChannel::new(key, c.angle, c.fill.clone()).skip(skip);
            Ok(match &c.id {
                Some(id) => channel.named(id.clone()),
                None => channel,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;
    Ok(ChannelSet::new(channels)?)
}
