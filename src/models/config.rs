use crate::assets::AssetLoader;
use crate::services::separation_store::DEFAULT_MAX_ENTRIES;
use halftone_core::DotShape;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Preset name or explicit channel list
    pub channels: ChannelsConfig,

    /// Optional white underbase appended after the other channels
    pub white: Option<WhiteConfig>,

    /// Sampling grid
    pub grid: GridConfig,

    /// Dots at or below this size are dropped
    pub min_dot_size: f64,

    /// Dot size for a fully saturated cell (None = derive from the grid)
    pub max_dot_size: Option<f64>,

    /// Physical output geometry
    pub print: PrintConfig,

    /// Longest edge of PNG previews in pixels
    pub preview_max_size: u32,

    /// Separations kept in memory before the least recently used is dropped
    pub max_stored_separations: usize,
}

/// Channel selection: a named preset or a custom list
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChannelsConfig {
    Preset(ChannelPreset),
    Custom(Vec<ChannelConfig>),
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        ChannelsConfig::Preset(ChannelPreset::Standard)
    }
}

/// Built-in channel sets
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPreset {
    /// Cyan 345, yellow 0, magenta 15, black 75
    #[default]
    Standard,
    /// Black at 135, drawn over a black background
    Inverted,
    /// Black only
    KeyOnly,
}

/// One entry of a custom channel list
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChannelConfig {
    /// Layer name in file names and URLs (defaults to the key's short name)
    #[serde(default)]
    pub id: Option<String>,

    /// Channel sampled (c, m, y, k, w or the long names)
    pub key: String,

    /// Screen angle in degrees
    pub angle: f64,

    /// SVG paint for the dots
    pub fill: String,

    /// Drop cells whose average is at or above this level
    #[serde(default)]
    pub skip_at: Option<f64>,
}

/// White underbase settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WhiteConfig {
    #[serde(default = "default_white_angle")]
    pub angle: f64,

    #[serde(default = "default_white_fill")]
    pub fill: String,
}

fn default_white_angle() -> f64 {
    45.0
}

fn default_white_fill() -> String {
    "#ffffff".to_string()
}

impl Default for WhiteConfig {
    fn default() -> Self {
        Self {
            angle: default_white_angle(),
            fill: default_white_fill(),
        }
    }
}

/// Sampling grid settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: u32,
    pub shape: ShapeKind,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            shape: ShapeKind::Circle,
        }
    }
}

/// Dot shape as written in config files and query strings
#[derive(
    Debug, Deserialize, Serialize, ToSchema, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
}

impl From<ShapeKind> for DotShape {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => DotShape::Circle,
            ShapeKind::Square => DotShape::Square,
        }
    }
}

/// Physical output settings, in millimetres
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PrintConfig {
    /// Width the whole image is printed at
    pub target_width: f64,
    pub media_width: f64,
    pub media_height: f64,
    pub printable_width: f64,
    pub printable_height: f64,
    /// Margin shared by adjacent tiles
    pub overlap: f64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            target_width: 711.0,
            media_width: 215.9,
            media_height: 279.4,
            printable_width: 186.33,
            printable_height: 237.0,
            overlap: 10.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channels: ChannelsConfig::default(),
            white: None,
            grid: GridConfig::default(),
            min_dot_size: 0.0,
            max_dot_size: None,
            print: PrintConfig::default(),
            preview_max_size: 1600,
            max_stored_separations: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        channels = ?config.channels,
                        cell_size = config.grid.cell_size,
                        target_width = config.print.target_width,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
