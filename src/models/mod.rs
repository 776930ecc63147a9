pub mod config;
pub mod manifest;
pub mod params;

pub use config::{
    AppConfig, ChannelConfig, ChannelPreset, ChannelsConfig, GridConfig, PrintConfig, ShapeKind,
    WhiteConfig,
};
pub use manifest::{LayerSummary, SeparationManifest, TileSummary};
pub use params::{SeparationParams, SeparationSettings};
