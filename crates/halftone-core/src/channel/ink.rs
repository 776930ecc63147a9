//! Ink channel configuration.

use crate::api::ConfigurationError;
use crate::color::ChannelKey;

/// When a grid cell contributes no dot for a channel, independent of the
/// dot-size threshold.
///
/// A white underbase at full intensity covers the paper it would be
/// printed on anyway, so it is typically configured with
/// [`SkipRule::AtFullIntensity`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SkipRule {
    /// Every cell above the minimum dot size gets a dot.
    #[default]
    Never,
    /// Cells whose average is exactly 1.0 get no dot.
    AtFullIntensity,
    /// Cells whose average is at or above the given level get no dot.
    AtOrAbove(f64),
}

impl SkipRule {
    /// Whether a cell with this block average is skipped.
    #[inline]
    pub fn skips(&self, average: f64) -> bool {
        match *self {
            SkipRule::Never => false,
            SkipRule::AtFullIntensity => average >= 1.0,
            SkipRule::AtOrAbove(level) => average >= level,
        }
    }
}

/// One ink layer: which channel to sample, at which screen angle, and how
/// to draw it.
///
/// `id` names the layer in file names, manifests and lookups. It defaults
/// to the short name of `key`; give spot inks or a second screen of the
/// same key their own id with [`named`](Self::named).
#[derive(Debug, Clone, PartialEq)]
pub struct InkChannel {
    /// Unique layer name within a [`ChannelSet`](crate::ChannelSet)
    pub id: String,
    /// Channel sampled from each block
    pub key: ChannelKey,
    /// Rotation of the sampling grid in degrees
    pub screen_angle: f64,
    /// Display color (any SVG paint value)
    pub fill: String,
    /// Per-channel skip policy
    pub skip: SkipRule,
}

impl InkChannel {
    /// Create a channel named after its key, with [`SkipRule::Never`].
    pub fn new(key: ChannelKey, screen_angle: f64, fill: impl Into<String>) -> Self {
        Self {
            id: key.short_name().to_string(),
            key,
            screen_angle,
            fill: fill.into(),
            skip: SkipRule::Never,
        }
    }

    /// Set the skip rule.
    #[inline]
    pub fn skip(mut self, rule: SkipRule) -> Self {
        self.skip = rule;
        self
    }

    /// Set the layer id.
    #[inline]
    pub fn named(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Check the id, angle and skip level are usable.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !is_valid_id(&self.id) {
            return Err(ConfigurationError::InvalidChannelId {
                id: self.id.clone(),
            });
        }
        if !self.screen_angle.is_finite() {
            return Err(ConfigurationError::NonFinite {
                parameter: "screen_angle",
            });
        }
        if let SkipRule::AtOrAbove(level) = self.skip {
            if !level.is_finite() {
                return Err(ConfigurationError::NonFinite {
                    parameter: "skip_level",
                });
            }
        }
        Ok(())
    }
}

/// Ids end up in file names and URL paths.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
