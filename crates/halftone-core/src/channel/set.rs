//! Ordered channel sets and presets.

use super::ink::{InkChannel, SkipRule};
use crate::api::ConfigurationError;
use crate::color::ChannelKey;

/// Ordered list of ink channels.
///
/// Order is drawing order: later layers are composited on top of earlier
/// ones. The set is configuration, not derived from the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    channels: Vec<InkChannel>,
}

impl ChannelSet {
    /// Build a set from an explicit list.
    ///
    /// # Errors
    ///
    /// Empty lists, duplicate or malformed ids and non-finite angles are
    /// rejected. Two channels may sample the same key under different ids.
    pub fn new(channels: Vec<InkChannel>) -> Result<Self, ConfigurationError> {
        let set = Self { channels };
        set.validate()?;
        Ok(set)
    }

    /// Classic CMYK screen: cyan 345, yellow 0, magenta 15, black 75,
    /// drawn in that order.
    pub fn standard() -> Self {
        Self {
            channels: vec![
                InkChannel::new(ChannelKey::Cyan, 345.0, "cyan"),
                InkChannel::new(ChannelKey::Yellow, 0.0, "yellow"),
                InkChannel::new(ChannelKey::Magenta, 15.0, "magenta"),
                InkChannel::new(ChannelKey::Key, 75.0, "black"),
            ],
        }
    }

    /// Screen for printing on dark media: as [`standard`](Self::standard)
    /// but with black at 135 degrees.
    pub fn inverted() -> Self {
        let mut set = Self::standard();
        if let Some(key) = set.get_mut("k") {
            key.screen_angle = 135.0;
        }
        set
    }

    /// Greyscale: the black channel only.
    pub fn key_only() -> Self {
        Self {
            channels: vec![InkChannel::new(ChannelKey::Key, 75.0, "black")],
        }
    }

    /// Keep only the channels of this set that sample black.
    pub fn into_key_only(self) -> Self {
        let channels: Vec<_> = self
            .channels
            .into_iter()
            .filter(|c| c.key == ChannelKey::Key)
            .collect();
        if channels.is_empty() {
            Self::key_only()
        } else {
            Self { channels }
        }
    }

    /// Append a white channel that drops fully white cells.
    ///
    /// Replaces an existing white channel.
    pub fn with_white(mut self, screen_angle: f64, fill: impl Into<String>) -> Self {
        self.channels.retain(|c| c.key != ChannelKey::White);
        self.channels.push(
            InkChannel::new(ChannelKey::White, screen_angle, fill).skip(SkipRule::AtFullIntensity),
        );
        self
    }

    pub fn channels(&self) -> &[InkChannel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channel with the given id.
    pub fn get(&self, id: &str) -> Option<&InkChannel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut InkChannel> {
        self.channels.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InkChannel> {
        self.channels.iter()
    }

    /// Check the set is non-empty, ids are unique and every channel is valid.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.channels.is_empty() {
            return Err(ConfigurationError::NoChannels);
        }
        for (i, channel) in self.channels.iter().enumerate() {
            channel.validate()?;
            if self.channels[..i].iter().any(|c| c.id == channel.id) {
                return Err(ConfigurationError::DuplicateChannel {
                    id: channel.id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = &'a InkChannel;
    type IntoIter = std::slice::Iter<'a, InkChannel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
