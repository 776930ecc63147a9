//! Ink channel identifiers.

use std::fmt;
use std::str::FromStr;

/// Stable identifier of an ink channel.
///
/// The short names (`c`, `m`, `y`, `k`, `w`) are used in file names and
/// manifests; [`FromStr`] also accepts the long names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKey {
    Cyan,
    Magenta,
    Yellow,
    /// Black
    Key,
    White,
}

impl ChannelKey {
    /// All channel keys in CMYKW order.
    pub const ALL: [ChannelKey; 5] = [
        ChannelKey::Cyan,
        ChannelKey::Magenta,
        ChannelKey::Yellow,
        ChannelKey::Key,
        ChannelKey::White,
    ];

    /// Single-letter name.
    pub fn short_name(self) -> &'static str {
        match self {
            ChannelKey::Cyan => "c",
            ChannelKey::Magenta => "m",
            ChannelKey::Yellow => "y",
            ChannelKey::Key => "k",
            ChannelKey::White => "w",
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Error returned when a channel name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChannelError {
    name: String,
}

impl fmt::Display for ParseChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown ink channel '{}' (expected one of c, m, y, k, w)",
            self.name
        )
    }
}

impl std::error::Error for ParseChannelError {}

impl FromStr for ChannelKey {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cyan" => Ok(ChannelKey::Cyan),
            "m" | "magenta" => Ok(ChannelKey::Magenta),
            "y" | "yellow" => Ok(ChannelKey::Yellow),
            "k" | "key" | "black" => Ok(ChannelKey::Key),
            "w" | "white" => Ok(ChannelKey::White),
            _ => Err(ParseChannelError {
                name: s.to_string(),
            }),
        }
    }
}
