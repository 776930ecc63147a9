//! Ink channel configuration
//!
//! [`InkChannel`] pairs a [`ChannelKey`](crate::ChannelKey) with a screen
//! angle, a fill color and a [`SkipRule`]. [`ChannelSet`] holds the ordered
//! list used for one separation run, with presets for the common screens.

mod ink;
mod set;

pub use ink::{InkChannel, SkipRule};
pub use set::ChannelSet;
