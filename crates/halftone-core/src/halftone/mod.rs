//! Halftone layer generation
//!
//! Turns one ink channel of a [`RasterImage`](crate::RasterImage) into a
//! [`HalftoneLayer`]: a list of dots sampled on a grid rotated to the
//! channel's screen angle, plus the rotation needed to place them.

mod layer;
mod options;
mod shape;

pub use layer::{generate_layer, generate_layers, HalftoneLayer};
pub(crate) use layer::placed_bounds_with;
pub use options::{DotShape, LayerOptions, SampleGrid};
pub use shape::HalftoneShape;
