//! Rotation geometry
//!
//! Pure geometry for screen-angle rotation: the no-clip bounding box and
//! translation origin ([`solve_rotation`]), the inverse placement transform
//! ([`Transform2d`]) and pixel-space rectangles ([`Rect`]).

mod rect;
mod rotation;
mod transform;

pub use rect::Rect;
pub use rotation::{normalize_degrees, projected_size, solve_rotation, RotationSolution};
pub use transform::Transform2d;
