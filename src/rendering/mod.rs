pub mod decode;
pub mod svg;
pub mod svg_to_png;

pub use decode::{decode_png, DecodedImage, MAX_IMAGE_PIXELS};
pub use svg::{halftone_svg, tile_file_name, tile_svg};
pub use svg_to_png::PreviewRenderer;
