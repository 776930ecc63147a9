pub mod separate;

pub use separate::{
    __path_handle_halftone_svg, __path_handle_manifest, __path_handle_preview,
    __path_handle_separate, __path_handle_tile_svg,
};
pub use separate::{
    handle_halftone_svg, handle_manifest, handle_preview, handle_separate, handle_tile_svg,
    ErrorResponse, PreviewQuery,
};
