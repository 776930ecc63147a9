use crate::error::RenderError;
use resvg::usvg::{self, Transform};
use tiny_skia::Pixmap;

/// Rasterizes halftone SVGs into PNG previews.
///
/// The SVG is scaled down so its longer side fits `max_size`; smaller
/// documents are rendered at their own size. Previews are drawn on white and
/// written as 8-bit RGB.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRenderer {
    max_size: u32,
}

impl PreviewRenderer {
    pub fn new(max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Render SVG text to PNG bytes.
    pub fn render(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg.as_bytes())?;
        let (width, height) = (pixmap.width(), pixmap.height());

        // Opaque white background, so premultiplied == straight
        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();

        let png_bytes = encode_png(width, height, &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        tracing::debug!(width, height, bytes = optimized.len(), "Rendered preview");
        Ok(optimized)
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg_data: &[u8]) -> Result<Pixmap, RenderError> {
        let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let longest = svg_size.width().max(svg_size.height());
        let scale = (self.max_size as f32 / longest).min(1.0);

        let width = (svg_size.width() * scale).round().max(1.0) as u32;
        let height = (svg_size.height() * scale).round().max(1.0) as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(
            &tree,
            Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        Ok(pixmap)
    }
}

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf)
}
