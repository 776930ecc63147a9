use crate::error::{ApiError, RenderError};
use crate::models::{AppConfig, SeparationManifest, SeparationParams, SeparationSettings};
use crate::rendering::{decode_png, halftone_svg, tile_svg, PreviewRenderer};
use chrono::Utc;
use halftone_core::{ChannelKey, Separation, Tile};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;

/// One finished separation, as kept by the store
#[derive(Debug, Clone)]
pub struct StoredSeparation {
    pub manifest: SeparationManifest,
    pub separation: Separation,
    pub tiles: Vec<Tile>,
    pub settings: SeparationSettings,
}

impl StoredSeparation {
    /// Full halftone SVG, optionally with tile outlines on top
    pub fn halftone_svg(&self, outlines: bool) -> String {
        halftone_svg(
            &self.separation,
            self.settings.background.as_deref(),
            outlines.then_some(self.tiles.as_slice()),
        )
    }

    /// Id of the layer a request path names.
    ///
    /// An exact channel id wins; otherwise a channel name such as `black`
    /// or `cyan` finds the layer carrying that key's default id.
    pub fn resolve_layer(&self, name: &str) -> Option<&str> {
        let layers = &self.separation.layers;
        if let Some(layer) = layers.iter().find(|l| &*l.id == name) {
            return Some(&*layer.id);
        }
        let key: ChannelKey = name.parse().ok()?;
        layers
            .iter()
            .find(|l| &*l.id == key.short_name())
            .map(|l| &*l.id)
    }

    /// SVG for one layer of one tile
    pub fn tile_svg(&self, layer: &str, column: u32, row: u32) -> Result<String, ApiError> {
        self.resolve_layer(layer)
            .and_then(|id| {
                self.tiles
                    .iter()
                    .find(|t| t.column == column && t.row == row)
                    .and_then(|tile| tile_svg(tile, id))
            })
            .ok_or_else(|| ApiError::TileNotFound {
                layer: layer.to_string(),
                column,
                row,
            })
    }
}

/// Runs the decode → separate → partition pipeline for uploaded images
#[derive(Clone)]
pub struct SeparationService {
    config: Arc<AppConfig>,
    preview: PreviewRenderer,
}

impl SeparationService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let preview = PreviewRenderer::new(config.preview_max_size);
        Self { config, preview }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Separate an uploaded PNG
    ///
    /// Uses spawn_blocking to keep decoding and dot generation off the
    /// async runtime.
    pub async fn separate(
        &self,
        image: Vec<u8>,
        params: SeparationParams,
    ) -> Result<StoredSeparation, ApiError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.separate_blocking(&image, &params))
            .await
            .map_err(|e| ApiError::Internal(format!("Separation task failed: {e}")))?
    }

    /// Synchronous pipeline, used directly by the CLI
    pub fn separate_blocking(
        &self,
        image: &[u8],
        params: &SeparationParams,
    ) -> Result<StoredSeparation, ApiError> {
        let started = Instant::now();
        let settings = self.config.resolve(params)?;
        let id = separation_id(image, params)?;

        let decoded = decode_png(image)?;
        let scale = settings.scale(decoded.width)?;
        let separator = settings.separator();
        let separation = separator.separate(&decoded.raster()?)?;
        let tiles = separation.partition(&settings.geometry, scale)?;

        let manifest = SeparationManifest::new(
            id,
            Utc::now(),
            &separation,
            &tiles,
            separator.layer_options(),
            scale,
        );

        tracing::info!(
            id = %manifest.id,
            width = decoded.width,
            height = decoded.height,
            layers = separation.layers.len(),
            shapes = separation.shape_count(),
            tiles = tiles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Separated image"
        );

        Ok(StoredSeparation {
            manifest,
            separation,
            tiles,
            settings,
        })
    }

    /// Rasterize a stored separation into a PNG preview
    pub async fn render_preview(
        &self,
        stored: Arc<StoredSeparation>,
        outlines: bool,
    ) -> Result<Vec<u8>, RenderError> {
        let renderer = self.preview;
        tokio::task::spawn_blocking(move || renderer.render(&stored.halftone_svg(outlines)))
            .await
            .map_err(|e| RenderError::SvgParse(format!("Render task failed: {e}")))?
    }

    /// Synchronous preview rendering, used by the CLI
    pub fn render_preview_blocking(
        &self,
        stored: &StoredSeparation,
        outlines: bool,
    ) -> Result<Vec<u8>, RenderError> {
        self.preview.render(&stored.halftone_svg(outlines))
    }
}

/// Content id of a run: SHA256 over the image bytes and the JSON parameters.
pub fn separation_id(image: &[u8], params: &SeparationParams) -> Result<String, ApiError> {
    let params_json =
        serde_json::to_vec(params).map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(b"image:");
    hasher.update(image);
    hasher.update(b"|params:");
    hasher.update(&params_json);

    let result = hasher.finalize();
    // First 16 bytes, 32 hex characters
    Ok(hex::encode(&result[..16]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShapeKind;

    fn png_bytes(width: u32, height: u32, grey: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&vec![grey; (width * height) as usize])
                .unwrap();
        }
        buf
    }

    fn service() -> SeparationService {
        SeparationService::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_separation_id_is_stable_and_input_dependent() {
        let image = png_bytes(4, 4, 0);
        let params = SeparationParams::default();
        let a = separation_id(&image, &params).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(a, separation_id(&image, &params).unwrap());

        let other_params = SeparationParams {
            cell_size: Some(4),
            ..Default::default()
        };
        assert_ne!(a, separation_id(&image, &other_params).unwrap());
        assert_ne!(a, separation_id(&png_bytes(4, 4, 1), &params).unwrap());
    }

    #[test]
    fn test_separate_blocking_builds_manifest() {
        // 100 px printed 50 mm wide on 30 mm sheets with 5 mm overlap
        let params = SeparationParams {
            greyscale: true,
            target_width: Some(50.0),
            media_width: Some(30.0),
            media_height: Some(30.0),
            printable_width: Some(30.0),
            printable_height: Some(30.0),
            overlap: Some(5.0),
            ..Default::default()
        };
        let stored = service()
            .separate_blocking(&png_bytes(100, 100, 0), &params)
            .unwrap();

        let m = &stored.manifest;
        assert_eq!((m.width, m.height), (100, 100));
        assert_eq!(m.scale, 2.0);
        assert_eq!((m.columns, m.rows), (2, 2));
        assert_eq!(m.layers.len(), 1);
        assert_eq!(m.layers[0].key, "k");
        assert!(m.layers[0].shape_count > 0);
        assert_eq!(stored.tiles.len(), 4);
    }

    #[test]
    fn test_bad_settings_fail_before_decoding() {
        let params = SeparationParams {
            cell_size: Some(0),
            ..Default::default()
        };
        let err = service()
            .separate_blocking(b"not a png", &params)
            .unwrap_err();
        assert!(matches!(err, ApiError::Halftone(_)));
    }

    #[test]
    fn test_bad_png_is_a_render_error() {
        let err = service()
            .separate_blocking(b"not a png", &SeparationParams::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::Render(RenderError::PngDecode(_))));
    }

    #[test]
    fn test_tile_svg_lookup() {
        let params = SeparationParams {
            shape: Some(ShapeKind::Square),
            ..Default::default()
        };
        let stored = service()
            .separate_blocking(&png_bytes(40, 40, 0), &params)
            .unwrap();

        assert!(stored.tile_svg("k", 0, 0).unwrap().contains("<rect "));
        assert_eq!(
            stored.tile_svg("black", 0, 0).unwrap(),
            stored.tile_svg("k", 0, 0).unwrap()
        );
        let err = stored.tile_svg("k", 9, 9).unwrap_err();
        assert!(matches!(err, ApiError::TileNotFound { column: 9, row: 9, .. }));
        let err = stored.tile_svg("orange", 0, 0).unwrap_err();
        assert!(matches!(err, ApiError::TileNotFound { ref layer, .. } if layer == "orange"));
    }

    #[test]
    fn test_invert_adds_background() {
        let params = SeparationParams {
            invert: true,
            ..Default::default()
        };
        let stored = service()
            .separate_blocking(&png_bytes(20, 20, 255), &params)
            .unwrap();
        assert!(stored.halftone_svg(false).contains(r#"fill="black"/>"#));
        assert!(!stored.halftone_svg(false).contains("stroke="));
        assert!(stored.halftone_svg(true).contains(r#"stroke="red""#));
    }

    #[tokio::test]
    async fn test_async_separate_and_preview() {
        let service = service();
        let stored = service
            .separate(png_bytes(30, 20, 128), SeparationParams::default())
            .await
            .unwrap();
        let png = service
            .render_preview(Arc::new(stored), true)
            .await
            .unwrap();
        let preview = decode_png(&png).unwrap();
        assert_eq!((preview.width, preview.height), (30, 20));
    }
}
