//! Separator builder, the main entry point for the crate.
//!
//! [`Separator`] bundles a [`ChannelSet`] with the grid and dot sizing
//! options and runs every channel over one image.

use crate::channel::ChannelSet;
use crate::halftone::{generate_layers, DotShape, HalftoneLayer, LayerOptions, SampleGrid};
use crate::raster::RasterImage;
use crate::tile::{partition_tiles, PrintGeometry, Scale, Tile};

use super::HalftoneError;

/// Halftone separation builder.
///
/// - Constructor takes the [`ChannelSet`]; a set is validated on use
/// - Configuration methods consume and return `self`
/// - [`separate()`](Self::separate) takes `&self`, so one separator can be
///   reused across images
///
/// # Example
///
/// ```
/// use halftone_core::{ChannelSet, DotShape, RasterImage, SampleGrid, Separator};
///
/// let pixels = [255u8, 0, 0, 255].repeat(40 * 30);
/// let image = RasterImage::new(40, 30, &pixels).unwrap();
///
/// let separation = Separator::new(ChannelSet::standard())
///     .grid(SampleGrid::new(5, DotShape::Square))
///     .min_dot_size(0.25)
///     .separate(&image)
///     .unwrap();
///
/// assert_eq!(separation.layers.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Separator {
    channels: ChannelSet,
    options: LayerOptions,
}

impl Separator {
    pub fn new(channels: ChannelSet) -> Self {
        Self {
            channels,
            options: LayerOptions::default(),
        }
    }

    /// Set the sampling grid.
    #[inline]
    pub fn grid(mut self, grid: SampleGrid) -> Self {
        self.options.grid = grid;
        self
    }

    /// Set the cell size, keeping the current shape.
    #[inline]
    pub fn cell_size(mut self, cell_size: u32) -> Self {
        self.options.grid.cell_size = cell_size;
        self
    }

    #[inline]
    pub fn shape(mut self, shape: DotShape) -> Self {
        self.options.grid.shape = shape;
        self
    }

    /// Dot size for a fully saturated cell. Defaults to half a cell for
    /// circles and a full cell for squares.
    #[inline]
    pub fn max_dot_size(mut self, size: f64) -> Self {
        self.options = self.options.max_dot_size(size);
        self
    }

    /// Dots at or below this size are dropped.
    #[inline]
    pub fn min_dot_size(mut self, size: f64) -> Self {
        self.options = self.options.min_dot_size(size);
        self
    }

    #[inline]
    pub fn options(mut self, options: LayerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn layer_options(&self) -> &LayerOptions {
        &self.options
    }

    /// Validate the whole configuration without touching any pixels.
    pub fn validate(&self) -> Result<(), HalftoneError> {
        self.options.validate()?;
        self.channels.validate()?;
        Ok(())
    }

    /// Run every channel over `image`.
    ///
    /// Layers come back in channel order.
    ///
    /// # Errors
    ///
    /// Returns [`HalftoneError::Configuration`] before any sampling if the
    /// options or channel set are invalid.
    pub fn separate(&self, image: &RasterImage<'_>) -> Result<Separation, HalftoneError> {
        self.validate()?;
        let layers = generate_layers(image, &self.channels, &self.options)?;
        Ok(Separation {
            width: image.width(),
            height: image.height(),
            layers,
        })
    }
}

/// Result of one separation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Separation {
    /// Source image width in pixels
    pub width: u32,
    /// Source image height in pixels
    pub height: u32,
    /// One layer per channel, in channel order
    pub layers: Vec<HalftoneLayer>,
}

impl Separation {
    /// Layer with the given channel id.
    pub fn layer(&self, id: &str) -> Option<&HalftoneLayer> {
        self.layers.iter().find(|l| &*l.id == id)
    }

    /// Total number of dots across all layers.
    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(HalftoneLayer::len).sum()
    }

    /// Split the layers into printable tiles.
    pub fn partition(
        &self,
        geometry: &PrintGeometry,
        scale: Scale,
    ) -> Result<Vec<Tile>, HalftoneError> {
        partition_tiles(self.width, self.height, &self.layers, geometry, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ConfigurationError;
    use crate::channel::InkChannel;
    use crate::color::ChannelKey;

    fn grey(width: u32, height: u32) -> Vec<u8> {
        [128u8, 128, 128, 255].repeat((width * height) as usize)
    }

    #[test]
    fn test_default_separator_uses_standard_set() {
        let sep = Separator::default();
        assert_eq!(sep.channels(), &ChannelSet::standard());
        assert_eq!(sep.layer_options(), &LayerOptions::default());
    }

    #[test]
    fn test_builder_chaining() {
        let sep = Separator::new(ChannelSet::key_only())
            .cell_size(4)
            .shape(DotShape::Square)
            .max_dot_size(3.0)
            .min_dot_size(0.5);
        let opts = sep.layer_options();
        assert_eq!(opts.grid, SampleGrid::new(4, DotShape::Square));
        assert_eq!(opts.max_dot_size, Some(3.0));
        assert_eq!(opts.min_dot_size, 0.5);
    }

    #[test]
    fn test_separate_is_reusable() {
        let sep = Separator::new(ChannelSet::standard());
        let a = grey(30, 20);
        let b = grey(50, 50);
        let first = sep.separate(&RasterImage::new(30, 20, &a).unwrap()).unwrap();
        let second = sep.separate(&RasterImage::new(50, 50, &b).unwrap()).unwrap();
        assert_eq!((first.width, first.height), (30, 20));
        assert_eq!((second.width, second.height), (50, 50));
        assert_eq!(first.layers.len(), 4);
        // grey has no chroma
        assert!(first.layer("c").unwrap().is_empty());
        assert!(!first.layer("k").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_configuration_fails_before_sampling() {
        let data = grey(10, 10);
        let img = RasterImage::new(10, 10, &data).unwrap();

        let err = Separator::default().cell_size(0).separate(&img).unwrap_err();
        assert!(matches!(
            err,
            HalftoneError::Configuration(ConfigurationError::NonPositive {
                parameter: "cell_size",
                ..
            })
        ));

        let mut set = ChannelSet::standard();
        set.get_mut("k").unwrap().screen_angle = f64::NAN;
        assert!(Separator::new(set).separate(&img).is_err());
    }

    #[test]
    fn test_white_layer_is_skipped_at_full_intensity() {
        let data = [255u8, 255, 255, 255].repeat(20 * 20);
        let img = RasterImage::new(20, 20, &data).unwrap();
        let set = ChannelSet::key_only().with_white(45.0, "#ffffff");
        let sep = Separator::new(set).separate(&img).unwrap();
        assert!(sep.layer("w").unwrap().is_empty());
        assert_eq!(sep.shape_count(), 0);
    }

    #[test]
    fn test_partition_through_separation() {
        let data = grey(100, 100);
        let img = RasterImage::new(100, 100, &data).unwrap();
        let set = ChannelSet::new(vec![InkChannel::new(ChannelKey::Key, 0.0, "black")]).unwrap();
        let sep = Separator::new(set).separate(&img).unwrap();
        let tiles = sep
            .partition(&PrintGeometry::borderless(60.0, 60.0, 10.0), Scale::uniform(1.0))
            .unwrap();
        assert_eq!(tiles.len(), 4);
        let total: usize = tiles.iter().map(Tile::shape_count).sum();
        // every dot lands on at least one tile
        assert!(total >= sep.shape_count());
    }

    #[test]
    fn test_spot_channel_gets_its_own_layer() {
        let data = [255u8, 0, 0, 255].repeat(40 * 40);
        let img = RasterImage::new(40, 40, &data).unwrap();
        let set = ChannelSet::new(vec![
            InkChannel::new(ChannelKey::Magenta, 15.0, "magenta"),
            InkChannel::new(ChannelKey::Magenta, 15.0, "#e10600").named("spot-red"),
        ])
        .unwrap();
        let sep = Separator::new(set).separate(&img).unwrap();

        let ids: Vec<_> = sep.layers.iter().map(|l| &*l.id).collect();
        assert_eq!(ids, vec!["m", "spot-red"]);
        let (m, spot) = (sep.layer("m").unwrap(), sep.layer("spot-red").unwrap());
        assert_eq!(spot.channel, ChannelKey::Magenta);
        assert_eq!(&*spot.fill, "#e10600");
        assert_eq!(m.len(), spot.len());
        assert!(!spot.is_empty());

        let tiles = sep
            .partition(&PrintGeometry::borderless(30.0, 30.0, 5.0), Scale::uniform(1.0))
            .unwrap();
        assert!(tiles.iter().all(|t| t.layer("spot-red").is_some()));
    }
}
