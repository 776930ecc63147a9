//! Block sampler: mean channel intensity over a square neighbourhood.

use super::image::RasterImage;
use crate::color::{convert_to_cmyk, ChannelKey, Rgba};

/// Mean intensity of `channel` over the `size x size` block whose top-left
/// corner is `(x, y)`.
///
/// Transparent pixels are skipped. Returns 0 (never NaN) when:
/// - `size` is 0,
/// - the block runs past the right or bottom edge of the buffer, even
///   partially,
/// - every pixel in the block is transparent.
///
/// The result depends only on its inputs, so blocks can be sampled from
/// any number of threads.
///
/// # Example
///
/// ```
/// use halftone_core::{sample_block, ChannelKey, RasterImage};
///
/// // 2x2 black image
/// let data = [0u8, 0, 0, 255].repeat(4);
/// let image = RasterImage::new(2, 2, &data).unwrap();
///
/// assert_eq!(sample_block(&image, 0, 0, 2, ChannelKey::Key), 1.0);
/// assert_eq!(sample_block(&image, 1, 1, 2, ChannelKey::Key), 0.0); // off the edge
/// ```
pub fn sample_block(image: &RasterImage<'_>, x: u32, y: u32, size: u32, channel: ChannelKey) -> f64 {
    if size == 0 {
        return 0.0;
    }
    let fits_x = x.checked_add(size).is_some_and(|end| end <= image.width());
    let fits_y = y.checked_add(size).is_some_and(|end| end <= image.height());
    if !fits_x || !fits_y {
        return 0.0;
    }

    let width = image.width() as usize;
    let data = image.data();
    let mut total = 0.0;
    let mut count = 0usize;

    for row in y as usize..(y + size) as usize {
        let start = (row * width + x as usize) * 4;
        let end = start + size as usize * 4;
        for px in data[start..end].chunks_exact(4) {
            let pixel = Rgba::from_slice(px);
            if pixel.is_transparent() {
                continue;
            }
            total += convert_to_cmyk(pixel).channel(channel);
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
