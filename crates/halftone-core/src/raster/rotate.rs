//! Virtual rotation of a raster onto a no-clip canvas.

use rayon::prelude::*;

use super::image::RasterImage;
use crate::geometry::{RotationSolution, Transform2d};

/// Owned RGBA canvas holding a rotated copy of an image.
///
/// Canvas pixels with no source pixel behind them are fully transparent,
/// so the block sampler ignores them.
#[derive(Debug, Clone)]
pub struct RotatedRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RotatedRaster {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the canvas as a [`RasterImage`].
    ///
    /// Returns `None` for an empty canvas.
    pub fn view(&self) -> Option<RasterImage<'_>> {
        RasterImage::new(self.width, self.height, &self.data).ok()
    }
}

/// Resample `image` into the rotated frame described by `rotation`.
///
/// Each canvas pixel centre is mapped back through
/// `R(-θ) · (p - origin)` and takes the nearest source pixel. Rows are
/// filled in parallel; the source buffer is only read.
pub fn rotate_raster(image: &RasterImage<'_>, rotation: &RotationSolution) -> RotatedRaster {
    let (width, height) = rotation.canvas_size();

    if rotation.angle_degrees == 0.0 && width == image.width() && height == image.height() {
        return RotatedRaster {
            width,
            height,
            data: image.data().to_vec(),
        };
    }

    let transform = Transform2d::inverse_of(rotation);
    let src = image.data();
    let src_w = image.width() as usize;
    let src_wf = image.width() as f64;
    let src_hf = image.height() as f64;

    let row_bytes = width as usize * 4;
    let mut data = vec![0u8; row_bytes * height as usize];
    if row_bytes == 0 {
        return RotatedRaster {
            width,
            height,
            data,
        };
    }

    data.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(py, row)| {
            let cy = py as f64 + 0.5;
            for (px, out) in row.chunks_exact_mut(4).enumerate() {
                let (sx, sy) = transform.apply(px as f64 + 0.5, cy);
                if sx < 0.0 || sy < 0.0 || sx >= src_wf || sy >= src_hf {
                    continue;
                }
                let idx = (sy as usize * src_w + sx as usize) * 4;
                out.copy_from_slice(&src[idx..idx + 4]);
            }
        });

    RotatedRaster {
        width,
        height,
        data,
    }
}
