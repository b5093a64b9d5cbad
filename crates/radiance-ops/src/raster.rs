//! Conversion of decoded float images into displayable 8-bit rasters.
//!
//! Two paths produce the same tone curve:
//!
//! - **Identity**: target size equals source size; one row-major pass.
//! - **Resample**: nearest-neighbour point sampling with truncating integer
//!   mapping `src_x = x * src_w / dst_w`, `src_y = y * src_h / dst_h`.
//!
//! Point sampling aliases on downscale and looks blocky on upscale; no
//! filtering is applied.
//!
//! # Example
//!
//! ```rust
//! use radiance_core::{DecodedImage, ImageDimensions};
//! use radiance_ops::raster::{build_raster, build_raster_sized};
//!
//! let dims = ImageDimensions::new(2, 1).unwrap();
//! let image = DecodedImage::new(dims, vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
//!
//! let raster = build_raster(&image).unwrap();
//! assert_eq!(raster.channels(0, 0), Some([128, 128, 128, 255]));
//!
//! let thumb = build_raster_sized(&image, 1, 1).unwrap();
//! assert_eq!(thumb.pixel(0, 0), raster.pixel(0, 0));
//! ```

use crate::tonemap::reinhard_rgb;
use crate::{OpsError, OpsResult};
use radiance_core::{CHANNELS, DecodedImage, ImageDimensions, RasterImage, pack_rgb};
use tracing::{debug, trace};

/// Largest raster built by default, in pixels (1 GiB of packed output).
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// Target size for raster building; unset axes keep the source size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Output width. Default: source width.
    pub width: Option<u32>,
    /// Output height. Default: source height.
    pub height: Option<u32>,
    /// Largest accepted output, in pixels.
    pub max_pixels: u64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl RasterOptions {
    /// Options producing a raster of exactly `width` x `height`.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Sets the output pixel cap.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Resolves the output size against a source image.
    ///
    /// Fails if either axis is zero or the raster would exceed
    /// [`max_pixels`](Self::max_pixels) or the address space.
    pub fn target(&self, source: ImageDimensions) -> OpsResult<ImageDimensions> {
        let width = self.width.unwrap_or(source.width());
        let height = self.height.unwrap_or(source.height());
        let target = ImageDimensions::new(width, height).map_err(|_| {
            OpsError::InvalidDimensions(format!(
                "raster target {width}x{height} must be positive"
            ))
        })?;

        let pixels = target.pixel_count();
        if pixels > self.max_pixels || usize::try_from(pixels).is_err() {
            return Err(OpsError::InvalidDimensions(format!(
                "raster target {target} has {pixels} pixels, limit is {}",
                self.max_pixels
            )));
        }
        Ok(target)
    }
}

/// Builds a raster at the source size.
pub fn build_raster(image: &DecodedImage) -> OpsResult<RasterImage> {
    trace!(width = image.width(), height = image.height(), "raster::build_raster");
    let pixels = image
        .as_slice()
        .chunks_exact(CHANNELS)
        .map(tonemap_pixel)
        .collect();
    Ok(RasterImage::new(image.dimensions(), pixels)?)
}

/// Builds a raster of `width` x `height`, resampling if the size differs.
pub fn build_raster_sized(image: &DecodedImage, width: u32, height: u32) -> OpsResult<RasterImage> {
    build_raster_with(image, &RasterOptions::with_size(width, height))
}

/// Builds a raster according to `options`.
pub fn build_raster_with(image: &DecodedImage, options: &RasterOptions) -> OpsResult<RasterImage> {
    let target = options.target(image.dimensions())?;
    if target == image.dimensions() {
        return build_raster(image);
    }

    debug!(
        src_w = image.width(),
        src_h = image.height(),
        dst_w = target.width(),
        dst_h = target.height(),
        "Resampling raster"
    );

    let mut pixels = vec![0u32; target.pixel_count() as usize];
    for (y, row) in pixels.chunks_exact_mut(target.width() as usize).enumerate() {
        resample_row(image, target, y as u32, row);
    }
    Ok(RasterImage::new(target, pixels)?)
}

/// Fills one output row of a resampled raster.
pub(crate) fn resample_row(image: &DecodedImage, target: ImageDimensions, y: u32, row: &mut [u32]) {
    let src = image.as_slice();
    let src_w = image.width() as usize;
    let sy = source_coord(y, image.height(), target.height());
    let row_start = sy * src_w;

    for (x, out) in row.iter_mut().enumerate() {
        let sx = source_coord(x as u32, image.width(), target.width());
        let i = (row_start + sx) * CHANNELS;
        *out = tonemap_pixel(&src[i..i + CHANNELS]);
    }
}

/// Nearest source coordinate for output coordinate `d`, truncating.
#[inline]
pub fn source_coord(d: u32, src_len: u32, dst_len: u32) -> usize {
    (d as u64 * src_len as u64 / dst_len as u64) as usize
}

#[inline]
fn tonemap_pixel(px: &[f32]) -> u32 {
    let [r, g, b] = reinhard_rgb([px[0], px[1], px[2]]);
    pack_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tonemap::reinhard;

    /// Image whose red channel encodes the pixel index.
    fn indexed(w: u32, h: u32) -> DecodedImage {
        let dims = ImageDimensions::new(w, h).unwrap();
        let data = (0..w * h).flat_map(|i| [i as f32, 0.0, 0.0, 1.0]).collect();
        DecodedImage::new(dims, data).unwrap()
    }

    fn red(raster: &RasterImage, x: u32, y: u32) -> u8 {
        raster.channels(x, y).unwrap()[0]
    }

    #[test]
    fn identity_samples_every_pixel_in_order() {
        let image = indexed(4, 3);
        let raster = build_raster(&image).unwrap();
        assert_eq!(raster.dimensions(), image.dimensions());
        for (i, &p) in raster.as_slice().iter().enumerate() {
            assert_eq!(p, pack_rgb(reinhard(i as f32), 0, 0));
        }
    }

    #[test]
    fn same_size_options_take_identity_path() {
        let image = indexed(3, 2);
        let a = build_raster(&image).unwrap();
        let b = build_raster_with(&image, &RasterOptions::default()).unwrap();
        let c = build_raster_sized(&image, 3, 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn downsample_truncates() {
        let image = indexed(4, 4);
        let raster = build_raster_sized(&image, 2, 2).unwrap();
        // (1, 1) -> source (2, 2) -> index 10
        assert_eq!(red(&raster, 1, 1), reinhard(10.0));
        assert_eq!(red(&raster, 1, 0), reinhard(2.0));
        assert_eq!(red(&raster, 0, 1), reinhard(8.0));
    }

    #[test]
    fn upsample_uses_source_row_stride() {
        let image = indexed(2, 3);
        let raster = build_raster_sized(&image, 4, 6).unwrap();
        // (3, 5) -> source (1, 2) -> index 5
        assert_eq!(red(&raster, 3, 5), reinhard(5.0));
        assert_eq!(red(&raster, 0, 2), reinhard(2.0));
    }

    #[test]
    fn partial_options_keep_other_axis() {
        let image = indexed(5, 2);
        let options = RasterOptions {
            width: Some(3),
            ..RasterOptions::default()
        };
        let raster = build_raster_with(&image, &options).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
    }

    #[test]
    fn zero_target_is_rejected() {
        let image = indexed(2, 2);
        let err = build_raster_sized(&image, 0, 2).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn oversized_target_is_rejected() {
        let image = indexed(1, 1);
        let err = build_raster_sized(&image, u32::MAX, u32::MAX).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));

        let capped = RasterOptions::with_size(4, 4).with_max_pixels(15);
        let err = build_raster_with(&image, &capped).unwrap_err();
        assert!(err.to_string().contains("limit is 15"));

        let fits = RasterOptions::with_size(4, 4).with_max_pixels(16);
        assert_eq!(build_raster_with(&image, &fits).unwrap().as_slice().len(), 16);
    }

    #[test]
    fn source_coord_is_floor() {
        assert_eq!(source_coord(2, 3, 4), 1);
        assert_eq!(source_coord(3, 3, 4), 2);
        assert_eq!(source_coord(0, 3, 4), 0);
    }
}
