//! Parallel raster building using Rayon.
//!
//! The decoded image is immutable and every output pixel depends only on
//! its own source sample, so rows are filled independently. Output is
//! identical to [`crate::raster`].
//!
//! # Example
//!
//! ```rust
//! use radiance_core::{DecodedImage, ImageDimensions};
//! use radiance_ops::{parallel, raster};
//!
//! let dims = ImageDimensions::new(64, 32).unwrap();
//! let image = DecodedImage::new(dims, vec![0.5; 64 * 32 * 4]).unwrap();
//! let a = parallel::build_raster_sized(&image, 16, 8).unwrap();
//! let b = raster::build_raster_sized(&image, 16, 8).unwrap();
//! assert_eq!(a, b);
//! ```

use crate::OpsResult;
use crate::raster::{RasterOptions, resample_row};
use radiance_core::{DecodedImage, RasterImage};
use rayon::prelude::*;
use tracing::trace;

/// Parallel version of [`crate::raster::build_raster_sized`].
pub fn build_raster_sized(image: &DecodedImage, width: u32, height: u32) -> OpsResult<RasterImage> {
    build_raster_with(image, &RasterOptions::with_size(width, height))
}

/// Parallel version of [`crate::raster::build_raster_with`].
///
/// Both the identity and the resampling case go through the row sampler;
/// at equal size it maps every output pixel to itself.
pub fn build_raster_with(image: &DecodedImage, options: &RasterOptions) -> OpsResult<RasterImage> {
    let target = options.target(image.dimensions())?;
    trace!(dst_w = target.width(), dst_h = target.height(), "parallel::build_raster");

    let mut pixels = vec![0u32; target.pixel_count() as usize];
    pixels
        .par_chunks_mut(target.width() as usize)
        .enumerate()
        .for_each(|(y, row)| resample_row(image, target, y as u32, row));

    Ok(RasterImage::new(target, pixels)?)
}
