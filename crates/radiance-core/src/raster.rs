//! Packed 8-bit display raster.

use crate::{Error, ImageDimensions, Result};

/// Alpha bits of every raster pixel; rasters are always opaque.
pub const OPAQUE: u32 = 0xFF00_0000;

/// Packs 8-bit channels into an opaque `0xAARRGGBB` word.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    OPAQUE | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Low-dynamic-range raster of packed opaque pixels.
///
/// Pixels are stored row-major as `0xFFRRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    dimensions: ImageDimensions,
    pixels: Vec<u32>,
}

impl RasterImage {
    /// Wraps a packed pixel buffer of exactly `width * height` entries.
    pub fn new(dimensions: ImageDimensions, pixels: Vec<u32>) -> Result<Self> {
        let expected = dimensions.pixel_count() as usize;
        if pixels.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { dimensions, pixels })
    }

    /// Raster dimensions.
    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Packed pixels, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if !self.dimensions.contains(x, y) {
            return None;
        }
        Some(self.pixels[y as usize * self.width() as usize + x as usize])
    }

    /// Pixel at `(x, y)` unpacked to `[R, G, B, A]`.
    pub fn channels(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixel(x, y).map(unpack)
    }

    /// Converts to interleaved RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| unpack(p)).collect()
    }
}

#[inline]
fn unpack(p: u32) -> [u8; 4] {
    [(p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_sets_alpha() {
        assert_eq!(pack_rgb(0, 0, 0), 0xFF00_0000);
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0xFF12_3456);
    }

    #[test]
    fn channels_unpack_in_rgba_order() {
        let dims = ImageDimensions::new(2, 1).unwrap();
        let raster = RasterImage::new(dims, vec![pack_rgb(1, 2, 3), pack_rgb(255, 0, 9)]).unwrap();
        assert_eq!(raster.channels(0, 0), Some([1, 2, 3, 255]));
        assert_eq!(raster.to_rgba8(), vec![1, 2, 3, 255, 255, 0, 9, 255]);
        assert_eq!(raster.pixel(2, 0), None);
    }

    #[test]
    fn rejects_short_buffer() {
        let dims = ImageDimensions::new(2, 2).unwrap();
        assert!(RasterImage::new(dims, vec![OPAQUE; 3]).is_err());
    }
}
