//! Linear floating-point image produced by the decoder.
//!
//! [`DecodedImage`] owns a flat, row-major `Vec<f32>` holding four values per
//! pixel in `[R, G, B, A]` order. Once built it exposes no mutable access, so
//! it can be shared freely across threads.

use crate::{CHANNELS, Error, ImageDimensions, Result};

/// Decoded linear-light RGBA image.
///
/// # Example
///
/// ```rust
/// use radiance_core::{DecodedImage, ImageDimensions};
///
/// let dims = ImageDimensions::new(2, 1).unwrap();
/// let img = DecodedImage::new(dims, vec![1.0, 0.5, 0.25, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(img.pixel(0, 0), Some([1.0, 0.5, 0.25, 1.0]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    dimensions: ImageDimensions,
    data: Vec<f32>,
}

impl DecodedImage {
    /// Wraps a float buffer, checking its length against `dimensions`.
    pub fn new(dimensions: ImageDimensions, data: Vec<f32>) -> Result<Self> {
        let expected = dimensions.float_len()?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dimensions, data })
    }

    /// Image dimensions.
    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Raw RGBA float buffer, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the image, returning the RGBA float buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// RGBA values of the pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if !self.dimensions.contains(x, y) {
            return None;
        }
        let i = (y as usize * self.width() as usize + x as usize) * CHANNELS;
        let p = &self.data[i..i + CHANNELS];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Like [`pixel`](Self::pixel) but reports the bounds violation.
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<[f32; 4]> {
        self.pixel(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width(), self.height()))
    }

    /// Iterates over rows, each a slice of `width * 4` floats.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.width() as usize * CHANNELS)
    }
}
