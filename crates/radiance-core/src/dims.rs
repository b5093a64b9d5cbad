//! Validated image dimensions.

use crate::{Error, Result};

/// Number of `f32` values stored per decoded pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Width and height of an image, both strictly positive.
///
/// The only way to build one is [`ImageDimensions::new`], so holding an
/// `ImageDimensions` proves both axes are non-zero.
///
/// # Example
///
/// ```rust
/// use radiance_core::ImageDimensions;
///
/// let dims = ImageDimensions::new(3, 2).unwrap();
/// assert_eq!(dims.pixel_count(), 6);
/// assert_eq!(dims.float_len().unwrap(), 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    width: u32,
    height: u32,
}

impl ImageDimensions {
    /// Creates dimensions, rejecting a zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width as u64,
                height as u64,
                "width and height must be positive",
            ));
        }
        Ok(Self { width, height })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (never overflows `u64`).
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Length of the RGBA float buffer, `width * height * 4`.
    ///
    /// Fails if the product does not fit in `usize` on this target.
    pub fn float_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| {
                Error::invalid_dimensions(
                    self.width as u64,
                    self.height as u64,
                    "buffer size overflows usize",
                )
            })
    }

    /// Returns `true` if `(x, y)` lies inside the image.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
