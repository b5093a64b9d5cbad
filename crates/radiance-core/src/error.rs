//! Error types for radiance-core operations.
//!
//! The [`Error`] enum covers failures that can occur while constructing or
//! accessing the core image containers:
//! - Dimension validation (zero or overflowing sizes)
//! - Buffer/dimension consistency checks
//! - Pixel bounds checking
//!
//! # Usage
//!
//! ```rust
//! use radiance_core::{Error, ImageDimensions};
//!
//! let err = ImageDimensions::new(0, 4).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Used By
//!
//! - [`crate::ImageDimensions`] - dimension validation
//! - [`crate::DecodedImage`] / [`crate::RasterImage`] - buffer checks
//! - `radiance-io` - wrapped into the decoder's error type

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core image containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height is zero, or the buffer size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u64,
        /// Requested height
        height: u64,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Supplied buffer does not match the size implied by the dimensions.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u64, height: u64, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
