//! # radiance-core
//!
//! Core types shared by the Radiance HDR decoder and the raster builder:
//!
//! - [`ImageDimensions`] - strictly positive width/height
//! - [`DecodedImage`] - linear RGBA `f32` buffer produced by decoding
//! - [`RasterImage`] - packed 8-bit opaque raster for display
//! - [`Error`] - validation errors for the containers above
//!
//! ## Crate Structure
//!
//! ```text
//! radiance-core (this crate)
//!    ^
//!    |
//!    +-- radiance-io  (header parser, scanline decoder)
//!    +-- radiance-ops (tone mapping, raster builder)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod dims;
pub mod error;
pub mod image;
pub mod raster;

pub use dims::{CHANNELS, ImageDimensions};
pub use error::{Error, Result};
pub use image::DecodedImage;
pub use raster::{OPAQUE, RasterImage, pack_rgb};
