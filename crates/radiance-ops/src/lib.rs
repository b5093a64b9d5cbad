//! # radiance-ops
//!
//! Display conversion for decoded Radiance HDR images.
//!
//! # Modules
//!
//! - [`tonemap`] - per-channel Reinhard curve to 8-bit
//! - [`raster`] - identity and nearest-neighbour raster building
//! - [`parallel`] - row-parallel raster building (feature `parallel`)
//!
//! # Example
//!
//! ```rust,ignore
//! use radiance_ops::raster::build_raster_sized;
//!
//! let image = radiance_io::hdr::read("sky.hdr")?;
//! let thumbnail = build_raster_sized(&image, 256, 128)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod raster;
pub mod tonemap;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use raster::{
    DEFAULT_MAX_PIXELS, RasterOptions, build_raster, build_raster_sized, build_raster_with,
};
pub use tonemap::{reinhard, reinhard_rgb};
