//! # radiance-io
//!
//! Decoder for the Radiance high-dynamic-range raster format (`.hdr`, `.pic`).
//!
//! The decoder reads the textual header, then decodes each run-length
//! encoded scanline into linear `f32` RGB with a constant alpha of `1.0`.
//!
//! # Architecture
//!
//! - [`hdr::read_header`] - signature, metadata block and resolution line
//! - [`hdr::ScanlineDecoder`] - per-row, per-plane run-length state machine
//! - [`hdr::HdrReader`] - configurable entry point implementing [`ImageReader`]
//! - [`Format`] - signature/extension detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use radiance_io::hdr;
//!
//! let image = hdr::read("sky.hdr")?;
//! let [r, g, b, a] = image.pixel(0, 0).unwrap();
//! ```
//!
//! # Errors
//!
//! Every failure is fatal for the decode and no partial image is returned.
//! [`IoError::kind`] sorts failures into format, validation, overflow and
//! stream errors.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod traits;

pub mod hdr;

pub use detect::Format;
pub use error::{ErrorKind, IoError, IoResult, RowIndex};
pub use traits::ImageReader;

use radiance_core::DecodedImage;
use std::path::Path;

/// Reads an image from a file, checking that it is a Radiance file first.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not recognised as
/// Radiance HDR, or fails to decode.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<DecodedImage> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Hdr => hdr::read(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}
