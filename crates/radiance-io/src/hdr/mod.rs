//! Radiance HDR (RGBE) reader.
//!
//! Decodes run-length encoded `32-bit_rle_rgbe` files into a linear
//! [`DecodedImage`] with four floats per pixel (R, G, B and a constant
//! alpha of `1.0`).
//!
//! # Example
//!
//! ```rust
//! use radiance_io::hdr;
//!
//! let mut bytes = b"#?RADIANCE\n\n-Y 1 +X 1\n".to_vec();
//! bytes.extend_from_slice(&[2, 2, 0, 1, 1, 255, 1, 255, 1, 255, 1, 136]);
//!
//! let image = hdr::decode_from_memory(&bytes).unwrap();
//! assert_eq!(image.pixel(0, 0), Some([255.0, 255.0, 255.0, 1.0]));
//! ```
//!
//! # Limitations
//!
//! - Only run-length encoded rows; flat rows fail with
//!   [`IoError::UnsupportedEncoding`].
//! - XYZE files fail instead of being decoded as RGB.
//! - Orientation signs on the resolution line are not applied.

mod header;
mod scanline;

pub use header::{
    HdrHeader, MAX_LINE_LEN, Orientation, RGBE_FORMAT, SIGNATURE, parse_resolution, read_header,
};
pub use scanline::{PLANES, ROW_MARKER, ScanlineDecoder, decode_pixels, rgbe_to_f32};

use crate::{ImageReader, IoError, IoResult};
use radiance_core::DecodedImage;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Default upper bound on `width * height` accepted before allocating.
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

// === Reader Options ===

/// Options for reading HDR files.
///
/// # Example
///
/// ```rust
/// use radiance_io::hdr::{HdrReader, HdrReaderOptions};
///
/// let reader = HdrReader::with_options(
///     HdrReaderOptions::default().with_max_pixels(4096 * 4096),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdrReaderOptions {
    /// Longest accepted header line, newline excluded. Default: 500.
    pub max_line_len: usize,
    /// Largest accepted pixel count. Default: 2^28.
    pub max_pixels: u64,
}

impl Default for HdrReaderOptions {
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl HdrReaderOptions {
    /// Sets the header line length limit.
    pub fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    /// Sets the pixel count limit.
    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = pixels;
        self
    }
}

// === HdrReader ===

/// Radiance HDR reader.
///
/// The reader itself holds only options; each call decodes independently
/// and owns its scanline buffer, so one reader can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HdrReader {
    options: HdrReaderOptions,
}

impl HdrReader {
    /// Creates a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with custom options.
    pub fn with_options(options: HdrReaderOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &HdrReaderOptions {
        &self.options
    }

    /// Decodes an image from any byte source positioned at offset 0.
    pub fn read_from<R: Read>(&self, reader: R) -> IoResult<DecodedImage> {
        self.read_buffered(&mut BufReader::new(reader))
    }

    /// Reads only the header, leaving the source at the first row.
    pub fn read_header_from<R: BufRead>(&self, reader: &mut R) -> IoResult<HdrHeader> {
        read_header(reader, self.options.max_line_len)
    }

    /// Decodes an image from a buffered byte source.
    pub fn read_buffered<R: BufRead>(&self, reader: &mut R) -> IoResult<DecodedImage> {
        trace!("hdr::read_buffered");
        let header = self.read_header_from(reader)?;
        let dims = header.dimensions;

        if dims.pixel_count() > self.options.max_pixels {
            return Err(IoError::InvalidDimensions {
                width: dims.width() as i64,
                height: dims.height() as i64,
                reason: format!("exceeds limit of {} pixels", self.options.max_pixels),
            });
        }

        let data = decode_pixels(reader, dims)?;
        let image = DecodedImage::new(dims, data)?;
        debug!(width = image.width(), height = image.height(), "Decoded HDR image");
        Ok(image)
    }
}

impl ImageReader for HdrReader {
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<DecodedImage> {
        let path = path.as_ref();
        trace!(path = %path.display(), "hdr::read");
        let file = File::open(path)?;
        self.read_buffered(&mut BufReader::new(file))
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<DecodedImage> {
        self.read_buffered(&mut &data[..])
    }
}

// === Convenience Functions ===

/// Reads an HDR file from the given path with default options.
///
/// # Example
///
/// ```rust,ignore
/// use radiance_io::hdr;
///
/// let image = hdr::read("sky.hdr")?;
/// println!("Size: {}x{}", image.width(), image.height());
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<DecodedImage> {
    HdrReader::default().read(path)
}

/// Decodes an HDR image from a byte source with default options.
pub fn decode<R: Read>(reader: R) -> IoResult<DecodedImage> {
    HdrReader::default().read_from(reader)
}

/// Decodes an HDR image held in memory with default options.
pub fn decode_from_memory(data: &[u8]) -> IoResult<DecodedImage> {
    HdrReader::default().read_from_memory(data)
}
