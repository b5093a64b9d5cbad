//! Reader trait for decoders producing [`DecodedImage`].

use crate::IoResult;
use radiance_core::DecodedImage;
use std::path::Path;

/// Trait for image format readers.
///
/// # Example
///
/// ```rust,ignore
/// use radiance_io::{ImageReader, hdr::HdrReader};
///
/// let reader = HdrReader::new();
/// let from_disk = reader.read("sky.hdr")?;
/// let from_ram = reader.read_from_memory(&bytes)?;
/// ```
pub trait ImageReader {
    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<DecodedImage>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<DecodedImage>;
}
