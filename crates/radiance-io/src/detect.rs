//! Format detection utilities.
//!
//! Detects Radiance files from their signature line or file extension.

use crate::IoResult;
use crate::hdr::SIGNATURE;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats this crate can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Radiance HDR format.
    Hdr,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        if let Ok(format) = Self::from_magic_bytes(path) {
            if format != Format::Unknown {
                return Ok(format);
            }
        }

        Ok(Self::from_extension(path))
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("hdr") | Some("pic") | Some("rgbe") => Format::Hdr,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let file = File::open(path)?;
        let mut header = Vec::with_capacity(SIGNATURE.len() + 1);

        file.take(SIGNATURE.len() as u64 + 1).read_to_end(&mut header)?;
        Ok(Self::from_bytes(&header))
    }

    /// Detects format from raw bytes.
    ///
    /// Requires the full signature followed by a newline.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes.strip_prefix(SIGNATURE.as_bytes()) {
            Some([b'\n', ..]) => Format::Hdr,
            _ => Format::Unknown,
        }
    }

    /// Typical file extensions for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Hdr => &["hdr", "pic", "rgbe"],
            Format::Unknown => &[],
        }
    }
}
