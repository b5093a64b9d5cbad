//! Error types for HDR decoding.
//!
//! Every variant is fatal for the current decode: no partial image is ever
//! returned. [`IoError::kind`] groups variants into the four broad classes
//! callers usually branch on.

use std::io;
use thiserror::Error;

/// Broad classification of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally wrong input: signature, row encoding, checksum,
    /// resolution line, run overflow.
    Format,
    /// Structurally valid header with semantically invalid dimensions.
    Validation,
    /// A header line exceeded the length limit.
    Overflow,
    /// The byte source ended early or failed.
    Stream,
}

/// HDR decode error.
#[derive(Debug, Error)]
pub enum IoError {
    /// First line is not the Radiance signature.
    #[error("unrecognized format: {line:?} is not a Radiance signature")]
    SignatureMismatch {
        /// Offending first line.
        line: String,
    },

    /// File is not recognised as a Radiance image.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Row marker or header declares an encoding other than RLE RGBE.
    #[error("unsupported encoding {row}: {detail}")]
    UnsupportedEncoding {
        /// Row index, or `None` when detected in the header.
        row: RowIndex,
        /// What was found instead.
        detail: String,
    },

    /// Row marker width does not match the image width.
    #[error("row {row}: width checksum {found} does not match image width {expected}")]
    ChecksumMismatch {
        /// Row index.
        row: u32,
        /// Image width from the header.
        expected: u32,
        /// Width encoded in the row marker.
        found: u32,
    },

    /// Resolution line could not be parsed.
    #[error("malformed resolution line {line:?}: {reason}")]
    MalformedResolution {
        /// Offending line.
        line: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A run would write past the end of a channel plane.
    #[error("row {row}, plane {plane}: run of {run} at position {position} overruns scanline")]
    RunOverflow {
        /// Row index.
        row: u32,
        /// Channel plane (0 = R, 1 = G, 2 = B, 3 = exponent).
        plane: usize,
        /// Position within the plane where the run starts.
        position: usize,
        /// Run length.
        run: usize,
    },

    /// Width or height is not a positive integer or is too large.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Parsed width.
        width: i64,
        /// Parsed height.
        height: i64,
        /// Why they were rejected.
        reason: String,
    },

    /// Header line longer than the configured limit.
    #[error("{context} too long: no newline within {limit} bytes")]
    LineTooLong {
        /// Which header line overflowed.
        context: String,
        /// Maximum accepted line length.
        limit: usize,
    },

    /// Byte source ended in the middle of a structure.
    #[error("unexpected end of stream while reading {context}")]
    UnexpectedEof {
        /// What was being read.
        context: String,
    },

    /// Other I/O failure from the byte source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Core container error.
    #[error(transparent)]
    Core(#[from] radiance_core::Error),
}

/// Row position attached to [`IoError::UnsupportedEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowIndex(pub Option<u32>);

impl std::fmt::Display for RowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(row) => write!(f, "at row {row}"),
            None => f.write_str("in header"),
        }
    }
}

impl IoError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SignatureMismatch { .. }
            | Self::UnsupportedFormat(_)
            | Self::UnsupportedEncoding { .. }
            | Self::ChecksumMismatch { .. }
            | Self::MalformedResolution { .. }
            | Self::RunOverflow { .. } => ErrorKind::Format,
            Self::InvalidDimensions { .. } | Self::Core(_) => ErrorKind::Validation,
            Self::LineTooLong { .. } => ErrorKind::Overflow,
            Self::UnexpectedEof { .. } | Self::Io(_) => ErrorKind::Stream,
        }
    }

    /// Maps `UnexpectedEof` from the byte source to [`IoError::UnexpectedEof`]
    /// carrying `context`; other I/O errors pass through.
    pub(crate) fn from_read(err: io::Error, context: impl FnOnce() -> String) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { context: context() }
        } else {
            Self::Io(err)
        }
    }
}

/// Result type for HDR decoding.
pub type IoResult<T> = Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let sig = IoError::SignatureMismatch { line: "#?NOTHDR".into() };
        assert_eq!(sig.kind(), ErrorKind::Format);
        assert!(sig.to_string().contains("#?NOTHDR"));

        let dims = IoError::InvalidDimensions {
            width: 0,
            height: 3,
            reason: "width must be positive".into(),
        };
        assert_eq!(dims.kind(), ErrorKind::Validation);
        let long = IoError::LineTooLong {
            context: "resolution line".into(),
            limit: 500,
        };
        assert_eq!(long.kind(), ErrorKind::Overflow);
        assert!(long.to_string().starts_with("resolution line too long"));
    }

    #[test]
    fn eof_gets_context() {
        let err = IoError::from_read(io::ErrorKind::UnexpectedEof.into(), || "row 3".into());
        assert_eq!(err.kind(), ErrorKind::Stream);
        assert!(err.to_string().contains("row 3"));

        let other = IoError::from_read(io::ErrorKind::PermissionDenied.into(), || "x".into());
        assert!(matches!(other, IoError::Io(_)));
    }

    #[test]
    fn row_index_display() {
        let err = IoError::UnsupportedEncoding {
            row: RowIndex(None),
            detail: "FORMAT=32-bit_rle_xyze".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported encoding in header: FORMAT=32-bit_rle_xyze"
        );
        let err = IoError::UnsupportedEncoding {
            row: RowIndex(Some(7)),
            detail: "marker 01 01".into(),
        };
        assert!(err.to_string().starts_with("unsupported encoding at row 7"));
    }
}
