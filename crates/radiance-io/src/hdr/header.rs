//! Radiance header parsing.
//!
//! The header is plain text: a signature line, free-form metadata lines up to
//! an empty line, then a resolution line such as `-Y 768 +X 1024`.

use crate::{IoError, IoResult, RowIndex};
use byteorder::ReadBytesExt;
use radiance_core::ImageDimensions;
use std::io::BufRead;
use tracing::{debug, trace};

/// Exact first line of every supported file.
pub const SIGNATURE: &str = "#?RADIANCE";

/// Default maximum length of a header line, newline excluded.
pub const MAX_LINE_LEN: usize = 500;

/// The only pixel encoding accepted in a `FORMAT=` line.
pub const RGBE_FORMAT: &str = "32-bit_rle_rgbe";

/// Order of the axes on the resolution line.
///
/// The sign characters are recorded by the file but not applied; pixels are
/// always returned in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `±Y <rows> ±X <cols>`, the common layout.
    RowsFirst,
    /// `±X <cols> ±Y <rows>`.
    ColumnsFirst,
}

/// Parsed Radiance header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdrHeader {
    /// Image size.
    pub dimensions: ImageDimensions,
    /// Axis order of the resolution line.
    pub orientation: Orientation,
    /// Metadata lines between the signature and the blank line, verbatim.
    pub metadata: Vec<String>,
}

impl HdrHeader {
    /// Value of the first `KEY=value` metadata line with the given key.
    ///
    /// ```rust
    /// # use radiance_io::hdr::read_header;
    /// let bytes = b"#?RADIANCE\nEXPOSURE=1.5\n\n-Y 1 +X 1\n";
    /// let header = read_header(&mut &bytes[..], 500).unwrap();
    /// assert_eq!(header.attribute("EXPOSURE"), Some("1.5"));
    /// ```
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.metadata.iter().find_map(|line| {
            let (k, v) = line.split_once('=')?;
            (k.trim() == key).then(|| v.trim())
        })
    }
}

/// Reads and validates the header, leaving `reader` at the first row marker.
pub fn read_header<R: BufRead>(reader: &mut R, max_line_len: usize) -> IoResult<HdrHeader> {
    trace!(max_line_len, "hdr::read_header");

    let signature = read_line(reader, max_line_len, "signature line")?;
    if signature != SIGNATURE {
        return Err(IoError::SignatureMismatch { line: signature });
    }

    let mut metadata = Vec::new();
    loop {
        let line = read_line(reader, max_line_len, "header metadata")?;
        if line.is_empty() {
            break;
        }
        check_format_line(&line)?;
        metadata.push(line);
    }

    let resolution = read_line(reader, max_line_len, "resolution line")?;
    let (dimensions, orientation) = parse_resolution(&resolution)?;

    debug!(
        width = dimensions.width(),
        height = dimensions.height(),
        ?orientation,
        metadata_lines = metadata.len(),
        "Parsed HDR header"
    );

    Ok(HdrHeader {
        dimensions,
        orientation,
        metadata,
    })
}

/// Reads one `\n`-terminated line, newline excluded.
///
/// At most `limit` bytes may precede the newline. A `\r` before the newline
/// stays in the line.
pub(crate) fn read_line<R: BufRead>(
    reader: &mut R,
    limit: usize,
    context: &str,
) -> IoResult<String> {
    let mut bytes = Vec::new();
    loop {
        let b = reader
            .read_u8()
            .map_err(|e| IoError::from_read(e, || context.to_string()))?;
        if b == b'\n' {
            break;
        }
        if bytes.len() == limit {
            return Err(IoError::LineTooLong {
                context: context.to_string(),
                limit,
            });
        }
        bytes.push(b);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn check_format_line(line: &str) -> IoResult<()> {
    if let Some(value) = line.strip_prefix("FORMAT=") {
        if value.trim() != RGBE_FORMAT {
            return Err(IoError::UnsupportedEncoding {
                row: RowIndex(None),
                detail: format!("FORMAT={}", value.trim()),
            });
        }
    }
    Ok(())
}

/// Parses a resolution line into dimensions and axis order.
///
/// Width and height come from the 2nd and 4th tokens; which is which depends
/// on whether the first token names the `Y` axis.
pub fn parse_resolution(line: &str) -> IoResult<(ImageDimensions, Orientation)> {
    let malformed = |reason: String| IoError::MalformedResolution {
        line: line.to_string(),
        reason,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(malformed(format!("expected 4 tokens, found {}", tokens.len())));
    }

    let axis = tokens[0]
        .chars()
        .last()
        .ok_or_else(|| malformed("empty axis token".into()))?;
    let orientation = if axis == 'Y' {
        Orientation::RowsFirst
    } else {
        Orientation::ColumnsFirst
    };

    let parse = |token: &str| {
        token
            .parse::<i64>()
            .map_err(|e| malformed(format!("{token:?} is not a number: {e}")))
    };
    let (width, height) = match orientation {
        Orientation::RowsFirst => (parse(tokens[3])?, parse(tokens[1])?),
        Orientation::ColumnsFirst => (parse(tokens[1])?, parse(tokens[3])?),
    };

    let invalid = |reason: &str| IoError::InvalidDimensions {
        width,
        height,
        reason: reason.to_string(),
    };
    if width <= 0 {
        return Err(invalid("width must be positive"));
    }
    if height <= 0 {
        return Err(invalid("height must be positive"));
    }
    let w = u32::try_from(width).map_err(|_| invalid("width exceeds u32"))?;
    let h = u32::try_from(height).map_err(|_| invalid("height exceeds u32"))?;

    Ok((ImageDimensions::new(w, h)?, orientation))
}
