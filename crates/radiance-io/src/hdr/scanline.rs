//! Run-length encoded scanline decoding.
//!
//! Each row starts with a marker `[0x02, 0x02, hi, lo]` where `hi:lo` is the
//! row width, followed by four planes (R, G, B, exponent) encoded as runs:
//! a length byte `n > 128` repeats the next byte `n - 128` times, `n <= 128`
//! copies the next `n` bytes verbatim.

use crate::{IoError, IoResult, RowIndex};
use byteorder::{BigEndian, ReadBytesExt};
use radiance_core::{CHANNELS, ImageDimensions};
use std::io::Read;
use tracing::{debug, trace};

/// First two bytes of every RLE row marker.
pub const ROW_MARKER: [u8; 2] = [0x02, 0x02];

/// Number of interleaved planes per row: R, G, B, exponent.
pub const PLANES: usize = 4;

const EXPONENT_PLANE: usize = 3;

/// Longest literal run a single length byte can describe.
const MAX_LITERAL: usize = 128;

/// Run currently being applied to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    /// No run active; the next byte is a length byte.
    Pending,
    /// `len` copies of `value`.
    Repeat { len: usize, value: u8 },
    /// `len` bytes read verbatim from the stream.
    Literal { len: usize },
}

/// Position inside the row being filled.
#[derive(Debug, Clone, Copy)]
struct PlaneCursor {
    plane: usize,
    pos: usize,
}

impl PlaneCursor {
    /// Index of the current position in the interleaved scanline buffer.
    #[inline]
    fn index(&self) -> usize {
        self.pos * PLANES + self.plane
    }
}

/// Decodes rows into a reusable channel-interleaved byte buffer.
///
/// One decoder serves one decode call; the buffer holds `width * 4` bytes
/// laid out as `buffer[x * 4 + plane]`.
#[derive(Debug)]
pub struct ScanlineDecoder {
    width: usize,
    buffer: Vec<u8>,
}

impl ScanlineDecoder {
    /// Creates a decoder for rows of `width` pixels.
    pub fn new(width: u32) -> Self {
        let width = width as usize;
        Self {
            width,
            buffer: vec![0; width * PLANES],
        }
    }

    /// Undecoded RGBE bytes of the last decoded row.
    #[inline]
    pub fn scanline(&self) -> &[u8] {
        &self.buffer
    }

    /// Reads the marker and all four planes of row `row`.
    pub fn decode_row<R: Read>(&mut self, reader: &mut R, row: u32) -> IoResult<()> {
        self.read_marker(reader, row)?;
        for plane in 0..PLANES {
            self.decode_plane(reader, row, plane)?;
        }
        Ok(())
    }

    /// Validates the 4-byte row marker.
    pub fn read_marker<R: Read>(&self, reader: &mut R, row: u32) -> IoResult<()> {
        let a = read_byte(reader, row)?;
        let b = read_byte(reader, row)?;
        if [a, b] != ROW_MARKER {
            return Err(IoError::UnsupportedEncoding {
                row: RowIndex(Some(row)),
                detail: format!("row marker {a:02x} {b:02x}, only run-length rows are supported"),
            });
        }
        let found = reader
            .read_u16::<BigEndian>()
            .map_err(|e| IoError::from_read(e, || format!("row {row} marker")))?;
        if found as usize != self.width {
            return Err(IoError::ChecksumMismatch {
                row,
                expected: self.width as u32,
                found: found as u32,
            });
        }
        Ok(())
    }

    /// Fills exactly `width` positions of one plane.
    ///
    /// A run that would pass the end of the plane is rejected rather than
    /// spilling into the next plane.
    pub fn decode_plane<R: Read>(
        &mut self,
        reader: &mut R,
        row: u32,
        plane: usize,
    ) -> IoResult<()> {
        let mut cursor = PlaneCursor { plane, pos: 0 };
        let mut run = Run::Pending;
        let mut literal = [0u8; MAX_LITERAL];

        loop {
            run = match run {
                Run::Pending if cursor.pos == self.width => break,
                Run::Pending => {
                    let n = read_byte(reader, row)? as usize;
                    let len = if n > 128 { n - 128 } else { n };
                    if cursor.pos + len > self.width {
                        return Err(IoError::RunOverflow {
                            row,
                            plane,
                            position: cursor.pos,
                            run: len,
                        });
                    }
                    if n > 128 {
                        Run::Repeat {
                            len,
                            value: read_byte(reader, row)?,
                        }
                    } else {
                        Run::Literal { len }
                    }
                }
                Run::Repeat { len, value } => {
                    for _ in 0..len {
                        self.buffer[cursor.index()] = value;
                        cursor.pos += 1;
                    }
                    Run::Pending
                }
                Run::Literal { len } => {
                    let bytes = &mut literal[..len];
                    reader
                        .read_exact(bytes)
                        .map_err(|e| IoError::from_read(e, || format!("row {row} literal run")))?;
                    for &b in bytes.iter() {
                        self.buffer[cursor.index()] = b;
                        cursor.pos += 1;
                    }
                    Run::Pending
                }
            };
        }
        Ok(())
    }

    /// Appends the last decoded row to `out` as RGBA floats.
    pub fn expand_row(&self, out: &mut Vec<f32>) {
        for px in self.buffer.chunks_exact(PLANES) {
            let [r, g, b] = rgbe_to_f32(px[0], px[1], px[2], px[EXPONENT_PLANE]);
            out.extend_from_slice(&[r, g, b, 1.0]);
        }
    }
}

/// Converts one RGBE quadruple to linear RGB.
///
/// Exponent `0` is black; otherwise each mantissa is scaled by `2^(e - 136)`.
#[inline]
pub fn rgbe_to_f32(r: u8, g: u8, b: u8, e: u8) -> [f32; 3] {
    if e == 0 {
        return [0.0; 3];
    }
    // f64 keeps 2^-135 normal; the products are exact before the cast.
    let scale = 2.0_f64.powi(e as i32 - 128 - 8);
    [
        (r as f64 * scale) as f32,
        (g as f64 * scale) as f32,
        (b as f64 * scale) as f32,
    ]
}

/// Decodes every row of an image into a `width * height * 4` float buffer.
pub fn decode_pixels<R: Read>(reader: &mut R, dimensions: ImageDimensions) -> IoResult<Vec<f32>> {
    trace!(width = dimensions.width(), height = dimensions.height(), "hdr::decode_pixels");

    let len = dimensions.float_len()?;
    let mut out = Vec::with_capacity(len);
    let mut decoder = ScanlineDecoder::new(dimensions.width());

    for row in 0..dimensions.height() {
        decoder.decode_row(reader, row)?;
        decoder.expand_row(&mut out);
    }
    debug_assert_eq!(out.len(), len);
    debug_assert_eq!(out.len() % CHANNELS, 0);

    debug!(rows = dimensions.height(), floats = out.len(), "Decoded HDR scanlines");
    Ok(out)
}

fn read_byte<R: Read>(reader: &mut R, row: u32) -> IoResult<u8> {
    reader
        .read_u8()
        .map_err(|e| IoError::from_read(e, || format!("row {row} pixel data")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_relative_eq;

    fn plane(decoder: &ScanlineDecoder, plane: usize) -> Vec<u8> {
        decoder.scanline().iter().skip(plane).step_by(PLANES).copied().collect()
    }

    #[test]
    fn repeat_and_literal_runs_fill_plane() {
        let mut decoder = ScanlineDecoder::new(5);
        // repeat 3 x 0x07, then literal [1, 2]
        let data: &[u8] = &[128 + 3, 0x07, 2, 1, 2];
        decoder.decode_plane(&mut &data[..], 0, 1).unwrap();
        assert_eq!(plane(&decoder, 1), vec![7, 7, 7, 1, 2]);
        assert_eq!(plane(&decoder, 0), vec![0; 5]);
    }

    #[test]
    fn zero_length_literal_is_skipped() {
        let mut decoder = ScanlineDecoder::new(2);
        let data: &[u8] = &[0, 2, 9, 8];
        decoder.decode_plane(&mut &data[..], 0, 2).unwrap();
        assert_eq!(plane(&decoder, 2), vec![9, 8]);
    }

    #[test]
    fn overrun_is_fatal() {
        let mut decoder = ScanlineDecoder::new(4);
        let data: &[u8] = &[128 + 3, 1, 128 + 2, 5];
        let err = decoder.decode_plane(&mut &data[..], 6, 0).unwrap_err();
        match err {
            IoError::RunOverflow {
                row,
                plane,
                position,
                run,
            } => assert_eq!((row, plane, position, run), (6, 0, 3, 2)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn marker_checksum_must_match_width() {
        let marker: &[u8] = &[0x02, 0x02, 0x00, 0x04];
        assert!(ScanlineDecoder::new(4).read_marker(&mut &marker[..], 0).is_ok());

        let err = ScanlineDecoder::new(5).read_marker(&mut &marker[..], 2).unwrap_err();
        assert!(matches!(
            err,
            IoError::ChecksumMismatch {
                row: 2,
                expected: 5,
                found: 4
            }
        ));
    }

    #[test]
    fn flat_rows_are_unsupported() {
        let marker: &[u8] = &[0x01, 0x01, 0x01, 0x00];
        let err = ScanlineDecoder::new(4).read_marker(&mut &marker[..], 0).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedEncoding { .. }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn exponent_zero_is_black() {
        assert_eq!(rgbe_to_f32(255, 12, 200, 0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn exponent_scaling() {
        assert_eq!(rgbe_to_f32(255, 128, 1, 136), [255.0, 128.0, 1.0]);
        let [r, _, _] = rgbe_to_f32(128, 0, 0, 128);
        assert_relative_eq!(r, 0.5);
        let [r, _, _] = rgbe_to_f32(255, 0, 0, 1);
        assert!(r > 0.0);
    }

    #[test]
    fn single_pixel_row() {
        let data: &[u8] = &[0x02, 0x02, 0x00, 0x01, 1, 0xFF, 1, 0xFF, 1, 0xFF, 1, 0x88];
        let dims = ImageDimensions::new(1, 1).unwrap();
        let out = decode_pixels(&mut &data[..], dims).unwrap();
        assert_eq!(out, vec![255.0, 255.0, 255.0, 1.0]);
    }

    #[test]
    fn truncated_run_is_stream_error() {
        let data: &[u8] = &[0x02, 0x02, 0x00, 0x02, 2, 0xFF];
        let dims = ImageDimensions::new(2, 1).unwrap();
        let err = decode_pixels(&mut &data[..], dims).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Stream);
        assert!(err.to_string().contains("row 0"));
    }
}
