//! JPEG container scanning.
//!
//! Locates the APP1 segment carrying Exif data.
//!
//! # Segment Layout
//!
//! A JPEG file starts with SOI (FFD8) followed by marker segments:
//! ```text
//! FF xx         marker
//! LL LL         big-endian length, counting itself but not the marker
//! ...           LL LL - 2 payload bytes
//! ```
//!
//! # Exif APP1 Payload
//! ```text
//! +0   FF E1        APP1 marker
//! +2   LL LL        segment length
//! +4   "Exif"       signature
//! +8   00 00        padding
//! +10  TIFF header  (all Exif offsets are relative to this point)
//! ```
//!
//! Metadata segments precede the first scan, so scanning stops at SOS/EOI.

use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::format::tiff::ByteOrder;
use crate::io::ByteCursor;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Prefix byte of every marker
pub const MARKER_PREFIX: u8 = 0xFF;

/// Application segment 1 (Exif/XMP)
pub const APP1: u8 = 0xE1;

/// Start Of Scan; entropy-coded data follows
pub const SOS: u8 = 0xDA;

/// End Of Image
pub const EOI: u8 = 0xD9;

/// Exif signature at the start of the APP1 payload
pub const EXIF_SIGNATURE: &[u8; 4] = b"Exif";

/// Offset of the signature from the APP1 marker
const SIGNATURE_OFFSET: usize = 4;

/// Offset of the TIFF header from the APP1 marker
pub const TIFF_HEADER_OFFSET: usize = 10;

// =============================================================================
// Segment
// =============================================================================

/// A marker segment found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Second marker byte (the one after 0xFF)
    pub marker: u8,
    /// Absolute offset of the 0xFF byte
    pub offset: usize,
    /// Declared length, including the two length bytes
    pub length: u16,
}

impl Segment {
    /// Absolute offset just past the segment.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + 2 + self.length as usize
    }

    /// Display name for logs.
    pub fn name(&self) -> String {
        match self.marker {
            0xE0..=0xEF => format!("APP{}", self.marker - 0xE0),
            0xDB => "DQT".to_string(),
            0xC4 => "DHT".to_string(),
            0xC0..=0xCF => format!("SOF{}", self.marker - 0xC0),
            0xFE => "COM".to_string(),
            other => format!("0x{:02X}", other),
        }
    }
}

/// Iterator over the marker segments preceding the image data.
///
/// Fill bytes (repeated 0xFF) before a marker code are skipped. Yields an
/// error and stops when a segment does not start with 0xFF.
pub struct Segments<'a> {
    cursor: ByteCursor<'a>,
    pos: usize,
    done: bool,
}

impl<'a> Segments<'a> {
    fn next_segment(&mut self) -> Result<Option<Segment>, DecodeError> {
        if self.pos >= self.cursor.len() {
            return Ok(None);
        }

        let prefix = self.cursor.read_u8(self.pos)?;
        if prefix != MARKER_PREFIX {
            return Err(DecodeError::MalformedJpeg {
                offset: self.pos as u64,
                found: prefix,
            });
        }

        // Any number of 0xFF fill bytes may precede the marker code
        let mut offset = self.pos;
        let mut marker = self.cursor.read_u8(offset + 1)?;
        while marker == MARKER_PREFIX {
            offset += 1;
            marker = self.cursor.read_u8(offset + 1)?;
        }

        if marker == SOS || marker == EOI {
            debug!(offset, marker, "reached image data");
            return Ok(None);
        }

        let length = self.cursor.read_u16(offset + 2, ByteOrder::BigEndian)?;
        let segment = Segment {
            marker,
            offset,
            length,
        };
        self.pos = segment.end();
        Ok(Some(segment))
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Segment, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_segment() {
            Ok(Some(segment)) => Some(Ok(segment)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Check the SOI marker and iterate the segments that follow it.
pub fn segments(data: &[u8]) -> Result<Segments<'_>, DecodeError> {
    let cursor = ByteCursor::new(data);
    let soi = cursor.read_u16(0, ByteOrder::BigEndian).unwrap_or(0);
    if soi != u16::from_be_bytes(SOI) {
        return Err(DecodeError::MissingStartOfImage(soi));
    }

    Ok(Segments {
        cursor,
        pos: SOI.len(),
        done: false,
    })
}

// =============================================================================
// Exif segment location
// =============================================================================

/// Location of the Exif payload inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifSegment {
    /// The APP1 segment
    pub segment: Segment,
    /// Absolute offset of the TIFF header
    pub tiff_base: usize,
}

impl ExifSegment {
    /// Cursor limited to the declared segment.
    ///
    /// A declared length past the end of the buffer is clamped.
    pub fn cursor<'a>(&self, data: &'a [u8]) -> ByteCursor<'a> {
        if self.segment.end() > data.len() {
            warn!(
                declared_end = self.segment.end(),
                file_len = data.len(),
                "APP1 segment extends past end of file"
            );
        }
        ByteCursor::new(data).truncate(self.segment.end())
    }
}

/// Find the APP1 segment carrying the Exif signature.
///
/// APP1 segments with another signature (XMP, for instance) are skipped.
///
/// # Errors
/// - `MissingStartOfImage` / `MalformedJpeg` for a broken container
/// - `ExifSignatureMissing` if APP1 segments exist but none is Exif
/// - `ExifSegmentNotFound` if there is no APP1 segment at all
pub fn locate_exif(data: &[u8]) -> Result<ExifSegment, DecodeError> {
    let cursor = ByteCursor::new(data);
    let mut non_exif_app1 = None;

    for segment in segments(data)? {
        let segment = segment?;
        debug!(
            segment = %segment.name(),
            offset = segment.offset,
            length = segment.length,
            "found segment"
        );

        if segment.marker != APP1 {
            continue;
        }

        let signature = cursor.slice(segment.offset + SIGNATURE_OFFSET, EXIF_SIGNATURE.len());
        if signature.is_ok_and(|s| s == EXIF_SIGNATURE) {
            return Ok(ExifSegment {
                segment,
                tiff_base: segment.offset + TIFF_HEADER_OFFSET,
            });
        }

        debug!(offset = segment.offset, "APP1 segment without Exif signature");
        non_exif_app1.get_or_insert(segment.offset);
    }

    match non_exif_app1 {
        Some(offset) => Err(DecodeError::ExifSignatureMissing {
            offset: offset as u64,
        }),
        None => Err(DecodeError::ExifSegmentNotFound),
    }
}

// =============================================================================
// Tests
// =============================================================================
