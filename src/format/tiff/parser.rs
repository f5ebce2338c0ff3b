//! TIFF header and directory entry parsing.
//!
//! Inside an Exif APP1 segment the TIFF structure starts right after the
//! `"Exif\0\0"` signature. Every offset stored in the structure is relative
//! to the first byte of this header (the "TIFF base").
//!
//! # TIFF Header Structure
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to IFD0, relative to the TIFF base
//! ```
//!
//! # IFD Entry Structure (12 bytes)
//! ```text
//! Bytes 0-1:  Tag code
//! Bytes 2-3:  Format code
//! Bytes 4-7:  Component count
//! Bytes 8-11: Value (if it fits in 4 bytes) or offset to the value
//! ```

use tracing::warn;

use crate::error::{IoError, TiffError};
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteCursor};

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Magic number following the byte order marker
const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of the embedded TIFF structure.
///
/// Determined once from the header and applied to every multi-byte read of
/// the decode, sub-IFDs included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an Exif segment.
///
/// Offsets are absolute positions in the file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values
    pub byte_order: ByteOrder,

    /// Absolute offset of the first header byte; stored offsets are relative to it
    pub base: usize,

    /// Absolute offset of IFD0
    pub first_ifd_offset: usize,
}

impl TiffHeader {
    /// Parse the TIFF header located at absolute offset `base`.
    ///
    /// # Errors
    /// - `InvalidByteOrder` if the first two bytes are neither II nor MM
    /// - `Io` if the header is truncated
    pub fn parse(cursor: &ByteCursor<'_>, base: usize) -> Result<Self, TiffError> {
        let raw = cursor.slice(base, TIFF_HEADER_SIZE)?;
        // Both markers are palindromes, so the read order does not matter
        let marker = u16::from_le_bytes([raw[0], raw[1]]);
        let byte_order = match marker {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidByteOrder(marker)),
        };

        let magic = cursor.read_u16(base + 2, byte_order)?;
        if magic != TIFF_MAGIC {
            warn!(magic, "unexpected TIFF magic, continuing");
        }

        let ifd0 = cursor.read_u32(base + 4, byte_order)?;

        Ok(TiffHeader {
            byte_order,
            base,
            first_ifd_offset: base.saturating_add(ifd0 as usize),
        })
    }

    /// Turn an offset stored in the file into an absolute buffer position.
    #[inline]
    pub fn resolve(&self, relative: u32) -> usize {
        self.base.saturating_add(relative as usize)
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// One 12-byte directory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag code
    pub tag: u16,

    /// Raw format code as stored in the file
    pub field_type_raw: u16,

    /// Number of components
    pub count: u32,

    /// The raw value field: inline data or an offset, depending on size
    pub value_field: [u8; 4],
}

impl IfdEntry {
    /// Read the entry at absolute offset `offset`.
    pub fn read(cursor: &ByteCursor<'_>, offset: usize, order: ByteOrder) -> Result<Self, IoError> {
        let raw = cursor.slice(offset, IFD_ENTRY_SIZE)?;
        Ok(IfdEntry {
            tag: order.read_u16(&raw[0..2]),
            field_type_raw: order.read_u16(&raw[2..4]),
            count: order.read_u32(&raw[4..8]),
            value_field: [raw[8], raw[9], raw[10], raw[11]],
        })
    }

    /// Decoded field type, `None` for codes the decoder does not handle.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.field_type_raw)
    }

    /// Total size of the value in bytes.
    pub fn value_byte_size(&self) -> Option<u64> {
        self.field_type()
            .map(|ft| ft.size_in_bytes() as u64 * self.count as u64)
    }

    /// Whether the value lives inside `value_field`.
    pub fn is_inline(&self) -> Option<bool> {
        self.field_type().map(|ft| ft.fits_inline(self.count))
    }

    /// Interpret the value field as an offset (relative to the TIFF base).
    #[inline]
    pub fn value_offset(&self, order: ByteOrder) -> u32 {
        order.read_u32(&self.value_field)
    }
}

// =============================================================================
// Tests
// =============================================================================
