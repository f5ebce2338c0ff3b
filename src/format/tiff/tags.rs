//! TIFF field type and tag vocabulary.
//!
//! This module defines:
//! - Field types (format codes) that determine how entry values are encoded
//! - Tag namespaces, which select the name table used for an IFD
//! - The pointer tags linking IFD0 to the Exif and GPS sub-IFDs

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types handled by the decoder.
///
/// Each field type has a fixed unit size, which decides whether a value fits
/// inline in the 4-byte value field of an IFD entry.
///
/// Note: TIFF defines further types (signed byte/short/long, float, double)
/// that Exif writers practically never use for the tags we report; entries
/// with those codes are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator (8 bytes)
    Rational = 5,

    /// Opaque byte data (1 byte per element)
    Undefined = 7,

    /// Two signed 32-bit integers: numerator, denominator (8 bytes)
    SRational = 10,
}

impl FieldType {
    /// Size of a single component of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from its numeric format code.
    ///
    /// Returns `None` for unsupported or unknown codes.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            10 => Some(FieldType::SRational),
            _ => None,
        }
    }

    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Check if `count` components of this type fit inline in an entry.
    ///
    /// The rule is the same for every type: the total byte size must not
    /// exceed the 4-byte value field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        (self.size_in_bytes() as u64) * (count as u64) <= Self::INLINE_THRESHOLD as u64
    }

    /// Human-readable name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "Unsigned Byte",
            FieldType::Ascii => "ASCII String",
            FieldType::Short => "Unsigned Short",
            FieldType::Long => "Unsigned Long",
            FieldType::Rational => "Unsigned Rational",
            FieldType::Undefined => "Undefined",
            FieldType::SRational => "Signed Rational",
        }
    }
}

// =============================================================================
// Tag Namespaces
// =============================================================================

/// Which tag table an IFD's entries are named from.
///
/// IFD0 and the Exif sub-IFD share the Exif table; the GPS sub-IFD reuses
/// small tag codes (0x0000..) with different meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagNamespace {
    Exif,
    Gps,
}

// =============================================================================
// Pointer Tags
// =============================================================================

/// IFD0 tag holding the offset of the Exif sub-IFD.
pub const TAG_EXIF_OFFSET: u16 = 0x8769;

/// IFD0 tag holding the offset of the GPS sub-IFD.
pub const TAG_GPS_INFO: u16 = 0x8825;

// =============================================================================
// Tests
// =============================================================================
