//! TIFF tag value decoding.
//!
//! A value is stored inline in the entry's 4-byte value field when
//! `count * unit_size <= 4`; otherwise the field holds an offset, relative to
//! the TIFF base, to the value bytes. The rule is applied uniformly to every
//! field type.

use crate::error::TiffError;
use crate::io::ByteCursor;

use super::parser::{IfdEntry, TiffHeader};
use super::tags::FieldType;

// =============================================================================
// Decoded values
// =============================================================================

/// A numerator/denominator pair.
///
/// Both unsigned and signed rationals widen into `i64` without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The quotient as a float.
    ///
    /// A zero denominator yields `0.0` instead of an error or infinity.
    /// This masks malformed values; callers that need to tell them apart can
    /// inspect `denominator` directly.
    pub fn value(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

/// Typed value of one directory entry.
///
/// Numeric variants always hold `count` components; single-component values
/// are one-element vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Unsigned bytes (format 1) and opaque bytes (format 7)
    Bytes(Vec<u8>),
    /// Text, cut at the first NUL
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SRational(Vec<Rational>),
}

impl DecodedValue {
    /// Number of components. For `Ascii` this is the character count after
    /// the NUL terminator is dropped.
    pub fn len(&self) -> usize {
        match self {
            DecodedValue::Bytes(v) => v.len(),
            DecodedValue::Ascii(s) => s.chars().count(),
            DecodedValue::Short(v) => v.len(),
            DecodedValue::Long(v) => v.len(),
            DecodedValue::Rational(v) | DecodedValue::SRational(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer components widened to u64, `None` for text and rationals.
    pub fn as_integers(&self) -> Option<Vec<u64>> {
        match self {
            DecodedValue::Bytes(v) => Some(v.iter().map(|&x| x as u64).collect()),
            DecodedValue::Short(v) => Some(v.iter().map(|&x| x as u64).collect()),
            DecodedValue::Long(v) => Some(v.iter().map(|&x| x as u64).collect()),
            _ => None,
        }
    }

    /// Rational components of either signedness.
    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            DecodedValue::Rational(v) | DecodedValue::SRational(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// ValueReader
// =============================================================================

/// Reads entry values from the Exif segment.
///
/// Combines the segment cursor with the TIFF header so pointer values are
/// resolved against the TIFF base and read in the file's byte order.
pub struct ValueReader<'a> {
    cursor: ByteCursor<'a>,
    header: &'a TiffHeader,
}

impl<'a> ValueReader<'a> {
    /// Create a new ValueReader.
    pub fn new(cursor: ByteCursor<'a>, header: &'a TiffHeader) -> Self {
        Self { cursor, header }
    }

    /// Locate the value bytes of an entry.
    ///
    /// Returns a cursor over the bytes and the absolute start offset within
    /// it. Inline values get a cursor over the entry's own value field.
    fn locate<'e>(&self, entry: &'e IfdEntry) -> Result<(ByteCursor<'e>, usize), TiffError>
    where
        'a: 'e,
    {
        let field_type = entry.field_type().ok_or(TiffError::UnsupportedFormat {
            tag: entry.tag,
            format: entry.field_type_raw,
        })?;

        if field_type.fits_inline(entry.count) {
            Ok((ByteCursor::new(&entry.value_field), 0))
        } else {
            let offset = self
                .header
                .resolve(entry.value_offset(self.header.byte_order));
            Ok((self.cursor, offset))
        }
    }

    /// Raw bytes of an entry's value, inline or pointed to.
    pub fn read_bytes<'e>(&self, entry: &'e IfdEntry) -> Result<&'e [u8], TiffError>
    where
        'a: 'e,
    {
        let (source, start) = self.locate(entry)?;
        let size = entry.value_byte_size().unwrap_or(0);
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        Ok(source.slice(start, size)?)
    }

    /// Decode an entry's value according to its format code.
    ///
    /// # Errors
    /// - `UnsupportedFormat` for format codes outside the handled set
    /// - `Io` if the value bytes fall outside the segment
    pub fn decode(&self, entry: &IfdEntry) -> Result<DecodedValue, TiffError> {
        let field_type = entry.field_type().ok_or(TiffError::UnsupportedFormat {
            tag: entry.tag,
            format: entry.field_type_raw,
        })?;

        // Bounds-check the whole value before allocating for it
        self.read_bytes(entry)?;

        let (source, start) = self.locate(entry)?;
        let order = self.header.byte_order;
        let count = entry.count as usize;
        let unit = field_type.size_in_bytes();

        let value = match field_type {
            FieldType::Byte | FieldType::Undefined => {
                let mut values = Vec::with_capacity(count);
                for i in 0..count {
                    values.push(source.read_u8(start + i)?);
                }
                DecodedValue::Bytes(values)
            }
            FieldType::Ascii => {
                let mut text = source.read_ascii(start, count)?;
                if let Some(end) = text.find('\0') {
                    text.truncate(end);
                }
                DecodedValue::Ascii(text)
            }
            FieldType::Short => {
                let mut values = Vec::with_capacity(count);
                for i in 0..count {
                    values.push(source.read_u16(start + i * unit, order)?);
                }
                DecodedValue::Short(values)
            }
            FieldType::Long => {
                let mut values = Vec::with_capacity(count);
                for i in 0..count {
                    values.push(source.read_u32(start + i * unit, order)?);
                }
                DecodedValue::Long(values)
            }
            FieldType::Rational => {
                let mut values = Vec::with_capacity(count);
                for i in 0..count {
                    let at = start + i * unit;
                    values.push(Rational::new(
                        source.read_u32(at, order)? as i64,
                        source.read_u32(at + 4, order)? as i64,
                    ));
                }
                DecodedValue::Rational(values)
            }
            FieldType::SRational => {
                let mut values = Vec::with_capacity(count);
                for i in 0..count {
                    let at = start + i * unit;
                    values.push(Rational::new(
                        source.read_i32(at, order)? as i64,
                        source.read_i32(at + 4, order)? as i64,
                    ));
                }
                DecodedValue::SRational(values)
            }
        };

        Ok(value)
    }
}

// =============================================================================
// Tests
// =============================================================================
