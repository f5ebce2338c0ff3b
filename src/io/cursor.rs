use crate::error::IoError;
use crate::format::tiff::ByteOrder;

/// Bounds-checked reads from an immutable byte buffer at absolute offsets.
///
/// This is the only place where multi-byte values are assembled from raw bytes;
/// every higher layer reads through it so byte order is applied consistently.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Narrow the readable window to `[0, end)`, clamped to the buffer length.
    ///
    /// Offsets stay absolute, so positions computed against the full buffer
    /// remain valid inside the narrowed cursor.
    pub fn truncate(self, end: usize) -> Self {
        Self {
            data: &self.data[..end.min(self.data.len())],
        }
    }

    /// Number of readable bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow exactly `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], IoError> {
        let out_of_bounds = || IoError::OutOfBounds {
            offset: offset as u64,
            requested: len as u64,
            size: self.data.len() as u64,
        };
        let end = offset.checked_add(len).ok_or_else(out_of_bounds)?;
        self.data.get(offset..end).ok_or_else(out_of_bounds)
    }

    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, IoError> {
        Ok(self.slice(offset, 1)?[0])
    }

    #[inline]
    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Result<u16, IoError> {
        Ok(order.read_u16(self.slice(offset, 2)?))
    }

    #[inline]
    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Result<u32, IoError> {
        Ok(order.read_u32(self.slice(offset, 4)?))
    }

    #[inline]
    pub fn read_i32(&self, offset: usize, order: ByteOrder) -> Result<i32, IoError> {
        Ok(order.read_u32(self.slice(offset, 4)?) as i32)
    }

    /// Read `len` bytes as text.
    ///
    /// The result covers the raw length; terminator handling is left to callers.
    /// Each byte maps to the code point of the same value (Latin-1), so bytes
    /// above 0x7F are kept.
    pub fn read_ascii(&self, offset: usize, len: usize) -> Result<String, IoError> {
        Ok(self
            .slice(offset, len)?
            .iter()
            .map(|&b| char::from(b))
            .collect())
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
