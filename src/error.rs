use thiserror::Error;

/// Errors raised by bounds-checked reads from the input buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// Requested range exceeds the buffer
    #[error("Read out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    OutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },
}

/// Errors that can occur while parsing the TIFF structure inside the APP1 segment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Read error while walking the structure
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Byte order marker is neither II nor MM
    #[error("Invalid byte order marker: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// Directory entry declares a format code the decoder does not handle
    #[error("Unsupported format {format} for tag 0x{tag:04X}")]
    UnsupportedFormat { tag: u16, format: u16 },
}

/// Errors that abort a whole decode.
///
/// Per-tag problems never surface here; they are logged and the tag is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer does not start with the JPEG start-of-image marker
    #[error("Not a JPEG: expected start-of-image marker 0xFFD8, got 0x{0:04X}")]
    MissingStartOfImage(u16),

    /// A marker segment does not begin with 0xFF
    #[error("Malformed JPEG: expected marker prefix 0xFF at offset {offset}, got 0x{found:02X}")]
    MalformedJpeg { offset: u64, found: u8 },

    /// No Exif APP1 segment before the image data or the end of the buffer
    #[error("No APP1 (EXIF) segment found")]
    ExifSegmentNotFound,

    /// APP1 segment exists but does not carry the "Exif" signature
    #[error("APP1 segment at offset {offset} has no Exif signature")]
    ExifSignatureMissing { offset: u64 },

    /// Read error while locating the segment or walking an IFD
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// TIFF structure error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedJpeg,
    ExifSegmentNotFound,
    ExifSignatureMissing,
    OutOfBounds,
    UnsupportedFormat,
    InvalidByteOrder,
}

impl DecodeError {
    /// Flatten nested errors into a single kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MissingStartOfImage(_) | DecodeError::MalformedJpeg { .. } => {
                ErrorKind::MalformedJpeg
            }
            DecodeError::ExifSegmentNotFound => ErrorKind::ExifSegmentNotFound,
            DecodeError::ExifSignatureMissing { .. } => ErrorKind::ExifSignatureMissing,
            DecodeError::Io(_) => ErrorKind::OutOfBounds,
            DecodeError::Tiff(err) => err.kind(),
        }
    }
}

impl TiffError {
    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::Io(_) => ErrorKind::OutOfBounds,
            TiffError::InvalidByteOrder(_) => ErrorKind::InvalidByteOrder,
            TiffError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
        }
    }
}
