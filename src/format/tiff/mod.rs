//! TIFF structure parsing for Exif segments.
//!
//! The Exif payload of a JPEG APP1 segment is a small TIFF file.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares its endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values, including those in sub-IFDs,
//!   must be read respecting this order.
//!
//! - **TIFF base**: every offset stored in the structure is relative to the
//!   first byte of the TIFF header, not to the start of the file.
//!
//! - **IFD (Image File Directory)**: a counted table of 12-byte entries.
//!   IFD0 may point to an Exif sub-IFD and a GPS sub-IFD.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored inline
//!   in the entry, larger values at an offset pointed to by the entry.

mod parser;
mod tags;
mod values;
mod walker;

pub use parser::{ByteOrder, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE};
pub use tags::{FieldType, TagNamespace, TAG_EXIF_OFFSET, TAG_GPS_INFO};
pub use values::{DecodedValue, Rational, ValueReader};
pub use walker::{entry_offset, Ifd, IfdKind, IfdWalker};
