//! Container parsers for Exif metadata.
//!
//! Exif data lives in two nested containers:
//!
//! - **JPEG**: the APP1 marker segment is located by [`jpeg::locate_exif`]
//! - **TIFF**: the APP1 payload is a TIFF structure walked by [`tiff::IfdWalker`]

pub mod jpeg;
pub mod tiff;

pub use jpeg::{locate_exif, segments, ExifSegment, Segment};
