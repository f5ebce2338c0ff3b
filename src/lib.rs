//! # jpeg-exif
//!
//! Extracts Exif metadata (camera settings, GPS position, ...) from the APP1
//! segment of a JPEG file.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`io`] - Bounds-checked, byte-order aware reads from the file buffer
//! - [`mod@format`] - JPEG segment scanning and TIFF directory parsing
//! - [`exif`] - Tag catalog, value formatting and the decode entry point
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! let buffer = std::fs::read("photo.jpg").unwrap();
//! let dataset = jpeg_exif::decode(&buffer).unwrap();
//!
//! if let Some(model) = dataset.get("Model") {
//!     println!("Shot with {}", model);
//! }
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;

pub use config::{Config, OutputFormat};
pub use error::{DecodeError, ErrorKind, IoError, TiffError};
pub use exif::{decode, ExifDataset, ExifValue};
pub use format::tiff::{ByteOrder, TagNamespace};
