//! Exif tag naming, formatting and the decode entry point.
//!
//! [`decode`] ties the container parsers together:
//!
//! ```text
//! locate_exif -> TiffHeader::parse -> IfdWalker::walk
//!     -> for each entry: catalog::lookup -> ValueReader::decode -> formatter::format
//! ```

pub mod catalog;
mod dataset;
mod decoder;
pub mod formatter;

pub use catalog::{lookup, TagDefinition};
pub use dataset::{ExifDataset, ExifValue};
pub use decoder::decode;
