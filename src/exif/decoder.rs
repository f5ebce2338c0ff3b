use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::format::jpeg::locate_exif;
use crate::format::tiff::{IfdWalker, TiffHeader, ValueReader};

use super::catalog;
use super::dataset::ExifDataset;
use super::formatter;

/// Decode the Exif metadata of a JPEG file.
///
/// Holds no state between calls: decoding the same buffer twice gives equal
/// datasets.
///
/// # Errors
/// Container and directory failures abort the decode. A tag whose value
/// cannot be decoded (unknown format code, value outside the segment) is
/// logged and left out of the dataset; unknown tag codes are dropped.
pub fn decode(buffer: &[u8]) -> Result<ExifDataset, DecodeError> {
    let exif = locate_exif(buffer)?;
    debug!(
        offset = exif.segment.offset,
        length = exif.segment.length,
        tiff_base = exif.tiff_base,
        "located Exif segment"
    );

    let cursor = exif.cursor(buffer);
    let header = TiffHeader::parse(&cursor, exif.tiff_base)?;
    let ifds = IfdWalker::new(cursor, &header).walk()?;
    let reader = ValueReader::new(cursor, &header);

    let mut dataset = ExifDataset::new(header.byte_order);
    for ifd in &ifds {
        let namespace = ifd.kind.namespace();

        for entry in &ifd.entries {
            let Some(definition) = catalog::lookup(namespace, entry.tag) else {
                debug!(
                    ifd = ifd.kind.name(),
                    tag = entry.tag,
                    "unknown tag, dropped"
                );
                continue;
            };

            let value = match reader.decode(entry) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        ifd = ifd.kind.name(),
                        tag = definition.name,
                        error = %err,
                        "skipping tag"
                    );
                    continue;
                }
            };

            debug!(
                tag = definition.name,
                format = entry.field_type().map(|t| t.name()).unwrap_or("?"),
                count = entry.count,
                "decoded tag"
            );

            dataset.insert(definition.name, formatter::format(definition, &value));
        }
    }

    Ok(dataset)
}
