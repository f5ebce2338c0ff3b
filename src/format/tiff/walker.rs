//! Image File Directory walking.
//!
//! Exif data in a JPEG has at most three directories of interest: IFD0, the
//! Exif sub-IFD and the GPS sub-IFD. The walker visits them from a fixed work
//! list (root, then Exif, then GPS) instead of following pointers
//! recursively, and never visits the same directory offset twice, so
//! malformed pointers cannot make it loop.
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:            Entry count N
//! Bytes 2..2+N*12:      N entries of 12 bytes each
//! ```

use tracing::{debug, warn};

use crate::error::TiffError;
use crate::io::ByteCursor;

use super::parser::{IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
use super::tags::{TagNamespace, TAG_EXIF_OFFSET, TAG_GPS_INFO};
use super::values::{DecodedValue, ValueReader};

// =============================================================================
// IfdKind
// =============================================================================

/// Which of the three directories an [`Ifd`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdKind {
    /// IFD0, reached from the TIFF header
    Root,
    /// Reached through `ExifOffset` in IFD0
    Exif,
    /// Reached through `GPSInfo` in IFD0
    Gps,
}

impl IfdKind {
    /// Tag table used to name the entries of this directory.
    pub const fn namespace(self) -> TagNamespace {
        match self {
            IfdKind::Root | IfdKind::Exif => TagNamespace::Exif,
            IfdKind::Gps => TagNamespace::Gps,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Root => "IFD0",
            IfdKind::Exif => "Exif SubIFD",
            IfdKind::Gps => "GPS SubIFD",
        }
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// Absolute offset of entry `index` in the directory at `ifd_offset`.
#[inline]
pub fn entry_offset(ifd_offset: usize, index: usize) -> usize {
    ifd_offset + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE
}

/// A parsed directory: its location and raw entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    pub kind: IfdKind,
    /// Absolute offset of the entry count
    pub offset: usize,
    pub entries: Vec<IfdEntry>,
}

impl Ifd {
    /// Read the directory at absolute offset `offset`.
    ///
    /// The whole entry region (`2 + count * 12` bytes) must lie inside the
    /// cursor; otherwise the directory is rejected as a unit.
    pub fn read(
        cursor: &ByteCursor<'_>,
        header: &TiffHeader,
        kind: IfdKind,
        offset: usize,
    ) -> Result<Self, TiffError> {
        let order = header.byte_order;
        let count = cursor.read_u16(offset, order)? as usize;
        cursor.slice(offset + IFD_COUNT_SIZE, count * IFD_ENTRY_SIZE)?;

        debug!(ifd = kind.name(), offset, count, "reading directory");

        let entries = (0..count)
            .map(|i| IfdEntry::read(cursor, entry_offset(offset, i), order))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Ifd {
            kind,
            offset,
            entries,
        })
    }

    /// Find the first entry with the given tag code.
    pub fn find(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }
}

// =============================================================================
// IfdWalker
// =============================================================================

/// Walks IFD0 and the sub-IFDs it points to.
pub struct IfdWalker<'a> {
    cursor: ByteCursor<'a>,
    header: &'a TiffHeader,
}

impl<'a> IfdWalker<'a> {
    pub fn new(cursor: ByteCursor<'a>, header: &'a TiffHeader) -> Self {
        Self { cursor, header }
    }

    /// Read every reachable directory, in visiting order.
    ///
    /// # Errors
    /// Any directory whose entry region is out of bounds aborts the walk.
    /// A pointer tag whose own value cannot be decoded only drops that
    /// sub-IFD.
    pub fn walk(&self) -> Result<Vec<Ifd>, TiffError> {
        let root = Ifd::read(
            &self.cursor,
            self.header,
            IfdKind::Root,
            self.header.first_ifd_offset,
        )?;

        let mut visited = vec![root.offset];
        let pending = [
            (IfdKind::Exif, self.pointer(&root, TAG_EXIF_OFFSET)),
            (IfdKind::Gps, self.pointer(&root, TAG_GPS_INFO)),
        ];

        let mut ifds = vec![root];
        for (kind, offset) in pending {
            let Some(offset) = offset else {
                continue;
            };
            if visited.contains(&offset) {
                warn!(
                    ifd = kind.name(),
                    offset, "pointer targets an already visited directory, skipping"
                );
                continue;
            }
            visited.push(offset);
            ifds.push(Ifd::read(&self.cursor, self.header, kind, offset)?);
        }

        Ok(ifds)
    }

    /// Absolute offset named by a pointer tag in `ifd`, if present and valid.
    fn pointer(&self, ifd: &Ifd, tag: u16) -> Option<usize> {
        let entry = ifd.find(tag)?;
        let reader = ValueReader::new(self.cursor, self.header);

        let relative = match reader.decode(entry) {
            Ok(DecodedValue::Long(v)) => v.first().copied(),
            Ok(DecodedValue::Short(v)) => v.first().map(|&x| x as u32),
            Ok(other) => {
                warn!(tag, value = ?other, "pointer tag has a non-integer value");
                None
            }
            Err(err) => {
                warn!(tag, error = %err, "could not read pointer tag");
                None
            }
        }?;

        Some(self.header.resolve(relative))
    }
}

// =============================================================================
// Tests
// =============================================================================
