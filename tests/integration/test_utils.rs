//! Test utilities for integration tests.
//!
//! This module provides builders for Exif structures in either byte order,
//! wrapped in real JPEG files produced by the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

/// Tag code of the Exif sub-IFD pointer.
pub const TAG_EXIF_OFFSET: u16 = 0x8769;

/// Tag code of the GPS sub-IFD pointer.
pub const TAG_GPS_INFO: u16 = 0x8825;

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Create a test RGB JPEG image without metadata.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Insert an APP1 segment carrying `tiff` into a JPEG.
///
/// With `first` the segment goes right after SOI, otherwise after a leading
/// APP0 (JFIF) segment when there is one.
pub fn insert_exif_segment(jpeg: &[u8], tiff: &[u8], first: bool) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut at = 2;
    if !first && jpeg[2] == 0xFF && jpeg[3] == 0xE0 {
        at = 4 + u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
    }

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..at]);
    out.extend(app1_segment(tiff));
    out.extend_from_slice(&jpeg[at..]);
    out
}

/// An APP1 segment: marker, length, "Exif\0\0", TIFF structure.
pub fn app1_segment(tiff: &[u8]) -> Vec<u8> {
    let length = (2 + 6 + tiff.len()) as u16;
    let mut out = vec![0xFF, 0xE1];
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out
}

// =============================================================================
// Exif Builders
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

/// A tag value before encoding.
#[derive(Clone, Debug)]
pub enum TagValue {
    Bytes(Vec<u8>),
    Undefined(Vec<u8>),
    /// Written with a trailing NUL
    Ascii(String),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Entry written verbatim, value field in file byte order is up to the caller
    Raw { format: u16, count: u32, field: [u8; 4] },
}

impl TagValue {
    fn format(&self) -> u16 {
        match self {
            TagValue::Bytes(_) => 1,
            TagValue::Ascii(_) => 2,
            TagValue::Shorts(_) => 3,
            TagValue::Longs(_) => 4,
            TagValue::Rationals(_) => 5,
            TagValue::Undefined(_) => 7,
            TagValue::SRationals(_) => 10,
            TagValue::Raw { format, .. } => *format,
        }
    }

    fn count(&self) -> u32 {
        match self {
            TagValue::Bytes(v) | TagValue::Undefined(v) => v.len() as u32,
            TagValue::Ascii(s) => s.len() as u32 + 1,
            TagValue::Shorts(v) => v.len() as u32,
            TagValue::Longs(v) => v.len() as u32,
            TagValue::Rationals(v) => v.len() as u32,
            TagValue::SRationals(v) => v.len() as u32,
            TagValue::Raw { count, .. } => *count,
        }
    }

    fn encode(&self, order: ByteOrderType) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            TagValue::Bytes(v) | TagValue::Undefined(v) => out.extend_from_slice(v),
            TagValue::Ascii(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            TagValue::Shorts(v) => v.iter().for_each(|&x| out.extend(order.u16(x))),
            TagValue::Longs(v) => v.iter().for_each(|&x| out.extend(order.u32(x))),
            TagValue::Rationals(v) => v.iter().for_each(|&(n, d)| {
                out.extend(order.u32(n));
                out.extend(order.u32(d));
            }),
            TagValue::SRationals(v) => v.iter().for_each(|&(n, d)| {
                out.extend(order.u32(n as u32));
                out.extend(order.u32(d as u32));
            }),
            TagValue::Raw { field, .. } => out.extend_from_slice(field),
        }
        out
    }
}

/// Builder for one IFD's entries.
#[derive(Clone, Debug, Default)]
pub struct IfdBuilder {
    entries: Vec<(u16, TagValue)>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag entry.
    pub fn add(mut self, tag: u16, value: TagValue) -> Self {
        self.entries.push((tag, value));
        self
    }

    pub fn ascii(self, tag: u16, text: &str) -> Self {
        self.add(tag, TagValue::Ascii(text.to_string()))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.add(tag, TagValue::Shorts(vec![value]))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.add(tag, TagValue::Longs(vec![value]))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        self.add(tag, TagValue::Rationals(vec![(numerator, denominator)]))
    }

    fn size(&self) -> usize {
        2 + self.entries.len() * 12 + 4
    }
}

/// Builder for a complete Exif TIFF structure: IFD0 plus optional Exif and
/// GPS sub-IFDs.
///
/// Layout: header, IFD0, Exif IFD, GPS IFD, then out-of-line values.
/// Pointer tags are added automatically.
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    root: IfdBuilder,
    exif: Option<IfdBuilder>,
    gps: Option<IfdBuilder>,
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            root: IfdBuilder::new(),
            exif: None,
            gps: None,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn root(mut self, ifd: IfdBuilder) -> Self {
        self.root = ifd;
        self
    }

    pub fn exif(mut self, ifd: IfdBuilder) -> Self {
        self.exif = Some(ifd);
        self
    }

    pub fn gps(mut self, ifd: IfdBuilder) -> Self {
        self.gps = Some(ifd);
        self
    }

    /// Build the TIFF structure (the APP1 payload after "Exif\0\0").
    pub fn build_tiff(&self) -> Vec<u8> {
        let order = self.byte_order;

        let mut root = self.root.clone();
        // Pointer values are patched once offsets are known
        if self.exif.is_some() {
            root = root.long(TAG_EXIF_OFFSET, 0);
        }
        if self.gps.is_some() {
            root = root.long(TAG_GPS_INFO, 0);
        }

        let root_offset = 8;
        let mut next = root_offset + root.size();
        let exif_offset = self.exif.as_ref().map(|ifd| {
            let at = next;
            next += ifd.size();
            at
        });
        let gps_offset = self.gps.as_ref().map(|ifd| {
            let at = next;
            next += ifd.size();
            at
        });

        for (tag, value) in root.entries.iter_mut() {
            let target = match *tag {
                TAG_EXIF_OFFSET => exif_offset,
                TAG_GPS_INFO => gps_offset,
                _ => None,
            };
            if let Some(at) = target {
                *value = TagValue::Longs(vec![at as u32]);
            }
        }

        let mut data = Vec::new();
        match order {
            ByteOrderType::LittleEndian => data.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => data.extend_from_slice(b"MM"),
        }
        data.extend(order.u16(42));
        data.extend(order.u32(root_offset as u32));

        let mut external = Vec::new();
        let data_start = next;
        write_ifd(&mut data, &mut external, data_start, &root, order);
        if let Some(ifd) = &self.exif {
            write_ifd(&mut data, &mut external, data_start, ifd, order);
        }
        if let Some(ifd) = &self.gps {
            write_ifd(&mut data, &mut external, data_start, ifd, order);
        }

        assert_eq!(data.len(), data_start);
        data.extend(external);
        data
    }

    /// Build a JPEG with the Exif segment placed after the JFIF header.
    pub fn build_jpeg(&self) -> Vec<u8> {
        insert_exif_segment(&create_test_jpeg(16, 16, 80), &self.build_tiff(), false)
    }

    /// Build a JPEG with the Exif segment placed directly after SOI.
    pub fn build_jpeg_app1_first(&self) -> Vec<u8> {
        insert_exif_segment(&create_test_jpeg(16, 16, 80), &self.build_tiff(), true)
    }
}

impl Default for ExifBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write an IFD's entries (sorted by tag); out-of-line values go to `external`.
fn write_ifd(
    data: &mut Vec<u8>,
    external: &mut Vec<u8>,
    data_start: usize,
    ifd: &IfdBuilder,
    order: ByteOrderType,
) {
    let mut entries = ifd.entries.clone();
    entries.sort_by_key(|(tag, _)| *tag);

    data.extend(order.u16(entries.len() as u16));
    for (tag, value) in &entries {
        data.extend(order.u16(*tag));
        data.extend(order.u16(value.format()));
        data.extend(order.u32(value.count()));

        let bytes = value.encode(order);
        if matches!(value, TagValue::Raw { .. }) || bytes.len() <= 4 {
            let mut field = [0u8; 4];
            field[..bytes.len()].copy_from_slice(&bytes);
            data.extend(field);
        } else {
            let offset = data_start + external.len();
            data.extend(order.u32(offset as u32));
            external.extend(bytes);
            // Keep values word aligned
            if external.len() % 2 == 1 {
                external.push(0);
            }
        }
    }
    // Next IFD offset
    data.extend(order.u32(0));
}

/// Offset of the Exif APP1 segment in a JPEG.
pub fn find_app1(jpeg: &[u8]) -> usize {
    (2..jpeg.len().saturating_sub(8))
        .find(|&i| jpeg[i] == 0xFF && jpeg[i + 1] == 0xE1 && &jpeg[i + 4..i + 8] == b"Exif")
        .expect("no Exif APP1 segment")
}
