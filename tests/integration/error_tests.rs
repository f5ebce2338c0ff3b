//! Error handling tests.
//!
//! Tests verify:
//! - Container problems abort the decode with the matching error kind
//! - Directory-level out-of-bounds reads are fatal
//! - A wrong TIFF magic number is tolerated

use jpeg_exif::{decode, DecodeError, ErrorKind, TiffError};

use super::test_utils::{
    app1_segment, create_test_jpeg, find_app1, ExifBuilder, IfdBuilder, TAG_EXIF_OFFSET,
};

fn simple_jpeg() -> Vec<u8> {
    ExifBuilder::new()
        .root(IfdBuilder::new().ascii(0x010F, "Canon").short(0x0112, 1))
        .build_jpeg()
}

// =============================================================================
// Container Errors
// =============================================================================

#[test]
fn test_not_a_jpeg() {
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let err = decode(&png).unwrap_err();
    assert!(matches!(err, DecodeError::MissingStartOfImage(0x8950)));
    assert_eq!(err.kind(), ErrorKind::MalformedJpeg);
}

#[test]
fn test_empty_buffer() {
    let err = decode(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJpeg);
}

#[test]
fn test_jpeg_without_exif() {
    let jpeg = create_test_jpeg(16, 16, 80);
    let err = decode(&jpeg).unwrap_err();
    assert_eq!(err, DecodeError::ExifSegmentNotFound);
    assert_eq!(err.kind(), ErrorKind::ExifSegmentNotFound);
}

#[test]
fn test_app1_without_exif_signature() {
    let jpeg = create_test_jpeg(16, 16, 80);

    let mut payload = vec![0xFF, 0xE1, 0x00, 0x0A];
    payload.extend_from_slice(b"XMP\0\0\0\0\0");
    let mut data = jpeg[..2].to_vec();
    data.extend(payload);
    data.extend_from_slice(&jpeg[2..]);

    let err = decode(&data).unwrap_err();
    assert_eq!(err, DecodeError::ExifSignatureMissing { offset: 2 });
    assert_eq!(err.kind(), ErrorKind::ExifSignatureMissing);
}

#[test]
fn test_malformed_marker() {
    let mut jpeg = create_test_jpeg(16, 16, 80);
    // First segment is APP0; clobber the marker prefix of the one after it
    assert_eq!(&jpeg[2..4], &[0xFF, 0xE0]);
    let next = 4 + u16::from_be_bytes([jpeg[4], jpeg[5]]) as usize;
    jpeg[next] = 0x42;

    let err = decode(&jpeg).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MalformedJpeg {
            offset: next as u64,
            found: 0x42
        }
    );
    assert_eq!(err.kind(), ErrorKind::MalformedJpeg);
}

#[test]
fn test_exif_signature_found_after_other_app1() {
    let jpeg = simple_jpeg();
    let app1 = find_app1(&jpeg);

    let mut xmp = vec![0xFF, 0xE1, 0x00, 0x06];
    xmp.extend_from_slice(b"http");
    let mut data = jpeg[..app1].to_vec();
    data.extend(xmp);
    data.extend_from_slice(&jpeg[app1..]);

    let dataset = decode(&data).unwrap();
    assert!(dataset.contains("Make"));
}

// =============================================================================
// TIFF Header Errors
// =============================================================================

#[test]
fn test_invalid_byte_order_marker() {
    let mut jpeg = simple_jpeg();
    let tiff = find_app1(&jpeg) + 10;
    jpeg[tiff] = b'X';
    jpeg[tiff + 1] = b'X';

    let err = decode(&jpeg).unwrap_err();
    assert_eq!(err, DecodeError::Tiff(TiffError::InvalidByteOrder(0x5858)));
    assert_eq!(err.kind(), ErrorKind::InvalidByteOrder);
}

#[test]
fn test_wrong_magic_is_tolerated() {
    let mut jpeg = simple_jpeg();
    let tiff = find_app1(&jpeg) + 10;
    jpeg[tiff + 2] = 43;

    let dataset = decode(&jpeg).unwrap();
    assert!(dataset.contains("Make"));
}

// =============================================================================
// Directory Errors
// =============================================================================

#[test]
fn test_ifd0_offset_out_of_bounds() {
    let mut jpeg = simple_jpeg();
    let tiff = find_app1(&jpeg) + 10;
    jpeg[tiff + 4..tiff + 8].copy_from_slice(&0x0010_0000u32.to_le_bytes());

    let err = decode(&jpeg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_entry_count_past_segment() {
    let mut jpeg = simple_jpeg();
    let ifd0 = find_app1(&jpeg) + 10 + 8;
    jpeg[ifd0..ifd0 + 2].copy_from_slice(&0x0400u16.to_le_bytes());

    let err = decode(&jpeg).unwrap_err();
    assert!(matches!(err, DecodeError::Tiff(TiffError::Io(_))));
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_sub_ifd_out_of_bounds_is_fatal() {
    let jpeg = ExifBuilder::new()
        .root(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .long(TAG_EXIF_OFFSET, 50_000),
        )
        .build_jpeg();

    let err = decode(&jpeg).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_truncated_file() {
    let jpeg = simple_jpeg();
    let ifd0 = find_app1(&jpeg) + 10 + 8;
    // Cut in the middle of the first entry
    let truncated = &jpeg[..ifd0 + 2 + 5];

    let err = decode(truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_app1_alone_without_image_data() {
    let tiff = ExifBuilder::new()
        .root(IfdBuilder::new().ascii(0x0110, "Canon EOS 800D"))
        .build_tiff();

    let mut data = vec![0xFF, 0xD8];
    data.extend(app1_segment(&tiff));

    let dataset = decode(&data).unwrap();
    assert_eq!(dataset.get("Model").unwrap().to_string(), "Canon EOS 800D");
}
