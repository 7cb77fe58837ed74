//! Container locator tests.
//!
//! Tests verify:
//! - Unrecognized buffers produce a stripped summary without an error
//! - JPEG APP1 segments with a non-EXIF identifier are treated as missing EXIF
//! - PNG files without an `eXIf` chunk are treated as missing EXIF
//! - Truncated containers degrade the same way

use bytes::Bytes;

use exif_probe::{extract, extract_summary, locate, ContainerFormat, Status};

use super::test_utils::{
    camera_exif, jpeg_with_app1, jpeg_without_app1, png_with_exif, png_without_exif,
    ByteOrderType, PNG_SIGNATURE,
};

const NO_EXIF_DETAILS: &str = "EXIF may be absent due to social platform scrubbing, \
screenshots, AI/graphics output, or export settings that remove metadata.";

fn assert_missing(data: Vec<u8>) {
    let summary = extract_summary(&Bytes::from(data));

    assert_eq!(summary.status, Status::Error);
    assert!(summary.exif_stripped);
    assert!(!summary.gps_data);
    assert!(summary.groups.is_empty());
    assert_eq!(summary.error, None);
    assert_eq!(summary.entry("EXIF Data").unwrap().value, "Missing");
    assert_eq!(summary.entry("Endianness").unwrap().value, "Unknown");
    assert_eq!(summary.entry("GPS").unwrap().value, "Not embedded");
}

// =============================================================================
// Unrecognized Input
// =============================================================================

#[test]
fn test_unrecognized_buffers() {
    for data in [
        b"GIF89a\x01\x00\x01\x00".to_vec(),
        b"RIFF\0\0\0\0WEBPVP8 ".to_vec(),
        b"II*\0\x08\0\0\0\0\0\0\0\0\0".to_vec(),
        vec![0xFF, 0xD8, 0xFF],
        Vec::new(),
    ] {
        assert!(locate(&Bytes::from(data.clone())).is_none());

        let summary = extract_summary(&Bytes::from(data.clone()));
        assert_eq!(summary.details, NO_EXIF_DETAILS);
        assert_missing(data);
    }
}

// =============================================================================
// JPEG
// =============================================================================

#[test]
fn test_jpeg_locates_app1_block() {
    let block = camera_exif(ByteOrderType::LittleEndian).build_app1();
    let data = Bytes::from(jpeg_with_app1(&block));

    let located = locate(&data).unwrap();
    assert_eq!(located.container, ContainerFormat::Jpeg);
    assert_eq!(&located.data[..], &block[..]);
}

#[test]
fn test_jpeg_without_app1() {
    assert_missing(jpeg_without_app1());
}

#[test]
fn test_jpeg_with_xmp_app1() {
    let xmp = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"/>";
    let data = Bytes::from(jpeg_with_app1(xmp));

    let extraction = extract(&data);
    assert_eq!(extraction.container, Some(ContainerFormat::Jpeg));
    assert!(extraction.tags.is_empty());
    assert_eq!(
        extraction.summary.details,
        "EXIF metadata appears to be stripped from the image."
    );
    assert_missing(data.to_vec());
}

#[test]
fn test_truncated_jpeg() {
    let block = camera_exif(ByteOrderType::LittleEndian).build_app1();
    let mut data = jpeg_with_app1(&block);
    // Cut inside the APP1 payload
    data.truncate(40);

    assert!(locate(&Bytes::from(data.clone())).is_none());
    assert_missing(data);
}

// =============================================================================
// PNG
// =============================================================================

#[test]
fn test_png_locates_exif_chunk() {
    let tiff = camera_exif(ByteOrderType::BigEndian).build();
    let data = Bytes::from(png_with_exif(&tiff));

    let located = locate(&data).unwrap();
    assert_eq!(located.container, ContainerFormat::Png);
    assert_eq!(&located.data[..], &tiff[..]);
}

#[test]
fn test_png_without_exif() {
    assert_missing(png_without_exif());
}

#[test]
fn test_png_signature_only() {
    assert_missing(PNG_SIGNATURE.to_vec());
}

#[test]
fn test_png_with_prefixed_exif_chunk() {
    // Some writers keep the JPEG identifier in the PNG chunk
    let block = camera_exif(ByteOrderType::LittleEndian).build_app1();
    let summary = extract_summary(&Bytes::from(png_with_exif(&block)));

    assert!(!summary.exif_stripped);
    assert_eq!(summary.status, Status::Info);
}
