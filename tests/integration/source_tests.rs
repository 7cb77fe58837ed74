//! Image source tests.
//!
//! Tests verify:
//! - Files on disk run through the full pipeline
//! - Oversized files are rejected before reading, with the size in the error
//! - Files that report a zero length are still capped at the size limit
//! - Missing files produce an error summary instead of a failure

use std::io::Write;

use tempfile::NamedTempFile;

use exif_probe::{
    extract_from_source, summarize_source, ContainerFormat, FileSource, IoError, ImageSource,
    MemorySource, Status,
};

use super::test_utils::{camera_exif, jpeg_with_app1, png_with_exif, ByteOrderType};

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// FileSource
// =============================================================================

#[tokio::test]
async fn test_file_source_pipeline() {
    let data = jpeg_with_app1(&camera_exif(ByteOrderType::LittleEndian).build_app1());
    let file = write_temp(&data);

    let source = FileSource::new(file.path());
    let extraction = extract_from_source(&source).await.unwrap();

    assert_eq!(extraction.container, Some(ContainerFormat::Jpeg));
    assert_eq!(extraction.summary.status, Status::Info);
    assert_eq!(
        extraction.summary.entry("Camera").unwrap().value,
        "Canon EOS R5"
    );
}

#[tokio::test]
async fn test_file_source_too_large() {
    let data = png_with_exif(&camera_exif(ByteOrderType::BigEndian).build());
    let file = write_temp(&data);
    let size = data.len() as u64;

    let source = FileSource::new(file.path()).with_max_size(64);
    let err = source.read_all().await.unwrap_err();
    assert!(matches!(err, IoError::TooLarge { size: s, limit: 64 } if s == size));

    let summary = summarize_source(&source).await;
    assert_eq!(summary.status, Status::Error);
    assert!(summary.exif_stripped);
    let message = summary.error.unwrap();
    assert!(message.contains(&size.to_string()));
    assert!(message.contains("64"));
}

#[tokio::test]
async fn test_file_source_at_limit() {
    let data = jpeg_with_app1(&camera_exif(ByteOrderType::LittleEndian).build_app1());
    let file = write_temp(&data);

    let source = FileSource::new(file.path()).with_max_size(data.len() as u64);
    let summary = summarize_source(&source).await;
    assert_eq!(summary.error, None);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_zero_length_metadata_capped() {
    // procfs files report a length of 0 but have content
    let source = FileSource::new("/proc/self/maps").with_max_size(16);

    let err = source.read_all().await.unwrap_err();
    assert!(matches!(err, IoError::TooLarge { size: 17, limit: 16 }));

    let summary = summarize_source(&source).await;
    assert_eq!(summary.status, Status::Error);
    assert!(summary.error.unwrap().contains("16"));
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jpg");

    let source = FileSource::new(&path);
    assert!(matches!(
        source.read_all().await,
        Err(IoError::NotFound(_))
    ));

    let summary = summarize_source(&source).await;
    assert_eq!(summary.status, Status::Error);
    let message = summary.error.unwrap();
    assert!(message.contains("missing.jpg"));
    assert_eq!(summary.details, message);
}

// =============================================================================
// MemorySource
// =============================================================================

#[tokio::test]
async fn test_memory_source() {
    let data = png_with_exif(&camera_exif(ByteOrderType::LittleEndian).build());
    let source = MemorySource::new(data, "upload.png");

    assert_eq!(source.identifier(), "upload.png");
    let extraction = extract_from_source(&source).await.unwrap();
    assert_eq!(extraction.container, Some(ContainerFormat::Png));
    assert!(extraction.summary.gps_data);
}

#[tokio::test]
async fn test_boxed_source() {
    let source: Box<dyn ImageSource> = Box::new(MemorySource::new(Vec::new(), "empty"));

    let summary = summarize_source(source.as_ref()).await;
    assert!(summary.exif_stripped);
    assert_eq!(summary.error, None);
}
