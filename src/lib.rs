//! # exif-probe
//!
//! EXIF metadata extraction and summarization for uploaded images.
//!
//! The library locates the EXIF block inside a JPEG or PNG file, decodes its
//! TIFF tag directories into a dictionary, and turns that dictionary into a
//! human-readable [`MetadataSummary`]: camera and exposure settings, capture
//! time, GPS coordinates, and whether the metadata looks stripped.
//!
//! ## Architecture
//!
//! - [`io`] - the [`ImageSource`] boundary (files, in-memory uploads)
//! - [`mod@format`] - container detection and the TIFF directory decoder
//! - [`summary`] - value formatting and summary assembly
//! - [`extract`] - the end-to-end pipeline
//! - [`config`] - CLI configuration for the `exif-probe` binary
//!
//! Malformed input never produces an error: an unrecognized container, a
//! rejected TIFF header or a truncated directory all degrade to a summary
//! that reports the metadata as missing. Only failing to read the source is
//! reported as an error, in the summary's `error` field.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_probe::{summarize_source, FileSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = FileSource::new("photo.jpg");
//!     let summary = summarize_source(&source).await;
//!
//!     println!("{}", serde_json::to_string_pretty(&summary).unwrap());
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod io;
pub mod summary;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{IoError, TiffError};
pub use extract::{extract, extract_from_source, extract_summary, summarize_source, Extraction};
pub use format::tiff::{
    decode, tag_name, ByteOrder, GpsTag, ImageTag, IopTag, Namespace, Number, PhotoTag, Rational,
    SRational, TagDictionary, Value,
};
pub use format::{detect_container, locate, ContainerFormat, RawBlock};
pub use io::{FileSource, ImageSource, MemorySource, DEFAULT_MAX_FILE_SIZE};
pub use summary::{
    empty_summary, error_summary, summarize, Coordinates, MetadataEntry, MetadataGroup,
    MetadataSummary, Status, Tone,
};
