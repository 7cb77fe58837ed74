//! The end-to-end extraction pipeline.
//!
//! ```text
//! ImageSource --read_all--> bytes --locate--> RawBlock --decode--> TagDictionary
//!                                                                      |
//!                                                       summarize --> MetadataSummary
//! ```
//!
//! Only reading the source can fail. Everything after that degrades to an
//! empty summary instead of returning an error, so [`summarize_source`] always
//! produces a summary and reports read failures in its `error` field.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::format::tiff::{self, TagDictionary};
use crate::format::{locate, ContainerFormat};
use crate::io::ImageSource;
use crate::summary::{empty_summary, error_summary, summarize, MetadataSummary, NO_EXIF_DETAILS};

/// Everything the pipeline learned about one image.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Container the EXIF block was found in, `None` when no block was found
    pub container: Option<ContainerFormat>,

    /// Decoded tags, empty when no block was found or it could not be decoded
    pub tags: TagDictionary,

    pub summary: MetadataSummary,
}

/// Run the pipeline over an in-memory image.
pub fn extract(data: &Bytes) -> Extraction {
    let Some(block) = locate(data) else {
        debug!(len = data.len(), "No EXIF block found");
        return Extraction {
            container: None,
            tags: TagDictionary::empty(),
            summary: empty_summary(NO_EXIF_DETAILS),
        };
    };

    let tags = tiff::decode(&block.data);
    let summary = summarize(&tags);

    Extraction {
        container: Some(block.container),
        tags,
        summary,
    }
}

/// Summarize the EXIF metadata of an in-memory image.
pub fn extract_summary(data: &Bytes) -> MetadataSummary {
    extract(data).summary
}

/// Read a source and run the pipeline over its contents.
pub async fn extract_from_source<S>(source: &S) -> Result<Extraction, IoError>
where
    S: ImageSource + ?Sized,
{
    let data = source.read_all().await?;
    debug!(
        source = source.identifier(),
        len = data.len(),
        "Read image source"
    );
    Ok(extract(&data))
}

/// Summarize a source, turning read failures into an error summary.
pub async fn summarize_source<S>(source: &S) -> MetadataSummary
where
    S: ImageSource + ?Sized,
{
    match extract_from_source(source).await {
        Ok(extraction) => extraction.summary,
        Err(e) => {
            warn!(source = source.identifier(), error = %e, "Failed to read image");
            error_summary(e.to_string())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
