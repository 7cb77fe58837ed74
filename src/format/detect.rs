//! Container detection and EXIF block location.
//!
//! This module identifies the image container by its magic bytes and pulls
//! out the raw EXIF block it carries. Currently supports:
//!
//! - **JPEG**: first APP1 segment payload, including its `Exif\0\0` identifier
//! - **PNG**: `eXIf` chunk data, a bare TIFF structure
//!
//! Any other container, or a container without an EXIF block, yields `None`.

use bytes::Bytes;
use tracing::debug;

use super::{jpeg, png};

// =============================================================================
// ContainerFormat
// =============================================================================

/// Image container an EXIF block was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// JPEG / JFIF, EXIF in an APP1 segment
    Jpeg,

    /// PNG, EXIF in an `eXIf` chunk
    Png,
}

impl ContainerFormat {
    /// Get a human-readable name for the container.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "JPEG",
            ContainerFormat::Png => "PNG",
        }
    }
}

// =============================================================================
// RawBlock
// =============================================================================

/// A raw EXIF block extracted from a container.
///
/// The data shares the buffer it was located in; no bytes are copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Block bytes, starting with `Exif\0\0` (JPEG) or the TIFF header (PNG)
    pub data: Bytes,

    /// Container the block came from
    pub container: ContainerFormat,
}

// =============================================================================
// Detection
// =============================================================================

/// Minimum bytes needed to tell containers apart.
const MIN_DETECT_BYTES: usize = 4;

/// Identify the container format from its leading magic bytes.
pub fn detect_container(data: &[u8]) -> Option<ContainerFormat> {
    if data.len() < MIN_DETECT_BYTES {
        return None;
    }

    if jpeg::is_jpeg(data) {
        Some(ContainerFormat::Jpeg)
    } else if png::is_png(data) {
        Some(ContainerFormat::Png)
    } else {
        None
    }
}

/// Locate the raw EXIF block inside an image buffer.
///
/// Returns `None` for buffers shorter than 4 bytes, unrecognized containers,
/// and containers that carry no EXIF block. Never fails.
pub fn locate(data: &Bytes) -> Option<RawBlock> {
    let container = detect_container(data)?;

    let range = match container {
        ContainerFormat::Jpeg => jpeg::find_app1_payload(data),
        ContainerFormat::Png => png::find_exif_chunk(data),
    };

    match range {
        Some(range) => {
            debug!(
                container = container.name(),
                offset = range.start,
                len = range.len(),
                "Located EXIF block"
            );
            Some(RawBlock {
                data: data.slice(range),
                container,
            })
        }
        None => {
            debug!(container = container.name(), "No EXIF block in container");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
