//! Human-readable summaries of decoded EXIF metadata.
//!
//! [`summarize`] turns a [`TagDictionary`](crate::format::tiff::TagDictionary)
//! into a [`MetadataSummary`]: an overall status, a handful of headline
//! entries, and titled groups of formatted values. The summary serializes to
//! camelCase JSON:
//!
//! ```json
//! {
//!   "status": "info",
//!   "exifStripped": false,
//!   "gpsData": true,
//!   "details": "Camera metadata and GPS coordinates were detected in the image.",
//!   "entries": [{ "label": "EXIF Data", "value": "Present", "tone": "success" }],
//!   "groups": [{ "title": "Image", "entries": [{ "label": "Make", "value": "Canon" }] }],
//!   "bigEndian": false
//! }
//! ```

mod builder;
pub mod format;
pub mod gps;

use std::fmt;

use serde::Serialize;

pub use builder::{empty_summary, error_summary, summarize, NO_EXIF_DETAILS};
pub use gps::Coordinates;

// =============================================================================
// Status and Tone
// =============================================================================

/// Overall verdict of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// EXIF and GPS data present
    Info,
    /// EXIF present, GPS absent
    Warning,
    /// EXIF absent or extraction failed
    Error,
}

impl Status {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Info => "info",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display hint for a headline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Error,
    Neutral,
}

// =============================================================================
// Entries and Groups
// =============================================================================

/// A labelled, formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

impl MetadataEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone: None,
        }
    }

    pub fn with_tone(label: impl Into<String>, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone: Some(tone),
        }
    }
}

/// A titled list of entries, one per EXIF namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataGroup {
    pub title: String,
    pub entries: Vec<MetadataEntry>,
}

// =============================================================================
// MetadataSummary
// =============================================================================

/// The result of summarizing an image's EXIF metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSummary {
    pub status: Status,

    /// True when no Image, Photo or GPS tags were found
    pub exif_stripped: bool,

    /// True when coordinates, altitude or a GPS timestamp were found
    pub gps_data: bool,

    /// One-sentence explanation of the status
    pub details: String,

    /// Headline entries, always starting with EXIF Data, Endianness and GPS
    pub entries: Vec<MetadataEntry>,

    /// Non-empty groups in a fixed order: Image, Photo, GPS Info, Thumbnail, Iop
    pub groups: Vec<MetadataGroup>,

    /// Byte order of the decoded block, absent when no TIFF header was read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_endian: Option<bool>,

    /// Failure message when extraction itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetadataSummary {
    /// Look up a headline entry by label.
    pub fn entry(&self, label: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Look up a group by title.
    pub fn group(&self, title: &str) -> Option<&MetadataGroup> {
        self.groups.iter().find(|g| g.title == title)
    }
}

impl fmt::Display for MetadataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "{}", self.details)?;
        for entry in &self.entries {
            writeln!(f, "  {}: {}", entry.label, entry.value)?;
        }
        for group in &self.groups {
            writeln!(f, "[{}]", group.title)?;
            for entry in &group.entries {
                writeln!(f, "  {}: {}", entry.label, entry.value)?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(f, "Error: {}", error)?;
        }
        Ok(())
    }
}
