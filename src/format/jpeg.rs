//! JPEG marker segment walking.
//!
//! EXIF metadata in a JPEG lives in an APP1 segment near the start of the
//! file. Every segment before the image data has the layout
//!
//! ```text
//! 0xFF <marker> <u16 big-endian length> <length - 2 bytes of payload>
//! ```
//!
//! where the length counts itself but not the two marker bytes. The walk
//! stops as soon as the stream stops looking like a marker sequence.

use std::ops::Range;

use tracing::trace;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// Marker byte of the APP1 segment (Exif, XMP)
pub const APP1_MARKER: u8 = 0xE1;

/// Size of the marker plus length prefix of a segment
const SEGMENT_HEADER_SIZE: usize = 4;

/// Check if data starts with the JPEG SOI marker.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

/// Find the payload of the first APP1 segment.
///
/// Returns the byte range of the payload (everything after the marker and
/// length fields). The payload's identifier is not checked here; an APP1
/// segment holding XMP is returned just like one holding EXIF.
///
/// Returns `None` if the data is not a JPEG, if the marker stream is
/// malformed or truncated, or if no APP1 segment precedes that point.
pub fn find_app1_payload(data: &[u8]) -> Option<Range<usize>> {
    if !is_jpeg(data) {
        return None;
    }

    let mut pos = SOI.len();
    while pos + SEGMENT_HEADER_SIZE <= data.len() {
        if data[pos] != 0xFF {
            trace!(pos, "Marker stream ended");
            return None;
        }

        let marker = data[pos + 1];
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 {
            trace!(pos, length, "Invalid segment length");
            return None;
        }

        let payload_start = pos + SEGMENT_HEADER_SIZE;
        let payload_end = pos + 2 + length;
        if payload_end > data.len() {
            trace!(pos, length, "Segment runs past end of data");
            return None;
        }

        if marker == APP1_MARKER {
            return Some(payload_start..payload_end);
        }

        pos = payload_end;
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
