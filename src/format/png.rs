//! PNG chunk walking.
//!
//! PNG files store EXIF metadata in an `eXIf` chunk whose data is a bare TIFF
//! structure (no `Exif\0\0` identifier). Chunks are laid out as
//!
//! ```text
//! <u32 big-endian length> <4-byte ASCII type> <length bytes of data> <4-byte CRC>
//! ```
//!
//! CRCs are not verified; a corrupt chunk simply decodes to fewer tags.

use std::ops::Range;

use tracing::trace;

/// The 8-byte PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk type holding EXIF data
pub const EXIF_CHUNK: &[u8; 4] = b"eXIf";

/// Chunk type terminating the file
const END_CHUNK: &[u8; 4] = b"IEND";

/// Length and type fields preceding chunk data
const CHUNK_HEADER_SIZE: usize = 8;

/// CRC following chunk data
const CHUNK_CRC_SIZE: usize = 4;

/// Check if data starts with the PNG signature.
#[inline]
pub fn is_png(data: &[u8]) -> bool {
    data.len() >= PNG_SIGNATURE.len() && data[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Find the data of the `eXIf` chunk.
///
/// Returns `None` if the data is not a PNG, if a chunk runs past the end of
/// the data, or if the file has no `eXIf` chunk.
pub fn find_exif_chunk(data: &[u8]) -> Option<Range<usize>> {
    if !is_png(data) {
        return None;
    }

    let mut pos = PNG_SIGNATURE.len();
    while pos + CHUNK_HEADER_SIZE <= data.len() {
        let length = u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
        let chunk_type = &data[pos + 4..pos + 8];

        let data_start = pos + CHUNK_HEADER_SIZE;
        let data_end = data_start.checked_add(length as usize)?;
        if data_end > data.len() {
            trace!(pos, length, "Chunk runs past end of data");
            return None;
        }

        if chunk_type == EXIF_CHUNK {
            return Some(data_start..data_end);
        }
        if chunk_type == END_CHUNK {
            return None;
        }

        pos = data_end + CHUNK_CRC_SIZE;
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
