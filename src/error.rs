use thiserror::Error;

/// I/O errors that can occur when reading an uploaded image
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The source does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Reading the source failed
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The source is larger than the configured limit
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// Errors that can occur when parsing the TIFF structure of an EXIF block.
///
/// These never escape the decoder: a rejected header produces an empty
/// tag dictionary rather than a failed extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Block starts with neither the Exif identifier nor a TIFF byte order mark
    #[error("Unrecognized metadata identifier")]
    MissingIdentifier,

    /// Block is too small to contain a valid TIFF header
    #[error("Block too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: usize, actual: usize },

    /// Invalid byte order mark (not II or MM)
    #[error("Invalid byte order mark: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// Invalid TIFF magic number
    #[error("Invalid TIFF magic number: expected 42, got {0}")]
    InvalidMagic(u16),

    /// IFD0 offset points outside the block
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u32),
}
