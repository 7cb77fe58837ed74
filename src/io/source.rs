use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::error::IoError;

/// Default upper bound on the size of an uploaded image (64 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Trait for the uploaded-file boundary of the extraction pipeline.
///
/// The pipeline needs the whole file in memory before it can locate the
/// metadata block, so a source only has to produce its complete contents.
/// Implementations must be thread-safe so sources can be handed across tasks.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Read the full contents of the image.
    ///
    /// Returns an error if the source is missing, unreadable or too large.
    async fn read_all(&self) -> Result<Bytes, IoError>;

    /// Get an identifier for this source (for logging).
    ///
    /// For files this is the path as given by the caller.
    fn identifier(&self) -> &str;
}

// =============================================================================
// FileSource
// =============================================================================

/// An image stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    identifier: String,
    max_size: u64,
}

impl FileSource {
    /// Create a file source with the default size limit.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let identifier = path.display().to_string();
        Self {
            path,
            identifier,
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Override the maximum number of bytes this source will read.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Get the configured size limit.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    fn map_io_error(&self, err: std::io::Error) -> IoError {
        match err.kind() {
            ErrorKind::NotFound => IoError::NotFound(self.identifier.clone()),
            _ => IoError::Read {
                path: self.identifier.clone(),
                message: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl ImageSource for FileSource {
    async fn read_all(&self) -> Result<Bytes, IoError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.map_io_error(e))?;

        // Reject on metadata size before allocating
        if metadata.len() > self.max_size {
            warn!(
                source = %self.identifier,
                size = metadata.len(),
                limit = self.max_size,
                "Refusing to read oversized image"
            );
            return Err(IoError::TooLarge {
                size: metadata.len(),
                limit: self.max_size,
            });
        }

        // Metadata under-reports for procfs and pipes; cap the read itself
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| self.map_io_error(e))?;
        let mut data = Vec::new();
        file.take(self.max_size.saturating_add(1))
            .read_to_end(&mut data)
            .await
            .map_err(|e| self.map_io_error(e))?;

        if data.len() as u64 > self.max_size {
            warn!(
                source = %self.identifier,
                reported = metadata.len(),
                limit = self.max_size,
                "Image exceeded the size limit while reading"
            );
            return Err(IoError::TooLarge {
                size: data.len() as u64,
                limit: self.max_size,
            });
        }

        debug!(source = %self.identifier, size = data.len(), "Read image file");
        Ok(Bytes::from(data))
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// MemorySource
// =============================================================================

/// An image that is already in memory (e.g. the body of an upload request).
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
    identifier: String,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>, identifier: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            identifier: identifier.into(),
        }
    }
}

#[async_trait]
impl ImageSource for MemorySource {
    async fn read_all(&self) -> Result<Bytes, IoError> {
        Ok(self.data.clone())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
