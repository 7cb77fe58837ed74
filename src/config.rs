//! Command-line configuration for exif-probe.
//!
//! Options can be given as flags or through environment variables with the
//! `EXIF_PROBE_` prefix:
//!
//! - `EXIF_PROBE_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_PROBE_RAW` - Also print the decoded tag dictionary (default: false)
//! - `EXIF_PROBE_MAX_FILE_SIZE` - Largest file to read, in bytes (default: 64 MiB)
//! - `EXIF_PROBE_VERBOSE` - Enable debug logging (default: false)
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use exif_probe::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! ```

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::io::DEFAULT_MAX_FILE_SIZE;

// =============================================================================
// Output Format
// =============================================================================

/// How summaries are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing of entries and groups
    #[default]
    Text,
    /// One pretty-printed JSON object per file
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Extract and summarize EXIF metadata from JPEG and PNG images.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-probe")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_PROBE_FORMAT")]
    pub format: OutputFormat,

    /// Also print the decoded tag dictionary as JSON
    #[arg(long, default_value_t = false, env = "EXIF_PROBE_RAW")]
    pub raw: bool,

    /// Maximum file size to read, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "EXIF_PROBE_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false, env = "EXIF_PROBE_VERBOSE")]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one image file is required".to_string());
        }

        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Log filter directive for the configured verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "exif_probe=debug"
        } else {
            "exif_probe=info"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
