//! exif-probe - EXIF metadata summaries for JPEG and PNG images.
//!
//! This binary reads each file given on the command line, runs the
//! extraction pipeline and prints the resulting summary.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_probe::{
    config::{Config, OutputFormat},
    error_summary, extract_from_source, Extraction, FileSource, MetadataSummary, TagDictionary,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.log_filter());

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    debug!(
        files = config.files.len(),
        format = %config.format,
        max_file_size = config.max_file_size,
        "Starting extraction"
    );

    let mut all_ok = true;
    for path in &config.files {
        let source = FileSource::new(path).with_max_size(config.max_file_size);
        let identifier = path.display().to_string();

        let (summary, tags, container) = match extract_from_source(&source).await {
            Ok(Extraction {
                container,
                tags,
                summary,
            }) => (summary, Some(tags), container.map(|c| c.name())),
            Err(e) => {
                error!("{}: {}", identifier, e);
                (error_summary(e.to_string()), None, None)
            }
        };

        all_ok &= summary.error.is_none();

        let printed = match config.format {
            OutputFormat::Text => {
                print_text(&identifier, container, &summary, tags.as_ref(), config.raw)
            }
            OutputFormat::Json => print_json(&identifier, &summary, tags.as_ref(), config.raw),
        };
        if let Err(e) = printed {
            error!("Failed to serialize output for {}: {}", identifier, e);
            all_ok = false;
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initialize the tracing/logging subsystem.
///
/// `RUST_LOG` takes precedence over the verbosity flag. Logs go to stderr so
/// they never mix with the summaries on stdout.
fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Output
// =============================================================================

fn print_text(
    identifier: &str,
    container: Option<&str>,
    summary: &MetadataSummary,
    tags: Option<&TagDictionary>,
    raw: bool,
) -> Result<(), serde_json::Error> {
    match container {
        Some(container) => println!("== {} ({}) ==", identifier, container),
        None => println!("== {} ==", identifier),
    }
    print!("{}", summary);

    if raw {
        if let Some(tags) = tags {
            println!("Tags:");
            println!("{}", serde_json::to_string_pretty(tags)?);
        }
    }
    println!();

    Ok(())
}

fn print_json(
    identifier: &str,
    summary: &MetadataSummary,
    tags: Option<&TagDictionary>,
    raw: bool,
) -> Result<(), serde_json::Error> {
    let mut output = serde_json::json!({
        "file": identifier,
        "summary": summary,
    });
    if raw {
        output["tags"] = serde_json::to_value(tags)?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
