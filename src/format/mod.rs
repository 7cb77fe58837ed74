//! Container parsing and EXIF decoding.
//!
//! Extraction runs in two stages:
//!
//! 1. [`detect::locate`] finds the raw EXIF block inside a JPEG or PNG file
//! 2. [`tiff::decode`] turns that block into a [`tiff::TagDictionary`]
//!
//! Neither stage fails: unrecognized or malformed input produces `None` or an
//! empty dictionary, which the summary layer reports as missing metadata.

pub mod detect;
pub mod jpeg;
pub mod png;
pub mod tiff;

pub use detect::{detect_container, locate, ContainerFormat, RawBlock};
