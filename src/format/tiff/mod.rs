//! TIFF decoding for EXIF blocks.
//!
//! An EXIF block is a classic TIFF structure whose IFDs hold metadata tags
//! instead of image data.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares its endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values in the block use that order.
//!
//! - **IFD (Image File Directory)**: a table of 12-byte tag entries. IFD0
//!   points to the Exif and GPS sub-IFDs, the Exif IFD points to the
//!   Interoperability IFD, and IFD0's next-IFD link leads to the thumbnail.
//!
//! - **Inline vs offset values**: values of up to 4 bytes are stored inline in
//!   the entry, larger values are stored at an offset the entry points to.

mod directory;
mod parser;
mod tags;
mod values;

pub use directory::{decode, TagDictionary};
pub use parser::{
    tiff_payload, ByteOrder, IfdEntry, TiffHeader, TiffReader, EXIF_IDENTIFIER, IFD_ENTRY_SIZE,
    TIFF_HEADER_SIZE,
};
pub use tags::{tag_name, FieldType, GpsTag, ImageTag, IopTag, Namespace, PhotoTag};
pub use values::{decode_value, Number, Rational, SRational, Value};
