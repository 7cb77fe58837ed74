//! IFD tree walking and the decoded tag dictionary.
//!
//! The walk starts at IFD0 (`Image`), follows the Exif and GPS pointers found
//! there (`Photo`, `GPSInfo`), the Interoperability pointer inside the Exif
//! IFD (`Iop`), and IFD0's next-IFD link (`Thumbnail`).
//!
//! Decoding never fails. A rejected header yields an empty dictionary; a bad
//! entry, a truncated IFD or a cyclic pointer only stops that piece of the
//! tree, and everything decoded so far is kept.

use std::collections::{BTreeMap, HashSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::TiffError;

use super::parser::{tiff_payload, ByteOrder, IfdEntry, TiffHeader, TiffReader, IFD_ENTRY_SIZE};
use super::tags::{tag_name, GpsTag, ImageTag, IopTag, Namespace, PhotoTag};
use super::values::{decode_value, Value};

// =============================================================================
// TagDictionary
// =============================================================================

/// Decoded tags of an EXIF block, grouped by the IFD they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDictionary {
    byte_order: Option<ByteOrder>,
    namespaces: BTreeMap<Namespace, BTreeMap<u16, Value>>,
}

impl TagDictionary {
    /// An empty dictionary for a block that could not be decoded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty dictionary for a block read with the given byte order.
    pub fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self {
            byte_order: Some(byte_order),
            namespaces: BTreeMap::new(),
        }
    }

    /// Byte order of the block, `None` if the header was rejected.
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.byte_order
    }

    pub fn get(&self, namespace: Namespace, tag_id: u16) -> Option<&Value> {
        self.namespaces.get(&namespace)?.get(&tag_id)
    }

    pub fn insert(&mut self, namespace: Namespace, tag_id: u16, value: Value) {
        self.namespaces
            .entry(namespace)
            .or_default()
            .insert(tag_id, value);
    }

    /// Number of tags decoded into a namespace.
    pub fn namespace_len(&self, namespace: Namespace) -> usize {
        self.namespaces.get(&namespace).map_or(0, BTreeMap::len)
    }

    /// Iterate over the tags of a namespace in tag id order.
    pub fn entries(&self, namespace: Namespace) -> impl Iterator<Item = (u16, &Value)> {
        self.namespaces
            .get(&namespace)
            .into_iter()
            .flat_map(|tags| tags.iter().map(|(id, value)| (*id, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.values().all(BTreeMap::is_empty)
    }

    pub fn image(&self, tag: ImageTag) -> Option<&Value> {
        self.get(Namespace::Image, tag.as_u16())
    }

    pub fn photo(&self, tag: PhotoTag) -> Option<&Value> {
        self.get(Namespace::Photo, tag.as_u16())
    }

    pub fn gps(&self, tag: GpsTag) -> Option<&Value> {
        self.get(Namespace::GpsInfo, tag.as_u16())
    }

    pub fn thumbnail(&self, tag: ImageTag) -> Option<&Value> {
        self.get(Namespace::Thumbnail, tag.as_u16())
    }

    pub fn iop(&self, tag: IopTag) -> Option<&Value> {
        self.get(Namespace::Iop, tag.as_u16())
    }
}

/// Serializes as `{ "bigEndian": bool?, "Image": { "Make": ..., "0x9999": ... }, ... }`.
impl Serialize for TagDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Tags<'a>(Namespace, &'a BTreeMap<u16, Value>);

        impl Serialize for Tags<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.1.len()))?;
                for (id, value) in self.1 {
                    match tag_name(self.0, *id) {
                        Some(name) => map.serialize_entry(name, value)?,
                        None => map.serialize_entry(&format!("0x{:04X}", id), value)?,
                    }
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(None)?;
        if let Some(order) = self.byte_order {
            map.serialize_entry("bigEndian", &order.is_big_endian())?;
        }
        for (namespace, tags) in &self.namespaces {
            if !tags.is_empty() {
                map.serialize_entry(namespace.name(), &Tags(*namespace, tags))?;
            }
        }
        map.end()
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a located metadata block into a tag dictionary.
///
/// Accepts both JPEG APP1 payloads (starting with `Exif\0\0`) and bare TIFF
/// structures from PNG `eXIf` chunks.
pub fn decode(block: &[u8]) -> TagDictionary {
    match try_decode(block) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            debug!(error = %e, "Rejected EXIF block");
            TagDictionary::empty()
        }
    }
}

fn try_decode(block: &[u8]) -> Result<TagDictionary, TiffError> {
    let tiff = tiff_payload(block)?;
    let header = TiffHeader::parse(tiff)?;
    let reader = TiffReader::new(tiff, header.byte_order);

    let mut walker = DirectoryWalker::new(reader);
    let next = walker.walk(header.first_ifd_offset, Namespace::Image);
    if let Some(thumbnail_offset) = next {
        walker.walk(thumbnail_offset, Namespace::Thumbnail);
    }

    Ok(walker.finish())
}

/// Accumulates tags while walking the IFD tree of one block.
struct DirectoryWalker<'a> {
    reader: TiffReader<'a>,
    dictionary: TagDictionary,
    visited: HashSet<u32>,
}

impl<'a> DirectoryWalker<'a> {
    fn new(reader: TiffReader<'a>) -> Self {
        Self {
            reader,
            dictionary: TagDictionary::with_byte_order(reader.byte_order()),
            visited: HashSet::new(),
        }
    }

    fn finish(self) -> TagDictionary {
        self.dictionary
    }

    /// Walk the IFD at `offset`, storing its entries under `namespace` and
    /// recursing into any sub-IFDs it points to.
    ///
    /// Returns the offset of the next IFD in the chain, if any.
    fn walk(&mut self, offset: u32, namespace: Namespace) -> Option<u32> {
        if !self.visited.insert(offset) {
            debug!(offset, namespace = namespace.name(), "IFD already visited, skipping");
            return None;
        }

        let start = offset as usize;
        let Some(count) = self.reader.read_u16(start) else {
            debug!(offset, namespace = namespace.name(), "IFD offset outside block");
            return None;
        };
        trace!(offset, count, namespace = namespace.name(), "Walking IFD");

        let order = self.reader.byte_order();
        let mut sub_ifds = Vec::new();
        let mut complete = true;

        for index in 0..count as usize {
            let entry_offset = start + 2 + index * IFD_ENTRY_SIZE;
            let Some(entry) = IfdEntry::parse(&self.reader, entry_offset) else {
                debug!(
                    offset,
                    index,
                    namespace = namespace.name(),
                    "IFD truncated, keeping entries read so far"
                );
                complete = false;
                break;
            };

            if let Some(child) = sub_ifd_namespace(namespace, entry.tag_id) {
                if let Some(child_offset) = entry.sub_ifd_offset(order) {
                    sub_ifds.push((child, child_offset));
                }
                continue;
            }

            match decode_value(&entry, &self.reader) {
                Some(value) => self.dictionary.insert(namespace, entry.tag_id, value),
                None => debug!(
                    tag = entry.tag_id,
                    type_code = entry.type_code,
                    count = entry.count,
                    namespace = namespace.name(),
                    "Skipping undecodable entry"
                ),
            }
        }

        for (child, child_offset) in sub_ifds {
            self.walk(child_offset, child);
        }

        if !complete {
            return None;
        }
        let next_offset = start + 2 + count as usize * IFD_ENTRY_SIZE;
        self.reader.read_u32(next_offset).filter(|&next| next != 0)
    }
}

/// The namespace a pointer tag leads to, if `tag_id` is a pointer in `parent`.
fn sub_ifd_namespace(parent: Namespace, tag_id: u16) -> Option<Namespace> {
    match (parent, ImageTag::from_u16(tag_id), PhotoTag::from_u16(tag_id)) {
        (Namespace::Image, Some(ImageTag::ExifIfdPointer), _) => Some(Namespace::Photo),
        (Namespace::Image, Some(ImageTag::GpsIfdPointer), _) => Some(Namespace::GpsInfo),
        (Namespace::Photo, _, Some(PhotoTag::InteropIfdPointer)) => Some(Namespace::Iop),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
