//! Test utilities for integration tests.
//!
//! This module provides builders for synthetic EXIF blocks (a TIFF structure
//! with IFD0, Exif, GPS, Interoperability and thumbnail IFDs in either byte
//! order) and helpers that wrap them in JPEG and PNG containers.

// =============================================================================
// Byte Order
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn i32(self, value: i32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

// =============================================================================
// IFD Builder
// =============================================================================

/// Value of an entry, encoded once the byte order is known.
#[derive(Clone)]
enum Payload {
    Bytes(Vec<u8>),
    Ascii(String),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Offset of another IFD in the tree, resolved during layout
    Pointer(Slot),
    /// Verbatim 4-byte value/offset field
    Raw([u8; 4]),
}

#[derive(Clone)]
struct EntrySpec {
    tag: u16,
    field_type: u16,
    count: u32,
    payload: Payload,
}

/// Builder for the entries of a single IFD.
#[derive(Clone, Default)]
pub struct IfdBuilder {
    entries: Vec<EntrySpec>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: u16, field_type: u16, count: u32, payload: Payload) -> Self {
        self.entries.push(EntrySpec {
            tag,
            field_type,
            count,
            payload,
        });
        self
    }

    /// Add an ASCII entry; the count includes the terminating NUL.
    pub fn ascii(self, tag: u16, value: &str) -> Self {
        let count = value.len() as u32 + 1;
        self.push(tag, 2, count, Payload::Ascii(value.to_string()))
    }

    pub fn byte(self, tag: u16, value: u8) -> Self {
        self.push(tag, 1, 1, Payload::Bytes(vec![value]))
    }

    pub fn bytes(self, tag: u16, values: &[u8]) -> Self {
        self.push(tag, 1, values.len() as u32, Payload::Bytes(values.to_vec()))
    }

    pub fn undefined(self, tag: u16, values: &[u8]) -> Self {
        self.push(tag, 7, values.len() as u32, Payload::Bytes(values.to_vec()))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.push(tag, 3, 1, Payload::Shorts(vec![value]))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.push(tag, 4, 1, Payload::Longs(vec![value]))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        self.push(tag, 5, 1, Payload::Rationals(vec![(numerator, denominator)]))
    }

    pub fn rationals(self, tag: u16, values: &[(u32, u32)]) -> Self {
        self.push(
            tag,
            5,
            values.len() as u32,
            Payload::Rationals(values.to_vec()),
        )
    }

    pub fn srational(self, tag: u16, numerator: i32, denominator: i32) -> Self {
        self.push(tag, 10, 1, Payload::SRationals(vec![(numerator, denominator)]))
    }

    /// Add an entry with an arbitrary header and a verbatim value/offset field.
    ///
    /// Useful for entries whose offset points outside the block.
    pub fn raw(self, tag: u16, field_type: u16, count: u32, value_offset: [u8; 4]) -> Self {
        self.push(tag, field_type, count, Payload::Raw(value_offset))
    }

    fn pointer(self, tag: u16, slot: Slot) -> Self {
        self.push(tag, 4, 1, Payload::Pointer(slot))
    }
}

// =============================================================================
// EXIF Builder
// =============================================================================

/// Position of an IFD in the laid-out block.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Image,
    Exif,
    Interop,
    Gps,
    Thumbnail,
}

/// Builder for a complete EXIF TIFF structure.
///
/// Pointer entries (Exif, GPS, Interoperability) and IFD0's next-IFD link are
/// added automatically for every sub-IFD that is set.
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    image: IfdBuilder,
    exif: Option<IfdBuilder>,
    interop: Option<IfdBuilder>,
    gps: Option<IfdBuilder>,
    thumbnail: Option<IfdBuilder>,
    next_ifd_override: Option<u32>,
}

impl ExifBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            image: IfdBuilder::new(),
            exif: None,
            interop: None,
            gps: None,
            thumbnail: None,
            next_ifd_override: None,
        }
    }

    pub fn image(mut self, ifd: IfdBuilder) -> Self {
        self.image = ifd;
        self
    }

    pub fn exif(mut self, ifd: IfdBuilder) -> Self {
        self.exif = Some(ifd);
        self
    }

    /// Set the Interoperability IFD (only linked when an Exif IFD is set).
    pub fn interop(mut self, ifd: IfdBuilder) -> Self {
        self.interop = Some(ifd);
        self
    }

    pub fn gps(mut self, ifd: IfdBuilder) -> Self {
        self.gps = Some(ifd);
        self
    }

    pub fn thumbnail(mut self, ifd: IfdBuilder) -> Self {
        self.thumbnail = Some(ifd);
        self
    }

    /// Force IFD0's next-IFD offset, e.g. back to IFD0 itself.
    pub fn next_ifd(mut self, offset: u32) -> Self {
        self.next_ifd_override = Some(offset);
        self
    }

    /// Build the bare TIFF structure (as stored in a PNG `eXIf` chunk).
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;

        // Materialize the IFDs in layout order, with pointer entries added
        let mut image = self.image.clone();
        if self.exif.is_some() {
            image = image.pointer(0x8769, Slot::Exif);
        }
        if self.gps.is_some() {
            image = image.pointer(0x8825, Slot::Gps);
        }

        let mut ifds: Vec<(Slot, IfdBuilder)> = vec![(Slot::Image, image)];
        if let Some(exif) = &self.exif {
            let mut exif = exif.clone();
            if self.interop.is_some() {
                exif = exif.pointer(0xA005, Slot::Interop);
            }
            ifds.push((Slot::Exif, exif));
            if let Some(interop) = &self.interop {
                ifds.push((Slot::Interop, interop.clone()));
            }
        }
        if let Some(gps) = &self.gps {
            ifds.push((Slot::Gps, gps.clone()));
        }
        if let Some(thumbnail) = &self.thumbnail {
            ifds.push((Slot::Thumbnail, thumbnail.clone()));
        }

        for (_, ifd) in ifds.iter_mut() {
            ifd.entries.sort_by_key(|e| e.tag);
        }

        // First pass: compute the offset of every IFD
        let mut offsets: Vec<(Slot, u32)> = Vec::new();
        let mut cursor = 8u32;
        for (slot, ifd) in &ifds {
            offsets.push((*slot, cursor));
            cursor += ifd_size(ifd, order);
        }
        let offset_of = |slot: Slot| {
            offsets
                .iter()
                .find(|(s, _)| *s == slot)
                .map(|(_, o)| *o)
                .unwrap_or(0)
        };

        // Second pass: serialize
        let mut data = Vec::new();
        data.extend_from_slice(match order {
            ByteOrderType::LittleEndian => b"II",
            ByteOrderType::BigEndian => b"MM",
        });
        data.extend_from_slice(&order.u16(42));
        data.extend_from_slice(&order.u32(8));

        for (slot, ifd) in &ifds {
            let next = match slot {
                Slot::Image => self
                    .next_ifd_override
                    .unwrap_or_else(|| offset_of(Slot::Thumbnail)),
                _ => 0,
            };
            write_ifd(&mut data, ifd, order, next, &offset_of);
        }

        data
    }

    /// Build the block as carried by a JPEG APP1 segment.
    pub fn build_app1(self) -> Vec<u8> {
        let mut block = b"Exif\0\0".to_vec();
        block.extend(self.build());
        block
    }
}

fn encode(payload: &Payload, order: ByteOrderType, offset_of: &dyn Fn(Slot) -> u32) -> Vec<u8> {
    match payload {
        Payload::Bytes(bytes) => bytes.clone(),
        Payload::Ascii(s) => {
            let mut out = s.as_bytes().to_vec();
            out.push(0);
            out
        }
        Payload::Shorts(values) => values.iter().flat_map(|v| order.u16(*v)).collect(),
        Payload::Longs(values) => values.iter().flat_map(|v| order.u32(*v)).collect(),
        Payload::Rationals(values) => values
            .iter()
            .flat_map(|(n, d)| order.u32(*n).into_iter().chain(order.u32(*d)))
            .collect(),
        Payload::SRationals(values) => values
            .iter()
            .flat_map(|(n, d)| order.i32(*n).into_iter().chain(order.i32(*d)))
            .collect(),
        Payload::Pointer(slot) => order.u32(offset_of(*slot)).to_vec(),
        Payload::Raw(field) => field.to_vec(),
    }
}

fn ifd_size(ifd: &IfdBuilder, order: ByteOrderType) -> u32 {
    let external: usize = ifd
        .entries
        .iter()
        .map(|e| match &e.payload {
            Payload::Raw(_) | Payload::Pointer(_) => 0,
            payload => {
                let len = encode(payload, order, &|_| 0).len();
                if len > 4 {
                    len
                } else {
                    0
                }
            }
        })
        .sum();
    (2 + ifd.entries.len() * 12 + 4 + external) as u32
}

fn write_ifd(
    data: &mut Vec<u8>,
    ifd: &IfdBuilder,
    order: ByteOrderType,
    next_ifd: u32,
    offset_of: &dyn Fn(Slot) -> u32,
) {
    let entries_end = data.len() + 2 + ifd.entries.len() * 12 + 4;
    let mut external = Vec::new();

    data.extend_from_slice(&order.u16(ifd.entries.len() as u16));
    for entry in &ifd.entries {
        data.extend_from_slice(&order.u16(entry.tag));
        data.extend_from_slice(&order.u16(entry.field_type));
        data.extend_from_slice(&order.u32(entry.count));

        let value = encode(&entry.payload, order, offset_of);
        match entry.payload {
            Payload::Raw(_) | Payload::Pointer(_) => data.extend_from_slice(&value),
            _ if value.len() <= 4 => {
                let mut field = [0u8; 4];
                field[..value.len()].copy_from_slice(&value);
                data.extend_from_slice(&field);
            }
            _ => {
                let offset = (entries_end + external.len()) as u32;
                data.extend_from_slice(&order.u32(offset));
                external.extend(value);
            }
        }
    }
    data.extend_from_slice(&order.u32(next_ifd));
    data.extend(external);
}

// =============================================================================
// Fixtures
// =============================================================================

/// A typical camera file: IFD0, Exif, Interop, GPS and thumbnail IFDs.
///
/// GPS is 40° 26' 46" N, 79° 56' 55" W (40.446111, -79.948611).
pub fn camera_exif(byte_order: ByteOrderType) -> ExifBuilder {
    ExifBuilder::new(byte_order)
        .image(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .ascii(0x0110, "Canon EOS R5")
                .short(0x0112, 1)
                .ascii(0x0131, "Firmware Version 1.8.1")
                .ascii(0x0132, "2024:03:05 15:09:26"),
        )
        .exif(
            IfdBuilder::new()
                .rational(0x829A, 1, 250)
                .rational(0x829D, 28, 10)
                .short(0x8822, 3)
                .short(0x8827, 400)
                .ascii(0x9003, "2024:03:05 15:09:26")
                .srational(0x9204, 1, 3)
                .rational(0x920A, 50, 1)
                .short(0xA001, 1)
                .long(0xA002, 8192)
                .long(0xA003, 5464)
                .short(0xA403, 0)
                .ascii(0xA434, "RF24-70mm F2.8 L IS USM"),
        )
        .interop(
            IfdBuilder::new()
                .ascii(0x0001, "R98")
                .undefined(0x0002, b"0100"),
        )
        .gps(
            IfdBuilder::new()
                .bytes(0x0000, &[2, 3, 0, 0])
                .ascii(0x0001, "N")
                .rationals(0x0002, &[(40, 1), (26, 1), (46, 1)])
                .ascii(0x0003, "W")
                .rationals(0x0004, &[(79, 1), (56, 1), (55, 1)])
                .byte(0x0005, 0)
                .rational(0x0006, 2815, 10)
                .rationals(0x0007, &[(14, 1), (30, 1), (759, 100)])
                .ascii(0x001D, "2024:03:05"),
        )
        .thumbnail(
            IfdBuilder::new()
                .long(0x0100, 160)
                .long(0x0101, 120)
                .short(0x0103, 6)
                .short(0x0112, 1),
        )
}

/// Camera metadata without a GPS IFD.
pub fn camera_exif_without_gps(byte_order: ByteOrderType) -> ExifBuilder {
    let builder = camera_exif(byte_order);
    ExifBuilder {
        gps: None,
        ..builder
    }
}

// =============================================================================
// Containers
// =============================================================================

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn jpeg_segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A JPEG with a JFIF APP0 segment followed by an APP1 carrying `payload`.
pub fn jpeg_with_app1(payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend(jpeg_segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    data.extend(jpeg_segment(0xE1, payload));
    data.extend(jpeg_segment(0xDB, &[0u8; 65]));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// A JPEG with no APP1 segment at all.
pub fn jpeg_without_app1() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend(jpeg_segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    data.extend(jpeg_segment(0xDB, &[0u8; 65]));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn png_chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = (payload.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    // CRCs are not checked by the reader
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

fn png_ihdr() -> Vec<u8> {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    png_chunk(b"IHDR", &ihdr)
}

/// A PNG whose `eXIf` chunk carries `tiff`.
pub fn png_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend(png_ihdr());
    data.extend(png_chunk(b"eXIf", tiff));
    data.extend(png_chunk(b"IDAT", &[0x78, 0x9C, 0x63, 0x00, 0x00]));
    data.extend(png_chunk(b"IEND", b""));
    data
}

/// A PNG without an `eXIf` chunk.
pub fn png_without_exif() -> Vec<u8> {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend(png_ihdr());
    data.extend(png_chunk(b"IDAT", &[0x78, 0x9C, 0x63, 0x00, 0x00]));
    data.extend(png_chunk(b"IEND", b""));
    data
}
