//! TIFF header and IFD entry parsing.
//!
//! An EXIF block is a small classic TIFF structure. Every offset inside it is
//! relative to the start of the TIFF header, not to the start of the file.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic number (42 = 0x002A)
//! Bytes 4-7: Offset to IFD0 (4 bytes)
//! ```
//!
//! # IFD Entry Structure (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag id
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Count (number of values, not bytes)
//! Bytes 8-11: Value (if it fits in 4 bytes) or offset to the value
//! ```

use crate::error::TiffError;

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Magic number for classic TIFF
const TIFF_MAGIC: u16 = 42;

/// Identifier that prefixes the TIFF structure inside a JPEG APP1 segment
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of a single IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the value/offset field in an IFD entry
pub const VALUE_OFFSET_SIZE: usize = 4;

/// Field type code used by some writers for sub-IFD pointers
const FIELD_TYPE_IFD: u16 = 13;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF structure.
///
/// Declared once in the header and applied to every multi-byte value in the
/// block, including values nested in sub-IFDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    #[inline]
    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn u64_from(self, bytes: [u8; 8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
        }
    }

    /// Whether this is big-endian ("MM").
    #[inline]
    pub const fn is_big_endian(self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }
}

// =============================================================================
// TiffReader
// =============================================================================

/// Bounds-checked reader over an immutable TIFF structure.
///
/// Every read takes an absolute offset from the start of the TIFF header and
/// returns `None` instead of panicking when the requested bytes are not all
/// inside the block. Offsets come straight from untrusted files, so all
/// arithmetic is checked.
#[derive(Debug, Clone, Copy)]
pub struct TiffReader<'a> {
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> TiffReader<'a> {
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total size of the TIFF structure in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.bytes(offset, N)?.try_into().ok()
    }

    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub fn read_i8(&self, offset: usize) -> Option<i8> {
        self.read_u8(offset).map(|b| b as i8)
    }

    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        self.array(offset).map(|b| self.byte_order.u16_from(b))
    }

    pub fn read_i16(&self, offset: usize) -> Option<i16> {
        self.read_u16(offset).map(|v| v as i16)
    }

    pub fn read_u32(&self, offset: usize) -> Option<u32> {
        self.array(offset).map(|b| self.byte_order.u32_from(b))
    }

    pub fn read_i32(&self, offset: usize) -> Option<i32> {
        self.read_u32(offset).map(|v| v as i32)
    }

    pub fn read_f32(&self, offset: usize) -> Option<f32> {
        self.read_u32(offset).map(f32::from_bits)
    }

    pub fn read_f64(&self, offset: usize) -> Option<f64> {
        self.array(offset)
            .map(|b| f64::from_bits(self.byte_order.u64_from(b)))
    }

    /// Read an unsigned rational (two consecutive u32 values).
    pub fn read_rational(&self, offset: usize) -> Option<(u32, u32)> {
        let numerator = self.read_u32(offset)?;
        let denominator = self.read_u32(offset.checked_add(4)?)?;
        Some((numerator, denominator))
    }

    /// Read a signed rational (two consecutive i32 values).
    pub fn read_srational(&self, offset: usize) -> Option<(i32, i32)> {
        let numerator = self.read_i32(offset)?;
        let denominator = self.read_i32(offset.checked_add(4)?)?;
        Some((numerator, denominator))
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset to IFD0, relative to the start of the header
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of a TIFF structure.
    ///
    /// # Errors
    /// - `FileTooSmall` if there aren't enough bytes for the header
    /// - `InvalidByteOrder` if the first two bytes are not II or MM
    /// - `InvalidMagic` if the magic number is not 42
    /// - `InvalidIfdOffset` if IFD0 starts outside the block
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        // Read as little-endian because we're checking for specific byte patterns
        let mark = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match mark {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidByteOrder(mark)),
        };

        let magic = byte_order.u16_from([bytes[2], bytes[3]]);
        if magic != TIFF_MAGIC {
            return Err(TiffError::InvalidMagic(magic));
        }

        let first_ifd_offset = byte_order.u32_from([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if first_ifd_offset as usize >= bytes.len() {
            return Err(TiffError::InvalidIfdOffset(first_ifd_offset));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

/// Find the TIFF structure inside a located metadata block.
///
/// JPEG APP1 payloads carry the `Exif\0\0` identifier before the TIFF header;
/// PNG `eXIf` chunks start directly with the byte order mark.
pub fn tiff_payload(block: &[u8]) -> Result<&[u8], TiffError> {
    if let Some(rest) = block.strip_prefix(EXIF_IDENTIFIER.as_slice()) {
        return Ok(rest);
    }
    if block.starts_with(b"II") || block.starts_with(b"MM") {
        return Ok(block);
    }
    Err(TiffError::MissingIdentifier)
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte IFD entry, before its value is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag id (meaning depends on which IFD the entry lives in)
    pub tag_id: u16,

    /// Raw field type code (may be a type this parser does not know)
    pub type_code: u16,

    /// Number of values of the field type
    pub count: u32,

    /// The raw value/offset field, exactly as stored
    pub value_offset_bytes: [u8; VALUE_OFFSET_SIZE],
}

impl IfdEntry {
    /// Parse the entry starting at `offset`.
    ///
    /// Returns `None` if the 12-byte record is not entirely inside the block.
    pub fn parse(reader: &TiffReader<'_>, offset: usize) -> Option<Self> {
        let record = reader.bytes(offset, IFD_ENTRY_SIZE)?;
        let order = reader.byte_order();
        Some(IfdEntry {
            tag_id: order.u16_from([record[0], record[1]]),
            type_code: order.u16_from([record[2], record[3]]),
            count: order.u32_from([record[4], record[5], record[6], record[7]]),
            value_offset_bytes: [record[8], record[9], record[10], record[11]],
        })
    }

    /// The field type, if it is one of the twelve classic TIFF types.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.type_code)
    }

    /// Total size of the value in bytes, or `None` for unknown field types.
    #[inline]
    pub fn value_byte_size(&self) -> Option<u64> {
        self.field_type()
            .map(|t| t.size_in_bytes() as u64 * self.count as u64)
    }

    /// Whether the value is stored inline in the value/offset field.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.value_byte_size(), Some(size) if size <= VALUE_OFFSET_SIZE as u64)
    }

    /// Interpret the value/offset field as an offset.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.u32_from(self.value_offset_bytes)
    }

    /// Interpret the entry as a pointer to a sub-IFD.
    ///
    /// Pointers are normally a single LONG, but SHORT and the IFD type show up
    /// in the wild too. Zero means "no sub-IFD".
    pub fn sub_ifd_offset(&self, byte_order: ByteOrder) -> Option<u32> {
        if self.count != 1 {
            return None;
        }
        let offset = match self.type_code {
            t if t == FieldType::Long as u16 || t == FIELD_TYPE_IFD => {
                self.value_offset(byte_order)
            }
            t if t == FieldType::Short as u16 => byte_order
                .u16_from([self.value_offset_bytes[0], self.value_offset_bytes[1]])
                as u32,
            _ => return None,
        };
        (offset != 0).then_some(offset)
    }
}

// =============================================================================
// Tests
// =============================================================================
