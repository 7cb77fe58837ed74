//! Decoding of IFD entry values.
//!
//! A value is stored inline in the entry's 4-byte value/offset field when it
//! fits, and out of line at an offset inside the TIFF structure otherwise.
//! Out-of-line reads are bounds-checked; an entry whose data would run past
//! the end of the block decodes to `None` and is dropped by the caller.

use serde::{Serialize, Serializer};

use super::parser::{IfdEntry, TiffReader, VALUE_OFFSET_SIZE};
use super::tags::FieldType;

// =============================================================================
// Rationals
// =============================================================================

/// Unsigned rational (RATIONAL field type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The ratio as a float. A zero denominator gives a non-finite result.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Signed rational (SRATIONAL field type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

// =============================================================================
// Values
// =============================================================================

/// A single numeric element of a decoded entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// BYTE, SHORT or LONG
    Unsigned(u32),
    /// SBYTE, SSHORT or SLONG
    Signed(i32),
    Rational(Rational),
    SRational(SRational),
    /// FLOAT or DOUBLE
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Unsigned(v) => v as f64,
            Number::Signed(v) => v as f64,
            Number::Rational(r) => r.to_f64(),
            Number::SRational(r) => r.to_f64(),
            Number::Float(v) => v,
        }
    }

    /// The raw numerator/denominator pair for rational elements.
    pub fn as_rational(self) -> Option<Rational> {
        match self {
            Number::Rational(r) => Some(r),
            _ => None,
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Unsigned(v) => serializer.serialize_u32(v),
            Number::Signed(v) => serializer.serialize_i32(v),
            other => serializer.serialize_f64(other.to_f64()),
        }
    }
}

/// A decoded entry value.
///
/// Numeric entries with a count of one are unwrapped to [`Value::Number`];
/// every other numeric entry is a [`Value::Array`], even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(Number),
    Array(Vec<Number>),
    Ascii(String),
    Undefined(Vec<u8>),
}

impl Value {
    /// The value as a float, only for scalar numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            _ => None,
        }
    }

    /// The value as an unsigned integer, only for scalar BYTE/SHORT/LONG values.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Number(Number::Unsigned(v)) => Some(*v),
            _ => None,
        }
    }

    /// The elements of an array value as floats.
    pub fn as_f64_array(&self) -> Option<Vec<f64>> {
        match self {
            Value::Array(items) => Some(items.iter().map(|n| n.to_f64()).collect()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Number]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Ascii(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Undefined(b) => Some(b),
            _ => None,
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the value of an IFD entry.
///
/// Returns `None` when the field type is unknown or when the out-of-line data
/// does not fit inside the block.
pub fn decode_value(entry: &IfdEntry, reader: &TiffReader<'_>) -> Option<Value> {
    let field_type = entry.field_type()?;
    let count = usize::try_from(entry.count).ok()?;
    let size = count.checked_mul(field_type.size_in_bytes())?;

    let data = if size <= VALUE_OFFSET_SIZE {
        &entry.value_offset_bytes[..size]
    } else {
        let offset = entry.value_offset(reader.byte_order()) as usize;
        reader.bytes(offset, size)?
    };

    // Re-read the value bytes with the block's byte order
    let local = TiffReader::new(data, reader.byte_order());
    decode_elements(field_type, count, &local)
}

fn decode_elements(field_type: FieldType, count: usize, data: &TiffReader<'_>) -> Option<Value> {
    let width = field_type.size_in_bytes();
    let element = |i: usize| -> Option<Number> {
        let at = i * width;
        Some(match field_type {
            FieldType::Byte => Number::Unsigned(data.read_u8(at)? as u32),
            FieldType::Short => Number::Unsigned(data.read_u16(at)? as u32),
            FieldType::Long => Number::Unsigned(data.read_u32(at)?),
            FieldType::SByte => Number::Signed(data.read_i8(at)? as i32),
            FieldType::SShort => Number::Signed(data.read_i16(at)? as i32),
            FieldType::SLong => Number::Signed(data.read_i32(at)?),
            FieldType::Rational => {
                let (n, d) = data.read_rational(at)?;
                Number::Rational(Rational::new(n, d))
            }
            FieldType::SRational => {
                let (n, d) = data.read_srational(at)?;
                Number::SRational(SRational::new(n, d))
            }
            FieldType::Float => Number::Float(data.read_f32(at)? as f64),
            FieldType::Double => Number::Float(data.read_f64(at)?),
            FieldType::Ascii | FieldType::Undefined => return None,
        })
    };

    match field_type {
        FieldType::Ascii => {
            let bytes = data.bytes(0, count)?;
            // Stop at the first NUL; some writers pad with several
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            let text = String::from_utf8_lossy(&bytes[..end]);
            Some(Value::Ascii(text.trim().to_string()))
        }
        FieldType::Undefined => Some(Value::Undefined(data.bytes(0, count)?.to_vec())),
        _ if count == 1 => element(0).map(Value::Number),
        _ => (0..count)
            .map(element)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
    }
}

// =============================================================================
// Tests
// =============================================================================
