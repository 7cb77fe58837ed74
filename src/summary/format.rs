//! Formatting helpers for individual EXIF values.
//!
//! Every helper is total: values that are missing, non-finite or outside the
//! range that makes sense for the field produce `None` rather than a
//! misleading string.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::format::tiff::{Number, Value};

/// Date-time layout used by EXIF ASCII fields.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Medium date, short time: `Mar 5, 2024, 3:09 PM`.
const DISPLAY_DATETIME_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Bytes of an UNDEFINED value shown before truncating.
const MAX_HEX_BYTES: usize = 16;

// =============================================================================
// Value Access
// =============================================================================

/// A scalar numeric value as a finite float.
pub fn finite(value: Option<&Value>) -> Option<f64> {
    value?.as_f64().filter(|v| v.is_finite())
}

/// A scalar numeric value, or the first element of a numeric array.
pub fn first_finite(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Array(items) => items.first().map(|n| n.to_f64()).filter(|v| v.is_finite()),
        other => finite(Some(other)),
    }
}

/// A non-empty text value.
pub fn text(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}

// =============================================================================
// Photo Settings
// =============================================================================

/// Format an exposure time in seconds.
///
/// Fast shutter speeds are shown as a fraction when the reciprocal is within
/// 0.01 of an integer (`1/250s`); everything else is shown in seconds with
/// four decimals.
pub fn format_exposure(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }

    let reciprocal = 1.0 / seconds;
    if reciprocal > 1.0 {
        let rounded = reciprocal.round();
        if (reciprocal - rounded).abs() < 0.01 {
            return Some(format!("1/{}s", rounded as u64));
        }
    }
    Some(format!("{:.4}s", seconds))
}

/// Format an f-number as `ƒ/2.8`.
pub fn format_aperture(f_number: f64) -> Option<String> {
    if !f_number.is_finite() || f_number <= 0.0 {
        return None;
    }
    Some(format!("ƒ/{}", round_to_tenth(f_number)))
}

/// Format an ISO speed as `ISO 400`.
pub fn format_iso(iso: f64) -> Option<String> {
    if !iso.is_finite() || iso <= 0.0 {
        return None;
    }
    Some(format!("ISO {}", iso.round() as u64))
}

/// Format a focal length in millimetres as `50mm` or `4.2mm`.
pub fn format_focal_length(millimetres: f64) -> Option<String> {
    if !millimetres.is_finite() || millimetres <= 0.0 {
        return None;
    }
    Some(format!("{}mm", round_to_tenth(millimetres)))
}

pub fn format_white_balance(mode: u32) -> String {
    match mode {
        0 => "Auto".to_string(),
        1 => "Manual".to_string(),
        other => format!("Mode {}", other),
    }
}

/// Format an exposure bias as `+0.7 EV`.
pub fn format_exposure_bias(ev: f64) -> String {
    // Avoid printing "-0 EV"
    let ev = if ev == 0.0 { 0.0 } else { ev };
    let sign = if ev > 0.0 { "+" } else { "" };
    format!("{}{} EV", sign, ev)
}

pub fn format_subject_distance(metres: f64) -> String {
    format!("{:.2} m", metres)
}

/// Format pixel dimensions as `4000 × 3000px`. Zero on either axis is missing.
pub fn format_dimensions(width: Option<u32>, height: Option<u32>) -> Option<String> {
    let width = width.filter(|&w| w > 0)?;
    let height = height.filter(|&h| h > 0)?;
    Some(format!("{} × {}px", width, height))
}

// =============================================================================
// Lookup Tables
// =============================================================================

pub fn describe_orientation(code: u32) -> String {
    let label = match code {
        1 => "Normal (0°)",
        2 => "Mirrored horizontal",
        3 => "Rotated 180°",
        4 => "Mirrored vertical",
        5 => "Mirrored + rotated 90° CW",
        6 => "Rotated 90° CW",
        7 => "Mirrored + rotated 90° CCW",
        8 => "Rotated 90° CCW",
        other => return format!("Orientation {}", other),
    };
    label.to_string()
}

pub fn describe_color_space(code: u32) -> String {
    match code {
        1 => "sRGB".to_string(),
        65535 => "Uncalibrated".to_string(),
        other => format!("Color Space {}", other),
    }
}

pub fn describe_exposure_program(code: u32) -> String {
    let label = match code {
        0 => "Not defined",
        1 => "Manual",
        2 => "Program AE",
        3 => "Aperture priority",
        4 => "Shutter priority",
        5 => "Creative",
        6 => "Action",
        7 => "Portrait",
        8 => "Landscape",
        other => return format!("Program {}", other),
    };
    label.to_string()
}

// =============================================================================
// Text Fields
// =============================================================================

/// Build a camera label from Make and Model.
///
/// Many vendors repeat the make at the start of the model (`Canon` /
/// `Canon EOS R5`); the make is dropped in that case.
pub fn camera_label(make: Option<&str>, model: Option<&str>) -> Option<String> {
    let make = make.map(str::trim).filter(|s| !s.is_empty());
    let model = model.map(str::trim).filter(|s| !s.is_empty());

    match (make, model) {
        (Some(make), Some(model)) => {
            if model.to_lowercase().starts_with(&make.to_lowercase()) {
                Some(model.to_string())
            } else {
                Some(format!("{} {}", make, model))
            }
        }
        (None, Some(model)) => Some(model.to_string()),
        (Some(make), None) => Some(make.to_string()),
        (None, None) => None,
    }
}

/// Parse an EXIF date-time and render it as `Mar 5, 2024, 3:09 PM`.
pub fn format_date(raw: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATETIME_FORMAT).ok()?;
    Some(parsed.format(DISPLAY_DATETIME_FORMAT).to_string())
}

/// Render any decoded value as display text.
///
/// Integers print bare, other numbers with two decimals, arrays as a comma
/// separated list and raw bytes as hex (first 16 bytes, then `…`).
pub fn stringify_raw(value: &Value) -> String {
    match value {
        Value::Number(n) => stringify_number(*n),
        Value::Array(items) => items
            .iter()
            .map(|n| stringify_number(*n))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Ascii(s) => s.clone(),
        Value::Undefined(bytes) => {
            let mut out = String::with_capacity(2 + bytes.len().min(MAX_HEX_BYTES) * 2 + 3);
            out.push_str("0x");
            for byte in bytes.iter().take(MAX_HEX_BYTES) {
                let _ = write!(out, "{:02x}", byte);
            }
            if bytes.len() > MAX_HEX_BYTES {
                out.push('…');
            }
            out
        }
    }
}

/// Whether a value would count as set when tested for truthiness: non-empty
/// text, a non-zero number, or any array or byte string.
pub fn is_set(value: Option<&Value>) -> bool {
    match value {
        None => false,
        Some(Value::Ascii(s)) => !s.is_empty(),
        Some(Value::Number(n)) => {
            let v = n.to_f64();
            v != 0.0 && !v.is_nan()
        }
        Some(Value::Array(_)) | Some(Value::Undefined(_)) => true,
    }
}

fn stringify_number(n: Number) -> String {
    match n {
        Number::Unsigned(v) => v.to_string(),
        Number::Signed(v) => v.to_string(),
        other => {
            let v = other.to_f64();
            if v.is_finite() && v.fract() == 0.0 {
                format!("{}", v)
            } else {
                format!("{:.2}", v)
            }
        }
    }
}

#[inline]
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// Tests
// =============================================================================
