//! GPS coordinate conversion and formatting.
//!
//! EXIF stores latitude and longitude as three rationals (degrees, minutes,
//! seconds) plus a one-letter hemisphere reference. They are converted to
//! signed decimal degrees rounded to six places and displayed alongside a
//! degree/minute/second rendering:
//!
//! ```text
//! 40.446111° N (40° 26' 46.0")
//! ```

use crate::format::tiff::{GpsTag, TagDictionary, Value};

use super::format::{finite, is_set, text};

/// Decimal places kept in decimal degrees.
const DECIMAL_PLACES: i32 = 6;

/// Which coordinate a value belongs to; picks the default hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn default_reference(self, decimal: f64) -> &'static str {
        match (self, decimal < 0.0) {
            (Axis::Latitude, false) => "N",
            (Axis::Latitude, true) => "S",
            (Axis::Longitude, false) => "E",
            (Axis::Longitude, true) => "W",
        }
    }
}

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub display_latitude: String,
    pub display_longitude: String,
}

impl Coordinates {
    /// Resolve coordinates from the GPS namespace.
    ///
    /// Both latitude and longitude must resolve; a lone axis is discarded.
    pub fn from_tags(tags: &TagDictionary) -> Option<Self> {
        let lat_ref = text(tags.gps(GpsTag::GpsLatitudeRef));
        let lon_ref = text(tags.gps(GpsTag::GpsLongitudeRef));

        let latitude = to_decimal_degrees(tags.gps(GpsTag::GpsLatitude), lat_ref)?;
        let longitude = to_decimal_degrees(tags.gps(GpsTag::GpsLongitude), lon_ref)?;

        Some(Self {
            latitude,
            longitude,
            display_latitude: format_coordinate(latitude, lat_ref, Axis::Latitude),
            display_longitude: format_coordinate(longitude, lon_ref, Axis::Longitude),
        })
    }

    /// Both axes joined as `"<lat>, <lon>"`.
    pub fn text(&self) -> String {
        format!("{}, {}", self.display_latitude, self.display_longitude)
    }
}

/// Convert a degrees/minutes/seconds array to signed decimal degrees.
///
/// Missing minute or second elements count as zero. Scalar and empty values
/// cannot be resolved. The sign is negative for `S` and `W` references.
pub fn to_decimal_degrees(value: Option<&Value>, reference: Option<&str>) -> Option<f64> {
    let parts = value?.as_f64_array()?;
    if parts.is_empty() {
        return None;
    }

    let part = |i: usize| parts.get(i).copied().unwrap_or(0.0);
    let sign = match reference {
        Some("S") | Some("W") => -1.0,
        _ => 1.0,
    };

    let decimal = sign * (part(0) + part(1) / 60.0 + part(2) / 3600.0);
    if !decimal.is_finite() {
        return None;
    }

    let scale = 10f64.powi(DECIMAL_PLACES);
    Some((decimal * scale).round() / scale)
}

/// Render decimal degrees with a DMS breakdown.
///
/// The hemisphere letter comes from the reference tag when present, and from
/// the sign of the value otherwise.
pub fn format_coordinate(decimal: f64, reference: Option<&str>, axis: Axis) -> String {
    let abs = decimal.abs();
    let degrees = abs.floor();
    let minutes_float = (abs - degrees) * 60.0;
    let minutes = minutes_float.floor();
    let seconds = (minutes_float - minutes) * 60.0;

    let direction = reference.unwrap_or_else(|| axis.default_reference(decimal));
    let seconds = if seconds >= 10.0 {
        format!("{:.1}", seconds)
    } else {
        format!("{:.2}", seconds)
    };

    format!(
        "{:.6}° {} ({}° {}' {}\")",
        decimal, direction, degrees as u32, minutes as u32, seconds
    )
}

/// Altitude as `12.3 m (Above sea level)`.
///
/// The sea-level qualifier only appears when the reference is set; a
/// reference of 1 means below sea level.
pub fn altitude(tags: &TagDictionary) -> Option<String> {
    let metres = finite(tags.gps(GpsTag::GpsAltitude))?;
    let reference = tags.gps(GpsTag::GpsAltitudeRef);

    if !is_set(reference) {
        return Some(format!("{:.1} m", metres));
    }

    let level = match reference.and_then(Value::as_u32) {
        Some(1) => "Below",
        _ => "Above",
    };
    Some(format!("{:.1} m ({} sea level)", metres, level))
}

/// GPS date and time as `2024:03:05 14:30:07 UTC`.
///
/// Needs both the time array and a non-empty date stamp; missing time
/// elements count as zero and fractional seconds are dropped.
pub fn timestamp(tags: &TagDictionary) -> Option<String> {
    let parts = tags.gps(GpsTag::GpsTimeStamp)?.as_f64_array()?;
    let date = text(tags.gps(GpsTag::GpsDateStamp))?;

    let part = |i: usize| {
        let v = parts.get(i).copied().unwrap_or(0.0);
        if v.is_finite() {
            v.floor() as i64
        } else {
            0
        }
    };

    Some(format!(
        "{} {:02}:{:02}:{:02} UTC",
        date,
        part(0),
        part(1),
        part(2)
    ))
}

/// Image direction as `123.5° T`.
pub fn image_direction(tags: &TagDictionary) -> Option<String> {
    let degrees = finite(tags.gps(GpsTag::GpsImgDirection))?;
    let reference = text(tags.gps(GpsTag::GpsImgDirectionRef)).unwrap_or("");
    Some(format!("{:.1}° {}", degrees, reference).trim().to_string())
}

// =============================================================================
// Tests
// =============================================================================
