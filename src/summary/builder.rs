//! Assembly of a [`MetadataSummary`] from a tag dictionary.

use tracing::debug;

use crate::format::tiff::{ImageTag, IopTag, Namespace, PhotoTag, TagDictionary, Value};

use super::format::{
    camera_label, describe_color_space, describe_exposure_program, describe_orientation, finite,
    first_finite, format_aperture, format_date, format_dimensions, format_exposure,
    format_exposure_bias, format_focal_length, format_iso, format_subject_distance,
    format_white_balance, is_set, stringify_raw, text,
};
use super::gps::{self, Coordinates};
use super::{MetadataEntry, MetadataGroup, MetadataSummary, Status, Tone};

/// Details used when the container carries no EXIF block at all.
pub const NO_EXIF_DETAILS: &str = "EXIF may be absent due to social platform scrubbing, \
screenshots, AI/graphics output, or export settings that remove metadata.";

const STRIPPED_DETAILS: &str = "EXIF metadata appears to be stripped from the image.";
const NO_GPS_DETAILS: &str = "EXIF metadata was found, but no GPS coordinates were embedded.";
const GPS_DETAILS: &str = "Camera metadata and GPS coordinates were detected in the image.";

/// Separator between the parts of the headline exposure entry.
const EXPOSURE_SEPARATOR: &str = " • ";

// =============================================================================
// Empty Summaries
// =============================================================================

/// Summary for an image without an EXIF block.
pub fn empty_summary(details: impl Into<String>) -> MetadataSummary {
    MetadataSummary {
        status: Status::Error,
        exif_stripped: true,
        gps_data: false,
        details: details.into(),
        entries: vec![
            MetadataEntry::with_tone("EXIF Data", "Missing", Tone::Error),
            MetadataEntry::with_tone("Endianness", "Unknown", Tone::Neutral),
            MetadataEntry::with_tone("GPS", "Not embedded", Tone::Warning),
        ],
        groups: Vec::new(),
        big_endian: None,
        error: None,
    }
}

/// Summary for an extraction that failed; the message doubles as details.
pub fn error_summary(message: impl Into<String>) -> MetadataSummary {
    let message = message.into();
    MetadataSummary {
        error: Some(message.clone()),
        ..empty_summary(message)
    }
}

// =============================================================================
// Summarize
// =============================================================================

/// Build a summary from decoded tags.
///
/// Pure and deterministic: the same dictionary always produces an identical
/// summary. Partial dictionaries are fine; anything missing is left out.
pub fn summarize(tags: &TagDictionary) -> MetadataSummary {
    let has_exif = tags.namespace_len(Namespace::Image)
        + tags.namespace_len(Namespace::Photo)
        + tags.namespace_len(Namespace::GpsInfo)
        > 0;

    let coordinates = Coordinates::from_tags(tags);
    let gps_altitude = gps::altitude(tags);
    let gps_timestamp = gps::timestamp(tags);
    let gps_data = coordinates.is_some() || gps_altitude.is_some() || gps_timestamp.is_some();

    let capture_date = text(tags.photo(PhotoTag::DateTimeOriginal))
        .and_then(format_date)
        .or_else(|| text(tags.image(ImageTag::DateTime)).and_then(format_date));
    let camera = camera_label(
        text(tags.image(ImageTag::Make)),
        text(tags.image(ImageTag::Model)),
    );
    let exposure = finite(tags.photo(PhotoTag::ExposureTime)).and_then(format_exposure);
    let aperture = finite(tags.photo(PhotoTag::FNumber)).and_then(format_aperture);
    let iso = first_finite(tags.photo(PhotoTag::IsoSpeedRatings))
        .or_else(|| first_finite(tags.photo(PhotoTag::IsoSpeed)))
        .and_then(format_iso);
    let dimensions = format_dimensions(
        unsigned(tags.image(ImageTag::ImageWidth))
            .or_else(|| unsigned(tags.photo(PhotoTag::PixelXDimension))),
        unsigned(tags.image(ImageTag::ImageLength))
            .or_else(|| unsigned(tags.photo(PhotoTag::PixelYDimension))),
    );

    let location = match (&coordinates, gps_data) {
        (Some(coords), _) => coords.text(),
        (None, true) => "GPS metadata found".to_string(),
        (None, false) => "Not embedded".to_string(),
    };

    // Headline entries
    let mut entries = vec![
        MetadataEntry::with_tone(
            "EXIF Data",
            if has_exif { "Present" } else { "Missing" },
            if has_exif { Tone::Success } else { Tone::Error },
        ),
        MetadataEntry::with_tone(
            "Endianness",
            match tags.byte_order() {
                Some(order) if order.is_big_endian() => "Big-endian",
                Some(_) => "Little-endian",
                None => "Unknown",
            },
            Tone::Neutral,
        ),
        MetadataEntry::with_tone(
            "GPS",
            location,
            if gps_data { Tone::Success } else { Tone::Warning },
        ),
    ];
    if let Some(camera) = &camera {
        entries.push(MetadataEntry::new("Camera", camera.as_str()));
    }
    if let Some(date) = &capture_date {
        entries.push(MetadataEntry::new("Captured", date.as_str()));
    }
    let highlight = [&exposure, &aperture, &iso]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(EXPOSURE_SEPARATOR);
    if !highlight.is_empty() {
        entries.push(MetadataEntry::new("Exposure", highlight));
    }
    if let Some(dimensions) = &dimensions {
        entries.push(MetadataEntry::new("Resolution", dimensions.as_str()));
    }

    // Groups
    let mut groups = Vec::new();

    let mut image = GroupBuilder::new("Image");
    image.push("Camera", camera);
    image.push("Make", text(tags.image(ImageTag::Make)));
    image.push("Model", text(tags.image(ImageTag::Model)));
    image.push(
        "Lens",
        text(tags.photo(PhotoTag::LensModel)).or_else(|| text(tags.photo(PhotoTag::LensMake))),
    );
    image.push("Software", text(tags.image(ImageTag::Software)));
    image.push("Resolution", dimensions);
    image.push(
        "Orientation",
        unsigned(tags.image(ImageTag::Orientation)).map(describe_orientation),
    );
    image.push(
        "Color Space",
        unsigned(tags.photo(PhotoTag::ColorSpace)).map(describe_color_space),
    );
    image.push("Timestamp", capture_date);
    image.finish_into(&mut groups);

    let mut photo = GroupBuilder::new("Photo");
    photo.push("Exposure Time", exposure);
    photo.push("Aperture", aperture);
    photo.push("ISO", iso);
    photo.push(
        "Focal Length",
        finite(tags.photo(PhotoTag::FocalLength)).and_then(format_focal_length),
    );
    photo.push(
        "White Balance",
        unsigned(tags.photo(PhotoTag::WhiteBalance)).map(format_white_balance),
    );
    photo.push(
        "Exposure Program",
        unsigned(tags.photo(PhotoTag::ExposureProgram)).map(describe_exposure_program),
    );
    photo.push(
        "Exposure Bias",
        finite(tags.photo(PhotoTag::ExposureBiasValue)).map(format_exposure_bias),
    );
    photo.push(
        "Subject Distance",
        finite(tags.photo(PhotoTag::SubjectDistance)).map(format_subject_distance),
    );
    photo.finish_into(&mut groups);

    let mut gps_group = GroupBuilder::new("GPS Info");
    if let Some(coords) = &coordinates {
        gps_group.push("Latitude", Some(coords.display_latitude.as_str()));
        gps_group.push("Longitude", Some(coords.display_longitude.as_str()));
    }
    gps_group.push("Altitude", gps_altitude);
    gps_group.push("Timestamp", gps_timestamp);
    gps_group.push("Image Direction", gps::image_direction(tags));
    gps_group.finish_into(&mut groups);

    let mut thumbnail = GroupBuilder::new("Thumbnail");
    thumbnail.push(
        "Resolution",
        format_dimensions(
            unsigned(tags.thumbnail(ImageTag::ImageWidth)),
            unsigned(tags.thumbnail(ImageTag::ImageLength)),
        ),
    );
    thumbnail.push(
        "Orientation",
        unsigned(tags.thumbnail(ImageTag::Orientation)).map(describe_orientation),
    );
    thumbnail.push(
        "Compression",
        unsigned(tags.thumbnail(ImageTag::Compression)).map(|c| format!("Type {}", c)),
    );
    thumbnail.finish_into(&mut groups);

    let mut iop = GroupBuilder::new("Iop");
    iop.push("Index", set_value(tags.iop(IopTag::InteroperabilityIndex)).map(stringify_raw));
    iop.push(
        "Related Format",
        set_value(tags.iop(IopTag::RelatedImageFileFormat)).map(stringify_raw),
    );
    iop.push(
        "Related Resolution",
        unsigned(tags.iop(IopTag::RelatedImageWidth))
            .zip(unsigned(tags.iop(IopTag::RelatedImageLength)))
            .map(|(w, h)| format!("{} × {}px", w, h)),
    );
    iop.finish_into(&mut groups);

    let status = match (has_exif, gps_data) {
        (false, _) => Status::Error,
        (true, true) => Status::Info,
        (true, false) => Status::Warning,
    };
    let details = match (has_exif, gps_data) {
        (false, _) => STRIPPED_DETAILS,
        (true, true) => GPS_DETAILS,
        (true, false) => NO_GPS_DETAILS,
    };

    debug!(
        status = status.as_str(),
        gps_data,
        groups = groups.len(),
        "Summarized EXIF metadata"
    );

    MetadataSummary {
        status,
        exif_stripped: !has_exif,
        gps_data,
        details: details.to_string(),
        entries,
        groups,
        big_endian: tags.byte_order().map(|order| order.is_big_endian()),
        error: None,
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Collects the entries of one group, skipping missing values.
struct GroupBuilder {
    title: &'static str,
    entries: Vec<MetadataEntry>,
}

impl GroupBuilder {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            entries: Vec::new(),
        }
    }

    fn push<S: Into<String>>(&mut self, label: &str, value: Option<S>) {
        if let Some(value) = value {
            self.entries.push(MetadataEntry::new(label, value));
        }
    }

    /// Append the group unless it ended up empty.
    fn finish_into(self, groups: &mut Vec<MetadataGroup>) {
        if !self.entries.is_empty() {
            groups.push(MetadataGroup {
                title: self.title.to_string(),
                entries: self.entries,
            });
        }
    }
}

fn unsigned(value: Option<&Value>) -> Option<u32> {
    value?.as_u32()
}

fn set_value(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_set(Some(v)))
}

// =============================================================================
// Tests
// =============================================================================
