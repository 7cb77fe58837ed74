//! TIFF field types, EXIF namespaces and tag ids.
//!
//! Tag ids only mean something relative to the IFD they appear in: tag 1 is
//! `GPSLatitudeRef` in the GPS IFD but `InteroperabilityIndex` in the
//! Interoperability IFD. Each namespace therefore gets its own tag enum.
//!
//! Only the tags the summary needs are named here. Other tags are still
//! decoded and kept in the dictionary under their numeric id.

use serde::Serialize;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two LONGs: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte data
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two SLONGs: numerator, denominator
    SRational = 10,

    /// IEEE single precision float
    Float = 11,

    /// IEEE double precision float
    Double = 12,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values; entries with such types are skipped.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }
}

// =============================================================================
// Namespaces
// =============================================================================

/// The IFD a tag was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Namespace {
    /// IFD0, the primary image
    Image,
    /// Exif sub-IFD (capture settings)
    Photo,
    /// GPS sub-IFD
    #[serde(rename = "GPSInfo")]
    GpsInfo,
    /// IFD1, the embedded thumbnail
    Thumbnail,
    /// Interoperability sub-IFD
    Iop,
}

impl Namespace {
    pub const ALL: [Namespace; 5] = [
        Namespace::Image,
        Namespace::Photo,
        Namespace::GpsInfo,
        Namespace::Thumbnail,
        Namespace::Iop,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Namespace::Image => "Image",
            Namespace::Photo => "Photo",
            Namespace::GpsInfo => "GPSInfo",
            Namespace::Thumbnail => "Thumbnail",
            Namespace::Iop => "Iop",
        }
    }
}

/// Look up the name of a tag in a namespace.
///
/// IFD0 and the thumbnail IFD share the same tag vocabulary.
pub fn tag_name(namespace: Namespace, tag_id: u16) -> Option<&'static str> {
    match namespace {
        Namespace::Image | Namespace::Thumbnail => ImageTag::from_u16(tag_id).map(ImageTag::name),
        Namespace::Photo => PhotoTag::from_u16(tag_id).map(PhotoTag::name),
        Namespace::GpsInfo => GpsTag::from_u16(tag_id).map(GpsTag::name),
        Namespace::Iop => IopTag::from_u16(tag_id).map(IopTag::name),
    }
}

/// Defines a tag enum with `from_u16`, `as_u16` and `name`.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            /// Create a tag from its numeric id, `None` if the tag is not named here.
            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $( $value => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// Get the numeric tag id.
            #[inline]
            pub const fn as_u16(self) -> u16 {
                self as u16
            }

            /// Get the EXIF name of the tag.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )*
                }
            }
        }
    };
}

tag_enum! {
    /// Tags of IFD0 and the thumbnail IFD.
    pub enum ImageTag {
        ImageWidth = 0x0100 => "ImageWidth",
        ImageLength = 0x0101 => "ImageLength",
        Compression = 0x0103 => "Compression",
        ImageDescription = 0x010E => "ImageDescription",
        Make = 0x010F => "Make",
        Model = 0x0110 => "Model",
        Orientation = 0x0112 => "Orientation",
        XResolution = 0x011A => "XResolution",
        YResolution = 0x011B => "YResolution",
        ResolutionUnit = 0x0128 => "ResolutionUnit",
        Software = 0x0131 => "Software",
        DateTime = 0x0132 => "DateTime",
        Artist = 0x013B => "Artist",
        JpegInterchangeFormat = 0x0201 => "JPEGInterchangeFormat",
        JpegInterchangeFormatLength = 0x0202 => "JPEGInterchangeFormatLength",
        Copyright = 0x8298 => "Copyright",
        /// Pointer to the Exif sub-IFD
        ExifIfdPointer = 0x8769 => "ExifTag",
        /// Pointer to the GPS sub-IFD
        GpsIfdPointer = 0x8825 => "GPSTag",
    }
}

tag_enum! {
    /// Tags of the Exif sub-IFD.
    pub enum PhotoTag {
        ExposureTime = 0x829A => "ExposureTime",
        FNumber = 0x829D => "FNumber",
        ExposureProgram = 0x8822 => "ExposureProgram",
        IsoSpeedRatings = 0x8827 => "ISOSpeedRatings",
        IsoSpeed = 0x8833 => "ISOSpeed",
        ExifVersion = 0x9000 => "ExifVersion",
        DateTimeOriginal = 0x9003 => "DateTimeOriginal",
        DateTimeDigitized = 0x9004 => "DateTimeDigitized",
        ExposureBiasValue = 0x9204 => "ExposureBiasValue",
        SubjectDistance = 0x9206 => "SubjectDistance",
        MeteringMode = 0x9207 => "MeteringMode",
        Flash = 0x9209 => "Flash",
        FocalLength = 0x920A => "FocalLength",
        MakerNote = 0x927C => "MakerNote",
        ColorSpace = 0xA001 => "ColorSpace",
        PixelXDimension = 0xA002 => "PixelXDimension",
        PixelYDimension = 0xA003 => "PixelYDimension",
        /// Pointer to the Interoperability sub-IFD
        InteropIfdPointer = 0xA005 => "InteroperabilityTag",
        WhiteBalance = 0xA403 => "WhiteBalance",
        FocalLengthIn35mmFilm = 0xA405 => "FocalLengthIn35mmFilm",
        LensMake = 0xA433 => "LensMake",
        LensModel = 0xA434 => "LensModel",
    }
}

tag_enum! {
    /// Tags of the GPS sub-IFD.
    pub enum GpsTag {
        GpsVersionId = 0x0000 => "GPSVersionID",
        GpsLatitudeRef = 0x0001 => "GPSLatitudeRef",
        GpsLatitude = 0x0002 => "GPSLatitude",
        GpsLongitudeRef = 0x0003 => "GPSLongitudeRef",
        GpsLongitude = 0x0004 => "GPSLongitude",
        GpsAltitudeRef = 0x0005 => "GPSAltitudeRef",
        GpsAltitude = 0x0006 => "GPSAltitude",
        GpsTimeStamp = 0x0007 => "GPSTimeStamp",
        GpsImgDirectionRef = 0x0010 => "GPSImgDirectionRef",
        GpsImgDirection = 0x0011 => "GPSImgDirection",
        GpsDateStamp = 0x001D => "GPSDateStamp",
    }
}

tag_enum! {
    /// Tags of the Interoperability sub-IFD.
    pub enum IopTag {
        InteroperabilityIndex = 0x0001 => "InteroperabilityIndex",
        InteroperabilityVersion = 0x0002 => "InteroperabilityVersion",
        RelatedImageFileFormat = 0x1000 => "RelatedImageFileFormat",
        RelatedImageWidth = 0x1001 => "RelatedImageWidth",
        RelatedImageLength = 0x1002 => "RelatedImageLength",
    }
}

// =============================================================================
// Tests
// =============================================================================
