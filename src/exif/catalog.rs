//! Static tag catalog.
//!
//! Maps numeric tag codes to canonical names, per namespace, and carries the
//! display strings of enumerated tags. Tables are sorted by code and searched
//! with `binary_search_by_key`.

use crate::format::tiff::TagNamespace;

/// Display strings for the raw values of an enumerated tag.
pub type EnumTable = &'static [(u32, &'static str)];

/// A known tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDefinition {
    pub code: u16,
    pub name: &'static str,
    pub namespace: TagNamespace,
    pub values: Option<EnumTable>,
}

impl TagDefinition {
    const fn exif(code: u16, name: &'static str) -> Self {
        Self {
            code,
            name,
            namespace: TagNamespace::Exif,
            values: None,
        }
    }

    const fn exif_enum(code: u16, name: &'static str, values: EnumTable) -> Self {
        Self {
            code,
            name,
            namespace: TagNamespace::Exif,
            values: Some(values),
        }
    }

    const fn gps(code: u16, name: &'static str) -> Self {
        Self {
            code,
            name,
            namespace: TagNamespace::Gps,
            values: None,
        }
    }

    const fn gps_enum(code: u16, name: &'static str, values: EnumTable) -> Self {
        Self {
            code,
            name,
            namespace: TagNamespace::Gps,
            values: Some(values),
        }
    }

    /// Display string for a raw enumerated value.
    ///
    /// `None` when the tag is not enumerated or the value is unmapped.
    pub fn describe(&self, raw: u64) -> Option<&'static str> {
        let raw = u32::try_from(raw).ok()?;
        let table = self.values?;
        table
            .binary_search_by_key(&raw, |&(value, _)| value)
            .ok()
            .map(|i| table[i].1)
    }
}

/// Look up a tag by namespace and code.
pub fn lookup(namespace: TagNamespace, code: u16) -> Option<&'static TagDefinition> {
    let table = match namespace {
        TagNamespace::Exif => EXIF_TAGS,
        TagNamespace::Gps => GPS_TAGS,
    };
    table
        .binary_search_by_key(&code, |def| def.code)
        .ok()
        .map(|i| &table[i])
}

// =============================================================================
// Enumerated values
// =============================================================================

const RESOLUTION_UNIT: EnumTable = &[(1, "None"), (2, "inches"), (3, "cm")];

const ORIENTATION: EnumTable = &[
    (1, "Horizontal (normal)"),
    (2, "Mirror horizontal"),
    (3, "Rotate 180"),
    (4, "Mirror vertical"),
    (5, "Mirror horizontal and rotate 270 CW"),
    (6, "Rotate 90 CW"),
    (7, "Mirror horizontal and rotate 90 CW"),
    (8, "Rotate 270 CW"),
];

const YCBCR_POSITIONING: EnumTable = &[(1, "Centered"), (2, "Co-sited")];

const EXPOSURE_PROGRAM: EnumTable = &[
    (0, "Not Defined"),
    (1, "Manual"),
    (2, "Program AE"),
    (3, "Aperture-priority AE"),
    (4, "Shutter speed priority AE"),
    (5, "Creative (Slow speed)"),
    (6, "Action (High speed)"),
    (7, "Portrait"),
    (8, "Landscape"),
    (9, "Bulb"),
];

const SENSITIVITY_TYPE: EnumTable = &[
    (0, "Unknown"),
    (1, "Standard Output Sensitivity"),
    (2, "Recommended Exposure Index"),
    (3, "ISO Speed"),
    (4, "Standard Output Sensitivity and Recommended Exposure Index"),
    (5, "Standard Output Sensitivity and ISO Speed"),
    (6, "Recommended Exposure Index and ISO Speed"),
    (
        7,
        "Standard Output Sensitivity, Recommended Exposure Index and ISO Speed",
    ),
];

const METERING_MODE: EnumTable = &[
    (0, "Unknown"),
    (1, "Average"),
    (2, "Center-weighted average"),
    (3, "Spot"),
    (4, "Multi-spot"),
    (5, "Multi-segment"),
    (6, "Partial"),
    (255, "Other"),
];

const FLASH: EnumTable = &[
    (0x00, "No Flash"),
    (0x01, "Fired"),
    (0x05, "Fired, Return not detected"),
    (0x07, "Fired, Return detected"),
    (0x08, "On, Did not fire"),
    (0x09, "On, Fired"),
    (0x0D, "On, Return not detected"),
    (0x0F, "On, Return detected"),
    (0x10, "Off, Did not fire"),
    (0x14, "Off, Did not fire, Return not detected"),
    (0x18, "Auto, Did not fire"),
    (0x19, "Auto, Fired"),
    (0x1D, "Auto, Fired, Return not detected"),
    (0x1F, "Auto, Fired, Return detected"),
    (0x20, "No flash function"),
    (0x30, "Off, No flash function"),
    (0x41, "Fired, Red-eye reduction"),
    (0x45, "Fired, Red-eye reduction, Return not detected"),
    (0x47, "Fired, Red-eye reduction, Return detected"),
    (0x49, "On, Red-eye reduction"),
    (0x4D, "On, Red-eye reduction, Return not detected"),
    (0x4F, "On, Red-eye reduction, Return detected"),
    (0x50, "Off, Red-eye reduction"),
    (0x58, "Auto, Did not fire, Red-eye reduction"),
    (0x59, "Auto, Fired, Red-eye reduction"),
    (0x5D, "Auto, Fired, Red-eye reduction, Return not detected"),
    (0x5F, "Auto, Fired, Red-eye reduction, Return detected"),
];

const COLOR_SPACE: EnumTable = &[
    (0x0001, "sRGB"),
    (0x0002, "Adobe RGB"),
    (0xFFFD, "Wide Gamut RGB"),
    (0xFFFE, "ICC Profile"),
    (0xFFFF, "Uncalibrated"),
];

const FOCAL_PLANE_RESOLUTION_UNIT: EnumTable = &[
    (1, "None"),
    (2, "inches"),
    (3, "cm"),
    (4, "mm"),
    (5, "um"),
];

const CUSTOM_RENDERED: EnumTable = &[
    (0, "Normal"),
    (1, "Custom"),
    (3, "HDR"),
    (6, "Panorama"),
    (8, "Portrait"),
];

const EXPOSURE_MODE: EnumTable = &[(0, "Auto"), (1, "Manual"), (2, "Auto bracket")];

const WHITE_BALANCE: EnumTable = &[(0, "Auto"), (1, "Manual")];

const SCENE_CAPTURE_TYPE: EnumTable = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night"),
    (4, "Other"),
];

const GPS_ALTITUDE_REF: EnumTable = &[(0, "Above Sea Level"), (1, "Below Sea Level")];

// =============================================================================
// Tag tables
// =============================================================================

/// IFD0 and Exif sub-IFD tags, sorted by code.
pub static EXIF_TAGS: &[TagDefinition] = &[
    // IFD0
    TagDefinition::exif(0x0100, "ImageWidth"),
    TagDefinition::exif(0x0101, "ImageHeight"),
    TagDefinition::exif(0x010F, "Make"),
    TagDefinition::exif(0x0110, "Model"),
    TagDefinition::exif_enum(0x0112, "Orientation", ORIENTATION),
    TagDefinition::exif(0x011A, "XResolution"),
    TagDefinition::exif(0x011B, "YResolution"),
    TagDefinition::exif_enum(0x0128, "ResolutionUnit", RESOLUTION_UNIT),
    TagDefinition::exif(0x0131, "Software"),
    TagDefinition::exif(0x0132, "ModifyDate"),
    TagDefinition::exif(0x013B, "Artist"),
    TagDefinition::exif(0x0212, "YCbCrSubSampling"),
    TagDefinition::exif_enum(0x0213, "YCbCrPositioning", YCBCR_POSITIONING),
    TagDefinition::exif(0x8298, "Copyright"),
    // Exif sub-IFD
    TagDefinition::exif(0x829A, "ExposureTime"),
    TagDefinition::exif(0x829D, "FNumber"),
    TagDefinition::exif(0x8769, "ExifOffset"),
    TagDefinition::exif_enum(0x8822, "ExposureProgram", EXPOSURE_PROGRAM),
    TagDefinition::exif(0x8825, "GPSInfo"),
    TagDefinition::exif(0x8827, "ISO"),
    TagDefinition::exif_enum(0x8830, "SensitivityType", SENSITIVITY_TYPE),
    TagDefinition::exif(0x8832, "RecommendedExposureIndex"),
    TagDefinition::exif(0x9000, "ExifVersion"),
    TagDefinition::exif(0x9003, "DateTimeOriginal"),
    TagDefinition::exif(0x9004, "CreateDate"),
    TagDefinition::exif(0x9010, "OffsetTime"),
    TagDefinition::exif(0x9201, "ShutterSpeedValue"),
    TagDefinition::exif(0x9202, "ApertureValue"),
    TagDefinition::exif(0x9203, "BrightnessValue"),
    TagDefinition::exif(0x9204, "ExposureCompensation"),
    TagDefinition::exif(0x9205, "MaxApertureValue"),
    TagDefinition::exif_enum(0x9207, "MeteringMode", METERING_MODE),
    TagDefinition::exif_enum(0x9209, "Flash", FLASH),
    TagDefinition::exif(0x920A, "FocalLength"),
    TagDefinition::exif(0x927C, "MakerNote"),
    TagDefinition::exif(0x9291, "SubSecTimeOriginal"),
    TagDefinition::exif(0x9292, "SubSecTimeDigitized"),
    TagDefinition::exif_enum(0xA001, "ColorSpace", COLOR_SPACE),
    TagDefinition::exif(0xA002, "ExifImageWidth"),
    TagDefinition::exif(0xA003, "ExifImageHeight"),
    TagDefinition::exif(0xA20E, "FocalPlaneXResolution"),
    TagDefinition::exif(0xA20F, "FocalPlaneYResolution"),
    TagDefinition::exif_enum(
        0xA210,
        "FocalPlaneResolutionUnit",
        FOCAL_PLANE_RESOLUTION_UNIT,
    ),
    TagDefinition::exif_enum(0xA401, "CustomRendered", CUSTOM_RENDERED),
    TagDefinition::exif_enum(0xA402, "ExposureMode", EXPOSURE_MODE),
    TagDefinition::exif_enum(0xA403, "WhiteBalance", WHITE_BALANCE),
    TagDefinition::exif(0xA404, "DigitalZoomRatio"),
    TagDefinition::exif(0xA405, "FocalLengthIn35mmFormat"),
    TagDefinition::exif_enum(0xA406, "SceneCaptureType", SCENE_CAPTURE_TYPE),
    TagDefinition::exif(0xA420, "ImageUniqueID"),
    TagDefinition::exif(0xA430, "OwnerName"),
    TagDefinition::exif(0xA431, "SerialNumber"),
    TagDefinition::exif(0xA432, "LensInfo"),
    TagDefinition::exif(0xA433, "LensMake"),
    TagDefinition::exif(0xA434, "LensModel"),
    TagDefinition::exif(0xA435, "LensSerialNumber"),
];

/// GPS sub-IFD tags, sorted by code.
pub static GPS_TAGS: &[TagDefinition] = &[
    TagDefinition::gps(0x0000, "GPSVersionID"),
    TagDefinition::gps(0x0001, "GPSLatitudeRef"),
    TagDefinition::gps(0x0002, "GPSLatitude"),
    TagDefinition::gps(0x0003, "GPSLongitudeRef"),
    TagDefinition::gps(0x0004, "GPSLongitude"),
    TagDefinition::gps_enum(0x0005, "GPSAltitudeRef", GPS_ALTITUDE_REF),
    TagDefinition::gps(0x0006, "GPSAltitude"),
    TagDefinition::gps(0x0007, "GPSTimeStamp"),
    TagDefinition::gps(0x0008, "GPSSatellites"),
    TagDefinition::gps(0x0009, "GPSStatus"),
    TagDefinition::gps(0x000A, "GPSMeasureMode"),
    TagDefinition::gps(0x000B, "GPSDOP"),
    TagDefinition::gps(0x000C, "GPSSpeedRef"),
    TagDefinition::gps(0x000D, "GPSSpeed"),
    TagDefinition::gps(0x000E, "GPSTrackRef"),
    TagDefinition::gps(0x000F, "GPSTrack"),
    TagDefinition::gps(0x0010, "GPSImgDirectionRef"),
    TagDefinition::gps(0x0011, "GPSImgDirection"),
    TagDefinition::gps(0x0012, "GPSMapDatum"),
    TagDefinition::gps(0x0013, "GPSDestLatitudeRef"),
    TagDefinition::gps(0x0014, "GPSDestLatitude"),
    TagDefinition::gps(0x0015, "GPSDestLongitudeRef"),
    TagDefinition::gps(0x0016, "GPSDestLongitude"),
    TagDefinition::gps(0x0017, "GPSDestBearingRef"),
    TagDefinition::gps(0x0018, "GPSDestBearing"),
    TagDefinition::gps(0x0019, "GPSDestDistanceRef"),
    TagDefinition::gps(0x001A, "GPSDestDistance"),
    TagDefinition::gps(0x001B, "GPSProcessingMethod"),
    TagDefinition::gps(0x001C, "GPSAreaInformation"),
    TagDefinition::gps(0x001D, "GPSDateStamp"),
    TagDefinition::gps(0x001E, "GPSDifferential"),
    TagDefinition::gps(0x001F, "GPSHPositioningError"),
];
