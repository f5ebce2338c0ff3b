//! Per-tag value formatting.
//!
//! Most tags share one generic rendering; a few use a dedicated strategy
//! selected from a dispatch table keyed by namespace and tag code.
//!
//! # Generic Rendering
//!
//! ```text
//! single integer      -> Integer, or the enum display string when mapped
//! several integers    -> "a, b, c"
//! ASCII               -> Text
//! single rational     -> Float (numerator / denominator)
//! several rationals   -> "x, y, z"
//! ```

use crate::format::tiff::{DecodedValue, Rational, TagNamespace};

use super::catalog::TagDefinition;
use super::dataset::ExifValue;

// =============================================================================
// Strategies
// =============================================================================

/// How a tag's decoded value is turned into an [`ExifValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Four character codes concatenated, e.g. `"0231"`
    Version,
    /// First rational as `"numerator/denominator"`
    Fraction,
    /// Three rationals as degrees, minutes and seconds
    Dms,
    /// Byte components concatenated without separator
    Digits,
    /// Generic rendering with enum lookup
    Default,
}

const STRATEGIES: &[(TagNamespace, u16, Strategy)] = &[
    (TagNamespace::Exif, 0x829A, Strategy::Fraction), // ExposureTime
    (TagNamespace::Exif, 0x9000, Strategy::Version),  // ExifVersion
    (TagNamespace::Gps, 0x0000, Strategy::Digits),    // GPSVersionID
    (TagNamespace::Gps, 0x0002, Strategy::Dms),       // GPSLatitude
    (TagNamespace::Gps, 0x0004, Strategy::Dms),       // GPSLongitude
    (TagNamespace::Gps, 0x0014, Strategy::Dms),       // GPSDestLatitude
    (TagNamespace::Gps, 0x0016, Strategy::Dms),       // GPSDestLongitude
];

/// Strategy registered for a tag.
pub fn strategy_for(namespace: TagNamespace, code: u16) -> Strategy {
    STRATEGIES
        .iter()
        .find(|&&(ns, c, _)| ns == namespace && c == code)
        .map(|&(_, _, strategy)| strategy)
        .unwrap_or(Strategy::Default)
}

/// Format a decoded value for the given tag.
///
/// A special strategy whose expected shape does not match the value falls
/// back to the generic rendering.
pub fn format(definition: &TagDefinition, value: &DecodedValue) -> ExifValue {
    let special = match strategy_for(definition.namespace, definition.code) {
        Strategy::Version => version(value),
        Strategy::Fraction => fraction(value),
        Strategy::Dms => dms(value),
        Strategy::Digits => digits(value),
        Strategy::Default => None,
    };

    special.unwrap_or_else(|| generic(definition, value))
}

// =============================================================================
// Special cases
// =============================================================================

fn version(value: &DecodedValue) -> Option<ExifValue> {
    let text: Option<String> = match value {
        DecodedValue::Bytes(bytes) if bytes.len() == 4 => {
            Some(bytes.iter().map(|&b| char::from(b)).collect())
        }
        DecodedValue::Rational(parts) if parts.len() == 4 => parts
            .iter()
            .map(|r| char::from_u32(r.value() as u32))
            .collect(),
        _ => None,
    };
    text.map(ExifValue::Text)
}

fn fraction(value: &DecodedValue) -> Option<ExifValue> {
    let first = value.as_rationals()?.first()?;
    Some(ExifValue::Text(format!(
        "{}/{}",
        first.numerator, first.denominator
    )))
}

fn dms(value: &DecodedValue) -> Option<ExifValue> {
    match value.as_rationals()? {
        [deg, min, sec] => Some(ExifValue::Text(format!(
            "{}° {}' {:.2}\"",
            deg.value(),
            min.value(),
            sec.value()
        ))),
        _ => None,
    }
}

fn digits(value: &DecodedValue) -> Option<ExifValue> {
    match value {
        DecodedValue::Bytes(bytes) => Some(ExifValue::Text(
            bytes.iter().map(|b| b.to_string()).collect(),
        )),
        _ => None,
    }
}

// =============================================================================
// Generic rendering
// =============================================================================

fn generic(definition: &TagDefinition, value: &DecodedValue) -> ExifValue {
    if let DecodedValue::Ascii(text) = value {
        return ExifValue::Text(text.clone());
    }

    if let Some(rationals) = value.as_rationals() {
        return match rationals {
            [single] => ExifValue::Float(single.value()),
            many => ExifValue::Text(join(many.iter().map(Rational::value))),
        };
    }

    match value.as_integers().as_deref() {
        Some(&[single]) => match definition.describe(single) {
            Some(label) => ExifValue::Text(label.to_string()),
            None => ExifValue::Integer(single),
        },
        Some(many) => ExifValue::Text(join(many.iter())),
        None => ExifValue::Text(String::new()),
    }
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
