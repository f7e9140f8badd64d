//! Unit conversion for raw measurement input
//!
//! All conversions land on the canonical units used everywhere else in the
//! application: kilograms for weight and meters for height.

use crate::entities::measurement::{HeightUnit, MeasurementError, WeightUnit};

/// Kilograms per pound
const KG_PER_POUND: f64 = 0.453592;

/// Meters per inch
const METERS_PER_INCH: f64 = 0.0254;

/// Round a value to the given number of decimal places
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Convert weight text in the given unit to kilograms, rounded to two
/// decimal places.
pub fn convert_weight(text: &str, unit: WeightUnit) -> Result<f64, MeasurementError> {
    let value: f64 = text.trim().parse().map_err(|_| MeasurementError::Parse {
        field: "weight",
        value: text.to_string(),
    })?;

    let kg = match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => value * KG_PER_POUND,
    };

    Ok(round_to(kg, 2))
}

/// Convert height text in the given unit to meters, rounded to three
/// decimal places.
///
/// Feet-and-inches input accepts composite forms such as `5'10`, `5 10`,
/// `5-10` or `5.10`; see [`parse_feet_inches`] for the exact grammar. Input
/// that does not match the composite form is read as a bare number of feet.
pub fn convert_height(text: &str, unit: HeightUnit) -> Result<f64, MeasurementError> {
    let trimmed = text.trim();

    let meters = match unit {
        HeightUnit::M => trimmed.parse().map_err(|_| MeasurementError::Parse {
            field: "height",
            value: text.to_string(),
        })?,
        HeightUnit::Cm => {
            let cm: f64 = trimmed.parse().map_err(|_| MeasurementError::Parse {
                field: "height",
                value: text.to_string(),
            })?;
            cm / 100.0
        }
        HeightUnit::FtIn => {
            let (feet, inches) = match parse_feet_inches(trimmed) {
                Some(parts) => parts,
                // No composite form found: the whole text is feet
                None => {
                    let feet: f64 = trimmed.parse().map_err(|_| MeasurementError::Parse {
                        field: "height",
                        value: text.to_string(),
                    })?;
                    (feet, 0.0)
                }
            };
            (feet * 12.0 + inches) * METERS_PER_INCH
        }
    };

    Ok(round_to(meters, 3))
}

/// Scan a composite feet-and-inches value.
///
/// The accepted shape is a run of digits (feet), one or more separator
/// characters from `'`, `.`, `-`, `,` and whitespace, then an optional run
/// of digits (inches, defaulting to zero). Trailing text after the match is
/// ignored, so `5'10"` reads as five feet ten inches. Returns `None` when
/// the text does not start with digits or no separator follows them.
fn parse_feet_inches(text: &str) -> Option<(f64, f64)> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let feet_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == feet_start {
        return None;
    }
    let feet: f64 = text[feet_start..pos].parse().ok()?;

    let sep_start = pos;
    while pos < bytes.len() && is_separator(bytes[pos]) {
        pos += 1;
    }
    if pos == sep_start {
        return None;
    }

    let inches_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let inches: f64 = if pos == inches_start {
        0.0
    } else {
        text[inches_start..pos].parse().ok()?
    };

    Some((feet, inches))
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b'\'' | b'.' | b'-' | b',') || byte.is_ascii_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_weight_kg_passthrough() {
        assert_eq!(convert_weight("70", WeightUnit::Kg).unwrap(), 70.0);
        assert_eq!(convert_weight("75.456", WeightUnit::Kg).unwrap(), 75.46);
    }

    #[test]
    fn test_convert_weight_lbs_to_kg() {
        assert_eq!(convert_weight("75", WeightUnit::Lbs).unwrap(), 34.02);
        assert_eq!(convert_weight("165", WeightUnit::Lbs).unwrap(), 74.84);
    }

    #[test]
    fn test_convert_weight_trims_whitespace() {
        assert_eq!(convert_weight(" 70 ", WeightUnit::Kg).unwrap(), 70.0);
    }

    #[test]
    fn test_convert_weight_rejects_non_numeric() {
        let err = convert_weight("abc", WeightUnit::Kg).unwrap_err();
        assert_eq!(
            err,
            MeasurementError::Parse {
                field: "weight",
                value: "abc".to_string(),
            }
        );

        assert!(convert_weight("", WeightUnit::Kg).is_err());
        assert!(convert_weight("12abc", WeightUnit::Lbs).is_err());
    }

    #[test]
    fn test_convert_height_meters() {
        assert_eq!(convert_height("1.75", HeightUnit::M).unwrap(), 1.75);
        assert_eq!(convert_height("1.7567", HeightUnit::M).unwrap(), 1.757);
    }

    #[test]
    fn test_convert_height_centimeters() {
        assert_eq!(convert_height("175", HeightUnit::Cm).unwrap(), 1.75);
        assert_eq!(convert_height("180.5", HeightUnit::Cm).unwrap(), 1.805);
    }

    #[test]
    fn test_convert_height_feet_inches_composite() {
        assert_eq!(convert_height("5'10", HeightUnit::FtIn).unwrap(), 1.778);
        assert_eq!(convert_height("5 10", HeightUnit::FtIn).unwrap(), 1.778);
        assert_eq!(convert_height("5-10", HeightUnit::FtIn).unwrap(), 1.778);
        assert_eq!(convert_height("5' 10", HeightUnit::FtIn).unwrap(), 1.778);
    }

    #[test]
    fn test_convert_height_feet_inches_dot_separator_is_composite() {
        // 5.5 in ft_in means five feet five inches, not five and a half feet
        assert_eq!(convert_height("5.5", HeightUnit::FtIn).unwrap(), 1.651);
    }

    #[test]
    fn test_convert_height_feet_inches_ignores_trailing_text() {
        assert_eq!(convert_height("5'10\"", HeightUnit::FtIn).unwrap(), 1.778);
        assert_eq!(convert_height("5'10 tall", HeightUnit::FtIn).unwrap(), 1.778);
    }

    #[test]
    fn test_convert_height_bare_feet() {
        assert_eq!(convert_height("6", HeightUnit::FtIn).unwrap(), 1.829);
        assert_eq!(convert_height("5'", HeightUnit::FtIn).unwrap(), 1.524);
    }

    #[test]
    fn test_convert_height_rejects_non_numeric() {
        let err = convert_height("abc", HeightUnit::FtIn).unwrap_err();
        assert_eq!(
            err,
            MeasurementError::Parse {
                field: "height",
                value: "abc".to_string(),
            }
        );

        assert!(convert_height("5x10", HeightUnit::FtIn).is_err());
        assert!(convert_height("tall", HeightUnit::M).is_err());
    }

    #[test]
    fn test_parse_feet_inches_grammar() {
        assert_eq!(parse_feet_inches("5'10"), Some((5.0, 10.0)));
        assert_eq!(parse_feet_inches("5'"), Some((5.0, 0.0)));
        assert_eq!(parse_feet_inches("5 , 10"), Some((5.0, 10.0)));
        // No separator at all: not a composite form
        assert_eq!(parse_feet_inches("510"), None);
        assert_eq!(parse_feet_inches("abc"), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(22.857142, 1), 22.9);
        assert_eq!(round_to(34.0194, 2), 34.02);
        assert_eq!(round_to(1.7779999, 3), 1.778);
    }
}
