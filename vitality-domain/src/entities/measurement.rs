use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Lower bound for a plausible body weight in kilograms
pub const MIN_WEIGHT_KG: f64 = 20.0;
/// Upper bound for a plausible body weight in kilograms
pub const MAX_WEIGHT_KG: f64 = 300.0;
/// Lower bound for a plausible height in meters
pub const MIN_HEIGHT_M: f64 = 0.5;
/// Upper bound for a plausible height in meters
pub const MAX_HEIGHT_M: f64 = 2.5;

/// Error produced while turning raw measurement input into canonical values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    /// The text could not be read as a number in the selected unit
    #[error("Invalid {field} format: expected a number, got {value:?}")]
    Parse {
        /// Which input field failed ("weight" or "height")
        field: &'static str,
        /// The offending input text
        value: String,
    },

    /// The converted value falls outside the plausible physiological range
    #[error("Converted {field} must be between {min} and {max} {unit}")]
    Range {
        /// Which input field failed ("weight" or "height")
        field: &'static str,
        /// Lower bound of the accepted range
        min: f64,
        /// Upper bound of the accepted range
        max: f64,
        /// Unit the bounds are expressed in
        unit: &'static str,
    },
}

/// Unit a weight value was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    /// Kilograms
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}

/// Unit a height value was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    /// Meters
    #[default]
    M,
    /// Centimeters
    Cm,
    /// Feet and inches, e.g. `5'10`
    FtIn,
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightUnit::M => write!(f, "m"),
            HeightUnit::Cm => write!(f, "cm"),
            HeightUnit::FtIn => write!(f, "ft_in"),
        }
    }
}

/// Raw measurement input exactly as the user entered it
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementInput {
    /// Weight text, e.g. `"75"` or `"165.5"`
    pub weight_text: String,
    /// Unit the weight text is expressed in
    pub weight_unit: WeightUnit,
    /// Height text, e.g. `"1.75"`, `"175"` or `"5'10"`
    pub height_text: String,
    /// Unit the height text is expressed in
    pub height_unit: HeightUnit,
}

/// A validated measurement in canonical units (kilograms and meters).
///
/// Values can only be obtained through [`CanonicalMeasurement::new`], which
/// enforces the plausible ranges, so holding one is proof the measurement
/// is usable for BMI computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalMeasurement {
    weight_kg: f64,
    height_m: f64,
}

impl CanonicalMeasurement {
    /// Construct a canonical measurement, rejecting out-of-range values.
    ///
    /// Weight is checked before height so callers always see the first
    /// failing field.
    pub fn new(weight_kg: f64, height_m: f64) -> Result<Self, MeasurementError> {
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
            return Err(MeasurementError::Range {
                field: "weight",
                min: MIN_WEIGHT_KG,
                max: MAX_WEIGHT_KG,
                unit: "kg",
            });
        }

        if !(MIN_HEIGHT_M..=MAX_HEIGHT_M).contains(&height_m) {
            return Err(MeasurementError::Range {
                field: "height",
                min: MIN_HEIGHT_M,
                max: MAX_HEIGHT_M,
                unit: "m",
            });
        }

        Ok(Self { weight_kg, height_m })
    }

    /// Weight in kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Height in meters
    pub fn height_m(&self) -> f64 {
        self.height_m
    }
}

/// World Health Organization BMI classification bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI from 18.5 up to but not including 25
    Normal,
    /// BMI from 25 up to but not including 30
    Overweight,
    /// BMI of 30 or above
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        write!(f, "{}", label)
    }
}

impl BmiCategory {
    /// Parse a stored category label back into the enum
    pub fn from_label(label: &str) -> Result<Self, String> {
        match label {
            "Underweight" => Ok(BmiCategory::Underweight),
            "Normal" => Ok(BmiCategory::Normal),
            "Overweight" => Ok(BmiCategory::Overweight),
            "Obese" => Ok(BmiCategory::Obese),
            _ => Err(format!("Invalid BMI category label: {}", label)),
        }
    }
}

/// Outcome of a BMI computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BmiResult {
    /// BMI value rounded to one decimal place
    pub bmi: f64,
    /// Classification band for the rounded value
    pub category: BmiCategory,
}

/// A stored measurement together with its computed BMI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct MeasurementRecord {
    /// Unique identifier of the record
    pub id: String,
    /// Identifier of the owning profile
    pub user_id: String,
    /// RFC 3339 timestamp assigned when the record was stored
    pub timestamp: String,
    /// Canonical weight in kilograms
    pub weight_kg: f64,
    /// Canonical height in meters
    pub height_m: f64,
    /// BMI value rounded to one decimal place
    pub bmi: f64,
    /// Classification band for the BMI value
    pub category: BmiCategory,
}

/// Summary statistics over a profile's measurement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatsSummary {
    /// Number of measurements in the history
    pub total: usize,
    /// Mean BMI rounded to one decimal place; 0.0 when the history is empty
    pub avg_bmi: f64,
    /// Smallest BMI in the history; 0.0 when the history is empty
    pub min_bmi: f64,
    /// Largest BMI in the history; 0.0 when the history is empty
    pub max_bmi: f64,
    /// Display text describing the first-to-last BMI change
    pub trend: String,
}

/// One point on a BMI trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TrendPoint {
    /// RFC 3339 timestamp of the underlying measurement
    pub timestamp: String,
    /// BMI value of the underlying measurement
    pub bmi: f64,
    /// Moving average at this position, when enough prior values exist
    pub smoothed: Option<f64>,
}
