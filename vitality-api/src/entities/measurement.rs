use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use vitality_domain::entities::measurement::{BmiCategory, HeightUnit, WeightUnit};

/// Request payload for logging a new measurement.
///
/// Weight and height travel as raw text so the server can report exactly
/// what failed to parse; units default to the metric canonical units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMeasurementRequest {
    /// Weight exactly as entered, e.g. `"75"` or `"165.5"`
    pub weight: String,

    /// Unit of the weight value (defaults to kilograms)
    #[serde(default)]
    pub weight_unit: WeightUnit,

    /// Height exactly as entered, e.g. `"1.75"`, `"175"` or `"5'10"`
    pub height: String,

    /// Unit of the height value (defaults to meters)
    #[serde(default)]
    pub height_unit: HeightUnit,
}

/// Public representation of a stored measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeasurementResponse {
    /// Unique identifier for the measurement
    pub id: Uuid,

    /// Identifier of the owning profile
    pub user_id: Uuid,

    /// When the measurement was recorded
    pub timestamp: DateTime<Utc>,

    /// Canonical weight in kilograms
    pub weight_kg: f64,

    /// Canonical height in meters
    pub height_m: f64,

    /// BMI value rounded to one decimal place
    pub bmi: f64,

    /// Classification band for the BMI value
    pub category: BmiCategory,
}

/// Response returned after logging a measurement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogMeasurementResponse {
    /// The stored measurement record
    pub record: MeasurementResponse,

    /// BMI value rounded to one decimal place
    pub bmi: f64,

    /// Classification band for the BMI value
    pub category: BmiCategory,
}

/// Query parameters for the trend endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TrendQueryParams {
    /// Moving average window size (default: 3)
    pub window: Option<usize>,
}
