use serde::{Deserialize, Serialize};

/// Storage model for a logged BMI measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Unique identifier for the measurement
    pub id: String,

    /// Profile the measurement belongs to
    pub user_id: String,

    /// When the measurement was recorded; assigned by the store at insert
    pub timestamp: String,

    /// Weight in kilograms
    pub weight_kg: f64,

    /// Height in meters
    pub height_m: f64,

    /// Computed body mass index, one decimal place
    pub bmi: f64,

    /// BMI category label
    pub category: String,
}

/// Input data for appending a measurement to a profile's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeasurementRecord {
    /// Profile the measurement belongs to
    pub user_id: String,

    /// Weight in kilograms
    pub weight_kg: f64,

    /// Height in meters
    pub height_m: f64,

    /// Computed body mass index, one decimal place
    pub bmi: f64,

    /// BMI category label
    pub category: String,
}
