//! Domain entities for the Vitality application
//!
//! These types carry the business meaning of measurements and profiles.
//! Conversion to and from the data layer models lives in [`conversions`].

pub mod conversions;
pub mod measurement;
pub mod profile;

pub use measurement::{
    BmiCategory, BmiResult, CanonicalMeasurement, HeightUnit, MeasurementError,
    MeasurementInput, MeasurementRecord, StatsSummary, TrendPoint, WeightUnit,
    MAX_HEIGHT_M, MAX_WEIGHT_KG, MIN_HEIGHT_M, MIN_WEIGHT_KG,
};
pub use profile::{CreateProfileRequest, UserProfile};
