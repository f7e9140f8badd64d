// Data storage models
pub mod measurement;
pub mod profile;

pub use measurement::{CreateMeasurementRecord, MeasurementRecord};
pub use profile::{CreateProfileRequest, UserProfile};
