pub mod analysis;
pub mod measurement;
pub mod units;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use measurement::{
    create_default_measurement_service, MeasurementService, MeasurementServiceError,
    MeasurementServiceTrait,
};
