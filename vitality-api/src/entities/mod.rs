// Public entities for the Vitality API
// This module contains data structures that are shared across the application boundary

// Measurement entities
pub mod measurement;

// Profile entities
pub mod profile;

// Common entities for error handling
pub mod common;
