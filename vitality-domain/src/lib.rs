// Vitality Domain
// This crate contains the business logic for the Vitality BMI tracker

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the database module from vitality-data for convenience
pub use vitality_data::database;
