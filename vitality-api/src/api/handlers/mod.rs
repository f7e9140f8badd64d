pub mod health;
pub mod measurements;
pub mod profiles;
pub mod stats;

// Re-export handlers for easier imports
pub use health::health_check;
pub use measurements::{delete_measurement, get_measurement_history, log_measurement};
pub use profiles::{create_profile, list_profiles};
pub use stats::{export_measurements, get_stats, get_trend};
