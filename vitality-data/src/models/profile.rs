use serde::{Deserialize, Serialize};

/// Storage model for a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the profile
    pub id: String,

    /// Display name; unique across all profiles
    pub name: String,

    /// Optional age in years
    pub age: Option<u32>,

    /// Optional self-reported gender
    pub gender: Option<String>,

    /// Optional target weight in kilograms
    pub target_weight_kg: Option<f64>,

    /// When the profile was created
    pub created_at: String,
}

/// Input data for creating a new user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    /// Display name; must be unique
    pub name: String,

    /// Optional age in years
    pub age: Option<u32>,

    /// Optional self-reported gender
    pub gender: Option<String>,

    /// Optional target weight in kilograms
    pub target_weight_kg: Option<f64>,
}
