use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public representation of a user profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    /// Unique identifier for the profile
    pub id: Uuid,

    /// Display name, unique across profiles
    pub name: String,

    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Free-form gender text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Target weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,

    /// When the profile was created in the system
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new user profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    /// Display name for the profile
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    pub name: String,

    /// Age in years
    #[validate(range(min = 1, max = 130, message = "Age must be between 1 and 130"))]
    pub age: Option<u32>,

    /// Free-form gender text
    #[validate(length(max = 32, message = "Gender cannot exceed 32 characters"))]
    pub gender: Option<String>,

    /// Target weight in kilograms
    #[validate(range(
        min = 20.0,
        max = 300.0,
        message = "Target weight must be between 20 and 300 kg"
    ))]
    pub target_weight_kg: Option<f64>,
}
