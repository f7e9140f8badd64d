use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// A user profile that owns a measurement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UserProfile {
    /// Unique identifier of the profile
    pub id: String,
    /// Display name, unique across profiles
    pub name: String,
    /// Age in years, if provided
    pub age: Option<u32>,
    /// Free-form gender text, if provided
    pub gender: Option<String>,
    /// Target weight in kilograms, if provided
    pub target_weight_kg: Option<f64>,
    /// RFC 3339 timestamp assigned when the profile was created
    pub created_at: String,
}

/// Request to create a new user profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
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
