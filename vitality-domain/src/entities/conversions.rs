use crate::entities::measurement::{BmiCategory, MeasurementRecord};
use crate::entities::profile::{CreateProfileRequest, UserProfile};
use uuid::Uuid;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Parse a string ID into a UUID with a descriptive error message
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert from data model to domain entity for a user profile
pub fn convert_to_domain_profile(
    data_profile: vitality_data::models::UserProfile,
) -> UserProfile {
    UserProfile {
        id: data_profile.id,
        name: data_profile.name,
        age: data_profile.age,
        gender: data_profile.gender,
        target_weight_kg: data_profile.target_weight_kg,
        created_at: data_profile.created_at,
    }
}

/// Convert from domain entity to data model for a profile create request
pub fn convert_to_data_create_profile(
    domain_request: &CreateProfileRequest,
) -> vitality_data::models::CreateProfileRequest {
    vitality_data::models::CreateProfileRequest {
        name: domain_request.name.clone(),
        age: domain_request.age,
        gender: domain_request.gender.clone(),
        target_weight_kg: domain_request.target_weight_kg,
    }
}

/// Convert from data model to domain entity for a measurement record.
///
/// Fails when the stored category label does not map onto a known
/// classification band.
pub fn convert_to_domain_record(
    data_record: vitality_data::models::MeasurementRecord,
) -> Result<MeasurementRecord, String> {
    let category = BmiCategory::from_label(&data_record.category)?;

    Ok(MeasurementRecord {
        id: data_record.id,
        user_id: data_record.user_id,
        timestamp: data_record.timestamp,
        weight_kg: data_record.weight_kg,
        height_m: data_record.height_m,
        bmi: data_record.bmi,
        category,
    })
}
