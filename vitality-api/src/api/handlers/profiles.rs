use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};

// Import domain entities
use vitality_domain::entities::profile::{
    CreateProfileRequest as DomainCreateProfileRequest, UserProfile as DomainUserProfile,
};

// Import our entities
use crate::entities::common::ErrorResponse;
use crate::entities::profile::{CreateProfileRequest, UserProfileResponse};

use super::measurements::{error_response, MeasurementApiService};

/// Convert a domain profile to its public representation
fn convert_to_public_profile(profile: DomainUserProfile) -> UserProfileResponse {
    let created_at = match chrono::DateTime::parse_from_rfc3339(&profile.created_at) {
        Ok(dt) => dt.with_timezone(&chrono::Utc),
        Err(_) => chrono::Utc::now(),
    };

    UserProfileResponse {
        id: uuid::Uuid::parse_str(&profile.id).unwrap_or_default(),
        name: profile.name,
        age: profile.age,
        gender: profile.gender,
        target_weight_kg: profile.target_weight_kg,
        created_at,
    }
}

/// List all user profiles
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    responses(
        (status = 200, description = "Profiles retrieved", body = Vec<UserProfileResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service))]
pub async fn list_profiles(
    State(service): State<MeasurementApiService>,
) -> Result<impl IntoResponse, Response> {
    info!("Listing user profiles");

    match service.list_profiles().await {
        Ok(profiles) => {
            let profiles: Vec<UserProfileResponse> =
                profiles.into_iter().map(convert_to_public_profile).collect();
            Ok((StatusCode::OK, Json(profiles)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Create a new user profile
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = UserProfileResponse),
        (status = 400, description = "Invalid profile data", body = ErrorResponse),
        (status = 409, description = "Profile name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "profiles"
)]
#[instrument(skip(service, request))]
pub async fn create_profile(
    State(service): State<MeasurementApiService>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Creating profile {:?}", request.name);

    let domain_request = DomainCreateProfileRequest {
        name: request.name,
        age: request.age,
        gender: request.gender,
        target_weight_kg: request.target_weight_kg,
    };

    match service.create_profile(domain_request).await {
        Ok(profile) => {
            info!("Profile {} created", profile.id);
            Ok((StatusCode::CREATED, Json(convert_to_public_profile(profile))))
        }
        Err(e) => Err(error_response(e)),
    }
}
