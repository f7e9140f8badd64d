use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// Import domain entities and services
use vitality_domain::entities::measurement::{
    MeasurementInput, MeasurementRecord as DomainMeasurementRecord,
};
use vitality_domain::services::{
    create_default_measurement_service, MeasurementServiceError, MeasurementServiceTrait,
};

// Import our entities
use crate::entities::common::ErrorResponse;
use crate::entities::measurement::{
    CreateMeasurementRequest, LogMeasurementResponse, MeasurementResponse,
};

/// Service type for dependency injection
pub type MeasurementApiService = Arc<dyn MeasurementServiceTrait + Send + Sync>;

/// Create a default service for the handlers to use
pub fn create_service() -> MeasurementApiService {
    Arc::new(create_default_measurement_service())
}

/// Map a service error onto the API error response
pub(crate) fn error_response(err: MeasurementServiceError) -> Response {
    match &err {
        MeasurementServiceError::Measurement(e) => {
            warn!("Measurement input rejected: {}", e);
            ErrorResponse::validation_error(&e.to_string(), None).into_response()
        }
        MeasurementServiceError::Validation(msg) => {
            warn!("Validation failed: {}", msg);
            ErrorResponse::validation_error(msg, None).into_response()
        }
        MeasurementServiceError::NotFound(msg) => {
            info!("Resource not found: {}", msg);
            ErrorResponse::not_found(msg).into_response()
        }
        MeasurementServiceError::Conflict(msg) => {
            warn!("Conflicting request: {}", msg);
            ErrorResponse::conflict(msg).into_response()
        }
        MeasurementServiceError::Repository(_) | MeasurementServiceError::Data(_) => {
            error!("Internal error: {}", err);
            ErrorResponse::internal_error().into_response()
        }
    }
}

/// Convert a domain measurement record to its public representation
fn convert_to_public_measurement(record: DomainMeasurementRecord) -> MeasurementResponse {
    let timestamp = match chrono::DateTime::parse_from_rfc3339(&record.timestamp) {
        Ok(dt) => dt.with_timezone(&chrono::Utc),
        Err(_) => chrono::Utc::now(),
    };

    MeasurementResponse {
        id: Uuid::parse_str(&record.id).unwrap_or_default(),
        user_id: Uuid::parse_str(&record.user_id).unwrap_or_default(),
        timestamp,
        weight_kg: record.weight_kg,
        height_m: record.height_m,
        bmi: record.bmi,
        category: record.category,
    }
}

/// Log a new measurement for a profile
#[utoipa::path(
    post,
    path = "/api/v1/profiles/{profile_id}/measurements",
    params(
        ("profile_id" = Uuid, Path, description = "Profile ID")
    ),
    request_body = CreateMeasurementRequest,
    responses(
        (status = 201, description = "Measurement logged", body = LogMeasurementResponse),
        (status = 400, description = "Invalid measurement input", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service, request))]
pub async fn log_measurement(
    State(service): State<MeasurementApiService>,
    Path(profile_id): Path<Uuid>,
    Json(request): Json<CreateMeasurementRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Logging measurement for profile {}", profile_id);

    let input = MeasurementInput {
        weight_text: request.weight,
        weight_unit: request.weight_unit,
        height_text: request.height,
        height_unit: request.height_unit,
    };

    match service.log_measurement(&profile_id.to_string(), input).await {
        Ok((record, result)) => {
            info!("Measurement {} logged with BMI {}", record.id, result.bmi);
            let response = LogMeasurementResponse {
                record: convert_to_public_measurement(record),
                bmi: result.bmi,
                category: result.category,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Get a profile's measurement history, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{profile_id}/measurements",
    params(
        ("profile_id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Measurement history retrieved", body = Vec<MeasurementResponse>),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service))]
pub async fn get_measurement_history(
    State(service): State<MeasurementApiService>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching measurement history for profile {}", profile_id);

    match service.history(&profile_id.to_string()).await {
        Ok(records) => {
            let history: Vec<MeasurementResponse> = records
                .into_iter()
                .map(convert_to_public_measurement)
                .collect();
            Ok((StatusCode::OK, Json(history)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Delete a measurement by ID
#[utoipa::path(
    delete,
    path = "/api/v1/measurements/{measurement_id}",
    params(
        ("measurement_id" = Uuid, Path, description = "Measurement ID")
    ),
    responses(
        (status = 204, description = "Measurement deleted"),
        (status = 404, description = "Measurement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "measurements"
)]
#[instrument(skip(service))]
pub async fn delete_measurement(
    State(service): State<MeasurementApiService>,
    Path(measurement_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Deleting measurement {}", measurement_id);

    match service.delete_measurement(&measurement_id.to_string()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_response(e)),
    }
}
