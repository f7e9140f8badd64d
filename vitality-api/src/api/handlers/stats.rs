use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};
use uuid::Uuid;

// Import domain entities and services
use vitality_domain::entities::measurement::{StatsSummary, TrendPoint};
use vitality_domain::services::analysis::DEFAULT_TREND_WINDOW;

// Import our entities
use crate::entities::common::ErrorResponse;
use crate::entities::measurement::TrendQueryParams;

use super::measurements::{error_response, MeasurementApiService};

/// Get summary statistics over a profile's measurement history
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{profile_id}/stats",
    params(
        ("profile_id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Statistics computed", body = StatsSummary),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "stats"
)]
#[instrument(skip(service))]
pub async fn get_stats(
    State(service): State<MeasurementApiService>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Computing stats for profile {}", profile_id);

    match service.stats(&profile_id.to_string()).await {
        Ok(summary) => Ok((StatusCode::OK, Json(summary))),
        Err(e) => Err(error_response(e)),
    }
}

/// Get a profile's BMI trend smoothed with a trailing moving average
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{profile_id}/trend",
    params(
        ("profile_id" = Uuid, Path, description = "Profile ID"),
        TrendQueryParams
    ),
    responses(
        (status = 200, description = "Trend computed", body = Vec<TrendPoint>),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "stats"
)]
#[instrument(skip(service))]
pub async fn get_trend(
    State(service): State<MeasurementApiService>,
    Path(profile_id): Path<Uuid>,
    Query(params): Query<TrendQueryParams>,
) -> Result<impl IntoResponse, Response> {
    let window = params.window.unwrap_or(DEFAULT_TREND_WINDOW);
    info!("Computing trend for profile {} with window {}", profile_id, window);

    match service.trend(&profile_id.to_string(), window).await {
        Ok(points) => Ok((StatusCode::OK, Json(points))),
        Err(e) => Err(error_response(e)),
    }
}

/// Export a profile's measurement history as a CSV attachment
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{profile_id}/export",
    params(
        ("profile_id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv", body = String),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "stats"
)]
#[instrument(skip(service))]
pub async fn export_measurements(
    State(service): State<MeasurementApiService>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Exporting measurements for profile {}", profile_id);

    let profile = match service.get_profile(&profile_id.to_string()).await {
        Ok(profile) => profile,
        Err(e) => return Err(error_response(e)),
    };

    match service.export_csv(&profile_id.to_string()).await {
        Ok(csv) => {
            let filename = format!(
                "bmi_export_{}_{}.csv",
                sanitize_filename_part(&profile.name),
                chrono::Utc::now().format("%Y%m%d")
            );
            let headers = [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ];
            Ok((StatusCode::OK, headers, csv))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Replace anything that could break a Content-Disposition filename
fn sanitize_filename_part(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_part() {
        assert_eq!(sanitize_filename_part("Alice"), "Alice");
        assert_eq!(sanitize_filename_part("Alice Smith"), "Alice_Smith");
        assert_eq!(sanitize_filename_part("a/b\\c\"d"), "a_b_c_d");
    }
}
