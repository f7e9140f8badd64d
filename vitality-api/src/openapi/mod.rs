use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Profile endpoints
        crate::api::handlers::profiles::list_profiles,
        crate::api::handlers::profiles::create_profile,

        // Measurement endpoints
        crate::api::handlers::measurements::log_measurement,
        crate::api::handlers::measurements::get_measurement_history,
        crate::api::handlers::measurements::delete_measurement,

        // Stats endpoints
        crate::api::handlers::stats::get_stats,
        crate::api::handlers::stats::get_trend,
        crate::api::handlers::stats::export_measurements
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::profile::UserProfileResponse,
            crate::entities::profile::CreateProfileRequest,
            crate::entities::measurement::CreateMeasurementRequest,
            crate::entities::measurement::MeasurementResponse,
            crate::entities::measurement::LogMeasurementResponse,
            crate::entities::measurement::TrendQueryParams,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain schemas
            vitality_domain::entities::measurement::WeightUnit,
            vitality_domain::entities::measurement::HeightUnit,
            vitality_domain::entities::measurement::BmiCategory,
            vitality_domain::entities::measurement::StatsSummary,
            vitality_domain::entities::measurement::TrendPoint
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "profiles", description = "User profile management endpoints"),
        (name = "measurements", description = "Measurement logging endpoints"),
        (name = "stats", description = "Statistics, trend and export endpoints")
    ),
    info(
        title = "Vitality API",
        version = "0.1.0",
        description = "API for tracking body mass index measurements and trends",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;
