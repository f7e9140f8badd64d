use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Once;
use tower::ServiceExt;

use vitality_api::api::create_application;

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// Helper function to get body bytes from a response
async fn get_body_bytes(response: axum::response::Response) -> Vec<u8> {
    let body = response.into_body();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    bytes.to_vec()
}

async fn send_get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send_post(app: &Router, uri: &str, payload: &Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn send_delete(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

// Create a profile and return its JSON representation
async fn create_profile(app: &Router, name: &str) -> Value {
    let response = send_post(app, "/api/v1/profiles", &json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_slice(&get_body_bytes(response).await).unwrap()
}

// Log a measurement for a profile and return the response JSON
async fn log_measurement(app: &Router, profile_id: &str, payload: &Value) -> Value {
    let uri = format!("/api/v1/profiles/{}/measurements", profile_id);
    let response = send_post(app, &uri, payload).await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "measurement should be accepted"
    );
    serde_json::from_slice(&get_body_bytes(response).await).unwrap()
}

// Integration test for the health check endpoint
#[tokio::test]
async fn test_health_endpoint() {
    initialize();

    let app = create_application().await;

    let response = send_get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = get_body_bytes(response).await;
    let health: Value = serde_json::from_slice(&body).unwrap();

    // Allow either "ok" or "degraded" status since the database pool is not
    // initialized in tests and the store runs in memory
    let status = health["status"].as_str().unwrap();
    assert!(
        status == "ok" || status == "degraded",
        "Health status should be either 'ok' or 'degraded' but was '{}'",
        status
    );

    assert!(health["version"].is_string());
    assert_eq!(health["components"]["api"]["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_profiles() {
    initialize();

    let app = create_application().await;

    let response = send_post(
        &app,
        "/api/v1/profiles",
        &json!({
            "name": "Alice",
            "age": 34,
            "gender": "female",
            "target_weight_kg": 65.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["age"], 34);
    assert_eq!(created["target_weight_kg"], 65.0);
    assert!(created["id"].is_string());

    let response = send_get(&app, "/api/v1/profiles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let profiles: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    let profiles = profiles.as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["name"], "Alice");
}

#[tokio::test]
async fn test_create_profile_validation_errors() {
    initialize();

    let app = create_application().await;

    // Empty name fails the length constraint
    let response = send_post(&app, "/api/v1/profiles", &json!({ "name": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "validation_error");

    // Whitespace-only name passes the length check but is still rejected
    let response = send_post(&app, "/api/v1/profiles", &json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "validation_error");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("Name cannot be empty"));

    // Out-of-range age
    let response = send_post(
        &app,
        "/api/v1/profiles",
        &json!({ "name": "Bob", "age": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "validation_error");
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("Age must be between 1 and 130"));
}

#[tokio::test]
async fn test_create_profile_duplicate_name_conflicts() {
    initialize();

    let app = create_application().await;

    create_profile(&app, "Alice").await;

    let response = send_post(&app, "/api/v1/profiles", &json!({ "name": "Alice" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "conflict");
}

#[tokio::test]
async fn test_log_measurement_metric() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    // Units default to kilograms and meters when omitted
    let logged = log_measurement(
        &app,
        profile_id,
        &json!({ "weight": "70", "height": "1.75" }),
    )
    .await;

    assert_eq!(logged["bmi"], 22.9);
    assert_eq!(logged["category"], "Normal");
    assert_eq!(logged["record"]["weight_kg"], 70.0);
    assert_eq!(logged["record"]["height_m"], 1.75);
    assert_eq!(logged["record"]["user_id"], profile_id);
    assert!(logged["record"]["id"].is_string());
}

#[tokio::test]
async fn test_log_measurement_imperial() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    let logged = log_measurement(
        &app,
        profile_id,
        &json!({
            "weight": "165",
            "weight_unit": "lbs",
            "height": "5'10",
            "height_unit": "ft_in"
        }),
    )
    .await;

    assert_eq!(logged["record"]["weight_kg"], 74.84);
    assert_eq!(logged["record"]["height_m"], 1.778);
    assert_eq!(logged["bmi"], 23.7);
    assert_eq!(logged["category"], "Normal");
}

#[tokio::test]
async fn test_log_measurement_invalid_input() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();
    let uri = format!("/api/v1/profiles/{}/measurements", profile_id);

    // Weight that cannot be parsed
    let response = send_post(&app, &uri, &json!({ "weight": "abc", "height": "1.75" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "validation_error");
    assert_eq!(
        error["message"],
        "Invalid weight format: expected a number, got \"abc\""
    );

    // Weight below the plausible range
    let response = send_post(&app, &uri, &json!({ "weight": "10", "height": "1.75" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(
        error["message"],
        "Converted weight must be between 20 and 300 kg"
    );

    // Nothing was persisted along the way
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_log_measurement_unknown_profile() {
    initialize();

    let app = create_application().await;

    let uri = format!(
        "/api/v1/profiles/{}/measurements",
        "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
    );
    let response = send_post(&app, &uri, &json!({ "weight": "70", "height": "1.75" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_measurement_history_ascending() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    for weight in ["70", "71.5", "73.2"] {
        log_measurement(
            &app,
            profile_id,
            &json!({ "weight": weight, "height": "1.75" }),
        )
        .await;
    }

    let uri = format!("/api/v1/profiles/{}/measurements", profile_id);
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let history: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["bmi"], 22.9);
    assert_eq!(history[1]["bmi"], 23.3);
    assert_eq!(history[2]["bmi"], 23.9);
}

#[tokio::test]
async fn test_stats_endpoint() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    for weight in ["70", "71.5", "73.2"] {
        log_measurement(
            &app,
            profile_id,
            &json!({ "weight": weight, "height": "1.75" }),
        )
        .await;
    }

    let uri = format!("/api/v1/profiles/{}/stats", profile_id);
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["avg_bmi"], 23.4);
    assert_eq!(stats["min_bmi"], 22.9);
    assert_eq!(stats["max_bmi"], 23.9);
    assert_eq!(stats["trend"], "Increasing (+1.0)");
}

#[tokio::test]
async fn test_trend_endpoint() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    for weight in ["70", "71.5", "73.2", "70"] {
        log_measurement(
            &app,
            profile_id,
            &json!({ "weight": weight, "height": "1.75" }),
        )
        .await;
    }

    // Default window is three measurements
    let uri = format!("/api/v1/profiles/{}/trend", profile_id);
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let points: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert!(points[0]["smoothed"].is_null());
    assert!(points[1]["smoothed"].is_null());

    let expected_third = (22.9_f64 + 23.3 + 23.9) / 3.0;
    let expected_fourth = (23.3_f64 + 23.9 + 22.9) / 3.0;
    assert_eq!(points[2]["smoothed"].as_f64().unwrap(), expected_third);
    assert_eq!(points[3]["smoothed"].as_f64().unwrap(), expected_fourth);

    // A window larger than the history leaves the series unchanged
    let uri = format!("/api/v1/profiles/{}/trend?window=9", profile_id);
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let points: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    for point in points.as_array().unwrap() {
        assert_eq!(point["smoothed"], point["bmi"]);
    }
}

#[tokio::test]
async fn test_export_endpoint() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice Smith").await;
    let profile_id = profile["id"].as_str().unwrap();

    log_measurement(
        &app,
        profile_id,
        &json!({ "weight": "70", "height": "1.75" }),
    )
    .await;

    let uri = format!("/api/v1/profiles/{}/export", profile_id);
    let response = send_get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(content_type, "text/csv");

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"bmi_export_Alice_Smith_"));
    assert!(disposition.ends_with(".csv\""));

    let body = String::from_utf8(get_body_bytes(response).await).unwrap();
    assert_eq!(
        body.lines().next().unwrap(),
        "ID,Date,Weight(kg),Height(m),BMI,Category"
    );
    assert!(body.contains("70,1.75,22.9,Normal"));
}

#[tokio::test]
async fn test_delete_measurement_flow() {
    initialize();

    let app = create_application().await;
    let profile = create_profile(&app, "Alice").await;
    let profile_id = profile["id"].as_str().unwrap();

    let logged = log_measurement(
        &app,
        profile_id,
        &json!({ "weight": "70", "height": "1.75" }),
    )
    .await;
    let measurement_id = logged["record"]["id"].as_str().unwrap();

    let uri = format!("/api/v1/measurements/{}", measurement_id);
    let response = send_delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let history_uri = format!("/api/v1/profiles/{}/measurements", profile_id);
    let response = send_get(&app, &history_uri).await;
    let history: Value = serde_json::from_slice(&get_body_bytes(response).await).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 0);

    // Deleting the same measurement twice reports not found
    let response = send_delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_profile_id_rejected() {
    initialize();

    let app = create_application().await;

    let response = send_get(&app, "/api/v1/profiles/not-a-uuid/stats").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_security_headers_present() {
    initialize();

    let app = create_application().await;

    let response = send_get(&app, "/health").await;
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}
