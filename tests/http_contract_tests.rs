//! Full-router tests of the wire contract: routes, status codes, and the
//! exact JSON body shapes the frontend depends on.

#![cfg(all(feature = "http-server", feature = "simulated-backend"))]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use nowcast_rust::config::ServiceConfig;
use nowcast_rust::http::{create_router, AppState};
use nowcast_rust::inference::{InferenceBackend, SimulatedBackend};

fn router_with_backend() -> axum::Router {
    let config = ServiceConfig::default();
    let backend = Arc::new(SimulatedBackend::with_seed(config.output_shape(), 7))
        as Arc<dyn InferenceBackend>;
    create_router(AppState::new(Some(backend), config))
}

fn router_without_backend() -> axum::Router {
    create_router(AppState::new(None, ServiceConfig::default()))
}

fn predict_request(body: serde_json::Value) -> Request<Body> {
    raw_predict_request(body.to_string())
}

fn raw_predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_predict_success_contract() {
    let body = serde_json::json!({
        "latMin": 24.0, "lonMin": 68.0, "latMax": 26.0, "lonMax": 70.0
    });
    let response = router_with_backend()
        .oneshot(predict_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;

    let grid = json["prediction_results"].as_array().unwrap();
    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0].as_array().unwrap().len(), 13);
    assert_eq!(grid[0][0].as_array().unwrap().len(), 13);
    assert!(grid[0][0][0].is_number());

    let details = &json["time_details"];
    assert_eq!(details["inputStart"], "17:00:00");
    assert_eq!(details["inputEnd"], "22:00:00");
    assert_eq!(details["predStart"], "23:00:00");
    assert_eq!(details["predEnd"], "01:00:00");
    assert_eq!(details["date"], "2015-01-01");
    assert_eq!(details["full_start_date"], "2015-01-01 17:00:00");
}

#[tokio::test]
async fn test_predict_request_sample_index_is_honored() {
    let body = serde_json::json!({
        "latMin": 24.0, "lonMin": 68.0, "latMax": 26.0, "lonMax": 70.0,
        "sampleIndex": 0
    });
    let response = router_with_backend()
        .oneshot(predict_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["time_details"]["inputStart"], "00:00:00");
    assert_eq!(json["time_details"]["full_start_date"], "2015-01-01 00:00:00");
}

#[tokio::test]
async fn test_predict_malformed_bounds_is_400() {
    let body = serde_json::json!({ "lonMin": "west", "latMax": 26.0, "lonMax": 70.0 });
    let response = router_with_backend()
        .oneshot(predict_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid input coordinates:"), "{message}");
    assert!(message.contains("latMin"), "{message}");
    assert!(message.contains("lonMin"), "{message}");
}

#[tokio::test]
async fn test_predict_unparseable_body_is_400_with_error_shape() {
    let response = router_with_backend()
        .oneshot(raw_predict_request("this is not json"))
        .await
        .unwrap();

    // A parse failure is still a structured client error, not an extractor
    // rejection with a plain-text body.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid input coordinates:"), "{message}");
}

#[tokio::test]
async fn test_predict_unavailable_backend_wins_over_unparseable_body() {
    let response = router_without_backend()
        .oneshot(raw_predict_request("this is not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Model failed to load on server startup.");
}

#[tokio::test]
async fn test_predict_unavailable_backend_is_500_for_any_body() {
    let router = router_without_backend();

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "latMin": 24.0, "lonMin": 68.0, "latMax": 26.0, "lonMax": 70.0 }),
    ] {
        let response = router
            .clone()
            .oneshot(predict_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Model failed to load on server startup.");
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = router_with_backend()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend"], "loaded");
}
