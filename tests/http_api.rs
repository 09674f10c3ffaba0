//! End-to-end tests for the REST API.
//!
//! Drives the router directly via `tower::ServiceExt::oneshot`, plus a
//! round trip of the real API client against a served instance.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use cosmic_optic::client::{ApiClient, ClientError};
use cosmic_optic::http::{create_router, AppState};
use cosmic_optic::services::PredictionService;

fn test_app() -> axum::Router {
    let state = AppState::new(Arc::new(PredictionService::new()));
    create_router(state, &[])
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

fn multipart_request(file_name: &str, contents: &[u8]) -> Request<Body> {
    const BOUNDARY: &str = "cosmic-optic-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/predict/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}

#[tokio::test]
async fn test_health_check() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "operational");
    assert_eq!(json["service"], "CosmicOptic API");
    assert_eq!(json["model_status"], "CosmicNet-v1.0");
}

#[tokio::test]
async fn test_list_samples_hides_truth_labels() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/samples")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let samples = json["samples"].as_array().expect("samples array");
    assert_eq!(samples.len(), 8);

    let first = &samples[0];
    assert!(first.get("id").is_some());
    assert!(first.get("name").is_some());
    assert!(first.get("description").is_some());
    // Ground truth and generator parameters must never leak to clients.
    assert!(first.get("truth").is_none());
    assert!(first.get("params").is_none());

    let ids: Vec<&str> = samples.iter().filter_map(|s| s["id"].as_str()).collect();
    assert!(ids.contains(&"kepler-186f"));
    assert!(ids.contains(&"noise-003"));
}

#[tokio::test]
async fn test_predict_known_sample() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"sample_id":"kepler-186f"}"#))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["classification"], "exoplanet");
    assert_eq!(json["model_version"], "CosmicNet-v1.0");
    assert_eq!(json["time_points"].as_array().unwrap().len(), 1000);
    assert_eq!(json["light_curve_data"].as_array().unwrap().len(), 1000);
    assert!(!json["highlighted_regions"].as_array().unwrap().is_empty());

    let probabilities = json["class_probabilities"].as_object().unwrap();
    let total: f64 = probabilities.values().filter_map(Value::as_f64).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let shap = &json["shap_explanation"];
    assert_eq!(
        shap["feature_importance"].as_array().unwrap().len(),
        1000
    );
    assert!(shap["explanation_summary"].as_str().unwrap().contains("EXOPLANET"));
}

#[tokio::test]
async fn test_predict_unknown_sample_returns_404() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"sample_id":"definitely-missing"}"#))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Sample definitely-missing not found");
}

#[tokio::test]
async fn test_upload_routes_deterministically() {
    let contents = b"time,flux\n0.0,1.0\n0.5,0.99\n1.0,1.0\n";

    let first = test_app()
        .oneshot(multipart_request("curve.csv", contents))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_json = body_json(first).await;

    let second = test_app()
        .oneshot(multipart_request("curve.csv", contents))
        .await
        .unwrap();
    let second_json = body_json(second).await;

    // Same bytes route to the same catalog sample.
    assert_eq!(
        first_json["analysis"]["star_name"],
        second_json["analysis"]["star_name"]
    );
}

#[tokio::test]
async fn test_upload_rejects_bad_extension() {
    let response = test_app()
        .oneshot(multipart_request("image.png", b"not a light curve"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid file type"));
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let contents = vec![b'x'; 11 * 1024 * 1024];
    let response = test_app()
        .oneshot(multipart_request("big.csv", &contents))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "File too large. Maximum size is 10 MB.");
}

#[tokio::test]
async fn test_metrics_snapshot() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["accuracy"], 0.92);
    assert_eq!(json["f1_score"], 0.91);
    assert_eq!(json["total_predictions"], 847);
    assert_eq!(json["validation_date"], "2025-10-05");
    assert_eq!(json["dataset"], "Kepler + K2 + TESS");
}

#[tokio::test]
async fn test_api_client_round_trip() {
    // Serve the app on an ephemeral port and drive it with the real client.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, test_app()).await.unwrap();
    });

    let client = ApiClient::new(format!("http://{addr}")).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "operational");

    let samples = client.list_samples().await.unwrap();
    assert_eq!(samples.samples.len(), 8);

    let analysis = client.predict("trappist-1e").await.unwrap();
    assert_eq!(analysis.analysis.star_name, "TRAPPIST-1e");
    assert_eq!(analysis.light_curve_data.len(), 1000);

    let metrics = client.metrics().await.unwrap();
    assert_eq!(metrics.model_version, "CosmicNet-v1.0");

    // A missing sample surfaces the server's detail message, which takes
    // precedence in the user-facing mapping.
    let err = client.predict("nope").await.unwrap_err();
    match &err {
        ClientError::HttpStatus { status, detail } => {
            assert_eq!(*status, 404);
            assert_eq!(detail.as_deref(), Some("Sample nope not found"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert_eq!(err.user_message(), "Sample nope not found");
}
