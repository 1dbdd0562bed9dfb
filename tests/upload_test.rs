use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rawdata_upload_mock::config::UploadConfig;
use rawdata_upload_mock::services::upload_service::UploadService;
use rawdata_upload_mock::{AppState, create_app};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app(dir: &TempDir) -> Router {
    let config = UploadConfig {
        temp_dir: dir.path().to_path_buf(),
        enforce_accept_encoding: false,
    };
    let uploads = Arc::new(UploadService::new(&config.temp_dir).unwrap());
    create_app(AppState { uploads, config })
}

fn valid_upload(filename: &str, payload: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/fileUpload")
        .header("Content-Type", "application/octet-stream")
        .header("Content-Length", payload.len().to_string())
        .header("filename", filename)
        .body(Body::from(payload.to_vec()))
        .unwrap()
}

#[tokio::test]
async fn test_upload_flow() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app.oneshot(valid_upload("test", b"hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());

    let stored = std::fs::read(dir.path().join("test.uploaded")).unwrap();
    assert_eq!(stored, b"hello");
}

#[tokio::test]
async fn test_upload_round_trips_large_payload() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    // Multi-megabyte patterned payload, streamed rather than buffered
    let payload: Vec<u8> = (0..4 * 1024 * 1024).map(|i| (i % 251) as u8).collect();

    let response = app.oneshot(valid_upload("big", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = std::fs::read(dir.path().join("big.uploaded")).unwrap();
    assert_eq!(stored.len(), payload.len());
    assert_eq!(stored, payload);
}

#[tokio::test]
async fn test_reupload_overwrites_previous_content() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(valid_upload("report", b"first upload, quite long"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(valid_upload("report", b"second")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Final file reflects only the latest upload, never a concatenation
    let stored = std::fs::read(dir.path().join("report.uploaded")).unwrap();
    assert_eq!(stored, b"second");
}

#[tokio::test]
async fn test_upload_into_existing_subdirectory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(valid_upload("nested/report", b"payload"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = std::fs::read(dir.path().join("nested/report.uploaded")).unwrap();
    assert_eq!(stored, b"payload");
}

#[tokio::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["temp_dir"], "available");
}
