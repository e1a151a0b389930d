//! Health Check API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let res = app.request("GET", "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let res = app.request("GET", "/health/live", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_probe_reports_store() {
    let app = TestApp::new();

    let res = app.request("GET", "/health/ready", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["store"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_endpoint_available() {
    let app = TestApp::new();
    app.get("/api/v2/prefabs/missing", crate::common::TEST_USER).await;

    let res = app.request("GET", "/metrics", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
}
