use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use jlpt_api::{
    config::Environment,
    middleware::{request_id::request_id_middleware, security_headers::apply_security_headers},
    router,
};
use tower::ServiceExt;

use crate::common::{TestClient, TestStateBuilder, test_database_url};

#[tokio::test]
async fn test_health_check() {
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client.get("/health").await;

    response.assert_status(StatusCode::OK);
}

#[test]
fn test_database_tests_always_have_a_target() {
    // Without TEST_DATABASE_URL the ignored tests still connect somewhere and fail loudly
    assert!(test_database_url().starts_with("postgres://"));
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client.get("/api/v1/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "requires PostgreSQL, run with --ignored"]
async fn test_ready_reports_database() {
    let state = TestStateBuilder::database().await;
    let client = TestClient::new(state);

    let response = client.get("/health/ready").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_middleware_stack_headers() {
    let app = apply_security_headers(
        router::router().layer(axum::middleware::from_fn(request_id_middleware)),
        Environment::Production,
    )
    .with_state(TestStateBuilder::lazy());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "trace-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-abc");
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().get("strict-transport-security").is_some());
}
