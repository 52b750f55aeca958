use axum::http::StatusCode;
use serde_json::json;

use crate::common::{TestClient, TestStateBuilder, db, jwt, test_data};

#[tokio::test]
async fn test_auth_me_without_token() {
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client.get("/api/v1/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_me_with_invalid_token() {
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client.get_with_auth("/api/v1/auth/me", "not-a-jwt").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = client.get_with_bearer("/api/v1/auth/me", "not-a-jwt").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    // Validation runs before any query
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": "not-an-email", "username": "learner", "password": "password123" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = client
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": "learner@example.com", "username": "learner", "password": "short" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let client = TestClient::new(TestStateBuilder::lazy());

    let response = client.post_with_auth("/api/v1/auth/logout", "anything").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.sets_cookie("auth_token"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL, run with --ignored"]
async fn test_register_login_and_me() {
    let state = TestStateBuilder::database().await;
    let pool = state.pool.clone();
    let client = TestClient::new(state);

    let email = test_data::unique_email("register");
    let username = test_data::unique_username("learner");

    let response = client
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": email.to_uppercase(), "username": username, "password": "password123" }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    assert!(response.sets_cookie("auth_token"));

    let body: serde_json::Value = response.json();
    let user_id = body["user"]["id"].as_i64().unwrap();
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert!(body["token"].is_string());

    // Same email again
    let response = client
        .post_json(
            "/api/v1/auth/register",
            &json!({ "email": email, "username": test_data::unique_username("other"), "password": "password123" }),
        )
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = client
        .post_json(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": "wrongpass1" }),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = client
        .post_json(
            "/api/v1/auth/login",
            &json!({ "email": email, "password": "password123" }),
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap().to_owned();
    assert!(body["user"]["last_login_at"].is_string());

    let response = client.get_with_bearer("/api/v1/auth/me", &token).await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], user_id);
    assert_eq!(body["username"], username);

    db::delete_user(&pool, user_id).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL, run with --ignored"]
async fn test_auth_me_for_deleted_user() {
    let state = TestStateBuilder::database().await;
    let pool = state.pool.clone();
    let client = TestClient::new(state);

    let email = test_data::unique_email("gone");
    let user_id = db::create_user(&pool, &email, &test_data::unique_username("gone")).await;
    let token = jwt::create_test_token(user_id, &email);
    db::delete_user(&pool, user_id).await;

    let response = client.get_with_auth("/api/v1/auth/me", &token).await;

    response.assert_status(StatusCode::NOT_FOUND);
}
