use axum::http::StatusCode;
use serde_json::json;

use crate::common::{TestClient, TestStateBuilder, db, jwt, test_data};

#[tokio::test]
async fn test_vocabulary_requires_auth() {
    let client = TestClient::new(TestStateBuilder::lazy());

    client.get("/api/v1/vocabulary").await.assert_status(StatusCode::UNAUTHORIZED);
    client.get("/api/v1/vocabulary/due").await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_query_validation() {
    let client = TestClient::new(TestStateBuilder::lazy());
    let token = jwt::create_test_token(1, "learner@example.com");

    let response = client.get_with_auth("/api/v1/vocabulary?jlpt_level=9", &token).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = client.get_with_auth("/api/v1/vocabulary/due?limit=0", &token).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = client.get_with_auth("/api/v1/vocabulary/due?limit=101", &token).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_body_validation() {
    let client = TestClient::new(TestStateBuilder::lazy());
    let token = jwt::create_test_token(1, "learner@example.com");

    for body in [
        json!({}),
        json!({ "quality": 6 }),
        json!({ "quality": -1 }),
        json!({ "is_correct": true, "quality": 4 }),
    ] {
        let response = client
            .post_json_with_auth("/api/v1/vocabulary/1/review", &body, &token)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let error: serde_json::Value = response.json();
        assert_eq!(error["code"], "VALIDATION_ERROR", "body {body}");
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL, run with --ignored"]
async fn test_study_and_review_flow() {
    let state = TestStateBuilder::database().await;
    let pool = state.pool.clone();
    let client = TestClient::new(state);

    let email = test_data::unique_email("review");
    let user_id = db::create_user(&pool, &email, &test_data::unique_username("review")).await;
    let token = jwt::create_test_token(user_id, &email);
    let vocabulary_id = db::create_vocabulary(&pool, "水", "みず", "water").await;

    let response = client
        .get_with_auth(&format!("/api/v1/vocabulary/{vocabulary_id}"), &token)
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["reading"], "みず");
    assert!(body["progress"].is_null());

    // No progress yet
    let response = client
        .get_with_auth(&format!("/api/v1/vocabulary/{vocabulary_id}/stats"), &token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = client
        .post_with_auth(&format!("/api/v1/vocabulary/{vocabulary_id}/start"), &token)
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["ease_factor"], 2.5);
    assert_eq!(body["interval_days"], 1);
    assert_eq!(body["repetitions"], 0);
    assert_eq!(body["is_due"], true);

    let response = client
        .post_with_auth(&format!("/api/v1/vocabulary/{vocabulary_id}/start"), &token)
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Newly started items are due right away
    let response = client.get_with_auth("/api/v1/vocabulary/due?limit=100", &token).await;
    response.assert_status(StatusCode::OK);
    let due: Vec<serde_json::Value> = response.json();
    assert!(due.iter().any(|item| item["id"] == vocabulary_id));

    let response = client
        .post_json_with_auth(
            &format!("/api/v1/vocabulary/{vocabulary_id}/review"),
            &json!({ "quality": 5 }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["progress"]["interval_days"], 1);
    assert_eq!(body["progress"]["repetitions"], 1);
    assert_eq!(body["progress"]["is_due"], false);

    let response = client
        .post_json_with_auth(
            &format!("/api/v1/vocabulary/{vocabulary_id}/review"),
            &json!({ "quality": 5 }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["progress"]["interval_days"], 6);
    assert_eq!(body["progress"]["repetitions"], 2);

    let response = client
        .post_json_with_auth(
            &format!("/api/v1/vocabulary/{vocabulary_id}/review"),
            &json!({ "is_correct": false }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["progress"]["interval_days"], 1);
    assert_eq!(body["progress"]["repetitions"], 0);
    assert_eq!(body["progress"]["total_reviews"], 3);
    assert_eq!(body["progress"]["correct_reviews"], 2);

    let response = client
        .get_with_auth(&format!("/api/v1/vocabulary/{vocabulary_id}/stats"), &token)
        .await;
    response.assert_status(StatusCode::OK);
    let stats: serde_json::Value = response.json();
    assert_eq!(stats["total_reviews"], 3);
    assert_eq!(stats["days_since_last_review"], 0);

    let response = client.get_with_auth("/api/v1/progress/stats", &token).await;
    response.assert_status(StatusCode::OK);
    let stats: serde_json::Value = response.json();
    assert_eq!(stats["study_streak_days"], 1);
    assert_eq!(stats["vocabulary_learned"], 1);
    assert_eq!(stats["quizzes_taken"], 0);

    db::delete_user(&pool, user_id).await;
    db::delete_vocabulary(&pool, vocabulary_id).await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL, run with --ignored"]
async fn test_first_review_without_start() {
    let state = TestStateBuilder::database().await;
    let pool = state.pool.clone();
    let client = TestClient::new(state);

    let email = test_data::unique_email("direct");
    let user_id = db::create_user(&pool, &email, &test_data::unique_username("direct")).await;
    let token = jwt::create_test_token(user_id, &email);
    let vocabulary_id = db::create_vocabulary(&pool, "火", "ひ", "fire").await;

    let response = client
        .post_json_with_auth(
            &format!("/api/v1/vocabulary/{vocabulary_id}/review"),
            &json!({ "is_correct": true }),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["quality"], 4);
    assert_eq!(body["progress"]["repetitions"], 1);
    assert_eq!(body["progress"]["total_reviews"], 1);
    // 2.5 + (0.1 - 1 * (0.08 + 1 * 0.02))
    let ease = body["progress"]["ease_factor"].as_f64().unwrap();
    assert!((ease - 2.5).abs() < 1e-9);

    let response = client
        .post_json_with_auth("/api/v1/vocabulary/0/review", &json!({ "is_correct": true }), &token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    db::delete_user(&pool, user_id).await;
    db::delete_vocabulary(&pool, vocabulary_id).await;
}
