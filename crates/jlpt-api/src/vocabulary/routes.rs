use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use jlpt_srs::ReviewStats;

use super::{
    model::{DueQuery, ProgressResponse, ReviewRequest, ReviewResponse, VocabularyResponse},
    service,
};
use crate::{
    ApiState,
    auth::AuthUser,
    error::ApiError,
    validation::{LevelQuery, resolve_due_limit},
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/vocabulary", get(list_vocabulary))
        .route("/vocabulary/due", get(get_due_vocabulary))
        .route("/vocabulary/{id}", get(get_vocabulary))
        .route("/vocabulary/{id}/start", post(start_studying))
        .route("/vocabulary/{id}/review", post(submit_review))
        .route("/vocabulary/{id}/stats", get(get_review_stats))
}

async fn list_vocabulary(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<Vec<VocabularyResponse>>, ApiError> {
    let level = query.level()?;
    let items = service::list_vocabulary(&state.pool, auth_user.user_id, level, Utc::now()).await?;

    Ok(Json(items))
}

async fn get_due_vocabulary(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<VocabularyResponse>>, ApiError> {
    let limit = resolve_due_limit(query.limit)?;
    let items =
        service::get_due_vocabulary(&state.pool, auth_user.user_id, limit, Utc::now()).await?;

    Ok(Json(items))
}

async fn get_vocabulary(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<VocabularyResponse>, ApiError> {
    let item = service::get_vocabulary(&state.pool, auth_user.user_id, id, Utc::now()).await?;

    Ok(Json(item))
}

async fn start_studying(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ProgressResponse>), ApiError> {
    let now = Utc::now();
    let progress = service::start_studying(&state.pool, auth_user.user_id, id, now).await?;

    Ok((StatusCode::CREATED, Json(ProgressResponse::new(&progress, now))))
}

async fn submit_review(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let quality = request.quality()?;
    let now = Utc::now();
    let progress = service::submit_review(&state.pool, auth_user.user_id, id, quality, now).await?;

    Ok(Json(ReviewResponse::new(quality, &progress, now)))
}

async fn get_review_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<ReviewStats>, ApiError> {
    let stats = service::get_review_stats(&state.pool, auth_user.user_id, id, Utc::now()).await?;

    Ok(Json(stats))
}
