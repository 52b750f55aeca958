use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Utc;

use super::{
    model::{GrammarLessonListItem, GrammarLessonResponse, GrammarProgressResponse, MarkCompletedRequest},
    service,
};
use crate::{ApiState, auth::AuthUser, error::ApiError, validation::LevelQuery};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/grammar", get(list_lessons))
        .route("/grammar/{id}", get(get_lesson))
        .route("/grammar/{id}/complete", post(mark_completed))
}

async fn list_lessons(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<Vec<GrammarLessonListItem>>, ApiError> {
    let level = query.level()?;
    let lessons = service::list_lessons(&state.pool, auth_user.user_id, level).await?;

    Ok(Json(lessons))
}

async fn get_lesson(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<GrammarLessonResponse>, ApiError> {
    let lesson = service::get_lesson(&state.pool, auth_user.user_id, id).await?;

    Ok(Json(lesson))
}

async fn mark_completed(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    request: Option<Json<MarkCompletedRequest>>,
) -> Result<Json<GrammarProgressResponse>, ApiError> {
    let notes = request.and_then(|Json(request)| request.notes);
    let progress =
        service::mark_completed(&state.pool, auth_user.user_id, id, notes, Utc::now()).await?;

    Ok(Json(progress))
}
