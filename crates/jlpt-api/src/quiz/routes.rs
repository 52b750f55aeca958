use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;

use super::{
    model::{
        QuizDetailResponse, QuizResponse, QuizResultResponse, QuizSessionResponse,
        StartQuizResponse, SubmitQuizRequest,
    },
    service,
};
use crate::{ApiState, auth::AuthUser, error::ApiError, validation::LevelQuery};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/quizzes", get(list_quizzes))
        .route("/quizzes/history", get(get_history))
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}/start", post(start_quiz))
        .route("/quizzes/sessions/{id}", get(get_session_result))
        .route("/quizzes/sessions/{id}/submit", post(submit_quiz))
}

async fn list_quizzes(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LevelQuery>,
) -> Result<Json<Vec<QuizResponse>>, ApiError> {
    let level = query.level()?;
    let quizzes = service::list_quizzes(&state.pool, level).await?;

    Ok(Json(quizzes))
}

async fn get_quiz(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<QuizDetailResponse>, ApiError> {
    let quiz = service::get_quiz(&state.pool, id).await?;

    Ok(Json(quiz))
}

async fn start_quiz(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StartQuizResponse>), ApiError> {
    let started = service::start_quiz(&state.pool, auth_user.user_id, id, Utc::now()).await?;

    Ok((StatusCode::CREATED, Json(started)))
}

async fn submit_quiz(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(request): Json<SubmitQuizRequest>,
) -> Result<Json<QuizResultResponse>, ApiError> {
    let result =
        service::submit_quiz(&state.pool, auth_user.user_id, id, request.answers, Utc::now())
            .await?;

    Ok(Json(result))
}

async fn get_session_result(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<QuizResultResponse>, ApiError> {
    let result = service::get_session_result(&state.pool, auth_user.user_id, id).await?;

    Ok(Json(result))
}

async fn get_history(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<QuizSessionResponse>>, ApiError> {
    let sessions = service::get_history(&state.pool, auth_user.user_id).await?;

    Ok(Json(sessions))
}
