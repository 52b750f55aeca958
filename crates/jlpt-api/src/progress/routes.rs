use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;

use super::{model::UserStatisticsResponse, service};
use crate::{ApiState, auth::AuthUser, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/progress/stats", get(get_stats))
}

async fn get_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserStatisticsResponse>, ApiError> {
    let stats = service::get_user_statistics(&state.pool, auth_user.user_id, Utc::now()).await?;
    Ok(Json(stats))
}
