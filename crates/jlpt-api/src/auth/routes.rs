use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use jlpt_db::{models::User, repositories::user as user_repo};

use super::{
    jwt,
    middleware::AuthUser,
    model::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    service,
};
use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(auth_me))
        .route("/auth/logout", post(logout))
}

/// Issue a token for `user` and attach it to the jar as well
fn issue_session(
    state: &ApiState,
    jar: PrivateCookieJar,
    user: User,
) -> Result<(PrivateCookieJar, AuthResponse), ApiError> {
    let token = jwt::generate_jwt_token(
        user.id,
        user.email.clone(),
        &state.auth.jwt_secret,
        state.auth.jwt_expiry_hours,
    )?;

    let cookie = jwt::create_auth_cookie(
        token.clone(),
        state.environment,
        state.auth.jwt_expiry_hours,
    );

    Ok((jar.add(cookie), AuthResponse { token, user: user.into() }))
}

async fn register(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, PrivateCookieJar, Json<AuthResponse>), ApiError> {
    let user = service::register(&state.pool, request, state.bcrypt_cost).await?;
    let (jar, response) = issue_session(&state, jar, user)?;

    Ok((StatusCode::CREATED, jar, Json(response)))
}

async fn login(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<AuthResponse>), ApiError> {
    let user = service::login(&state.pool, request).await?;
    let (jar, response) = issue_session(&state, jar, user)?;

    Ok((jar, Json(response)))
}

async fn auth_me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

async fn logout(jar: PrivateCookieJar) -> (StatusCode, PrivateCookieJar) {
    (StatusCode::NO_CONTENT, jar.remove(jwt::removal_cookie()))
}
