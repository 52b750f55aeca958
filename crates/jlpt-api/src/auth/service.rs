use jlpt_db::{models::User, repositories::user as user_repo};
use sqlx::PgPool;

use super::{
    model::{LoginRequest, RegisterRequest},
    validation::{validate_email, validate_password, validate_username},
};
use crate::{error::ApiError, metrics::record_auth_event};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create an account and its statistics row in one transaction.
pub async fn register(
    pool: &PgPool,
    request: RegisterRequest,
    bcrypt_cost: u32,
) -> Result<User, ApiError> {
    let email = normalize_email(&request.email);
    let username = request.username.trim().to_owned();

    validate_email(&email)?;
    validate_username(&username)?;
    validate_password(&request.password)?;

    if user_repo::email_exists(pool, &email).await? {
        record_auth_event("register", false);
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }
    if user_repo::username_exists(pool, &username).await? {
        record_auth_event("register", false);
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    let password = request.password;
    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost)).await??;

    let mut tx = pool.begin().await?;

    // A concurrent registration can still win the race past the checks above
    let user = match user_repo::create_user(&mut *tx, &email, &username, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            record_auth_event("register", false);
            return Err(ApiError::Conflict(
                "Email or username already taken".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };
    user_repo::create_user_statistics(&mut *tx, user.id).await?;

    tx.commit().await?;

    record_auth_event("register", true);
    tracing::info!(user_id = user.id, "user registered");

    Ok(user)
}

/// Check credentials and stamp the login time.
pub async fn login(pool: &PgPool, request: LoginRequest) -> Result<User, ApiError> {
    let email = normalize_email(&request.email);

    let Some(credentials) = user_repo::find_credentials_by_email(pool, &email).await? else {
        record_auth_event("login", false);
        return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
    };

    let password = request.password;
    let hash = credentials.password_hash;
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

    if !valid || !credentials.is_active {
        record_auth_event("login", false);
        return Err(ApiError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    user_repo::touch_last_login(pool, credentials.id).await?;

    let user = user_repo::find_by_id(pool, credentials.id)
        .await?
        .ok_or_else(|| ApiError::Auth(INVALID_CREDENTIALS.to_string()))?;

    record_auth_event("login", true);
    tracing::info!(user_id = user.id, "user logged in");

    Ok(user)
}
