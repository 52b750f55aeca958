use chrono::{DateTime, Utc};
use jlpt_db::repositories::stats as stats_repo;
use sqlx::PgPool;

use super::model::UserStatisticsResponse;
use crate::error::ApiError;

pub async fn get_user_statistics(
    pool: &PgPool,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<UserStatisticsResponse, ApiError> {
    let stats = stats_repo::find_statistics(pool, user_id).await?;
    let totals = stats_repo::fetch_study_totals(pool, user_id, now).await?;

    Ok(UserStatisticsResponse::new(user_id, stats, totals, now.date_naive()))
}
