//! Daily study streaks.
//!
//! Every review, grammar completion and finished quiz counts as studying on the
//! UTC calendar day it happened. Studying on consecutive days grows the streak,
//! skipping a day resets it.

use chrono::{DateTime, Days, NaiveDate, Utc};
use jlpt_db::{models::StudyActivity, repositories::stats as stats_repo};
use sqlx::PgConnection;

/// Streak after studying on `today`.
pub fn next_streak(last_study_date: Option<NaiveDate>, current: i32, today: NaiveDate) -> i32 {
    match last_study_date {
        Some(last) if last == today => current.max(1),
        Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => current.saturating_add(1),
        _ => 1,
    }
}

/// Streak as seen on `today`, without recording anything.
///
/// The stored value only changes when the user studies, so a streak whose last
/// day is older than yesterday has already lapsed.
pub fn current_streak(last_study_date: Option<NaiveDate>, stored: i32, today: NaiveDate) -> i32 {
    match last_study_date {
        Some(last) if last == today || last.checked_add_days(Days::new(1)) == Some(today) => stored,
        _ => 0,
    }
}

/// Log `activity` for the day and advance the streak.
///
/// Runs on the caller's connection so it commits with the activity itself.
pub async fn record_study_activity(
    conn: &mut PgConnection,
    user_id: i64,
    activity: StudyActivity,
    now: DateTime<Utc>,
) -> Result<i32, sqlx::Error> {
    let today = now.date_naive();

    stats_repo::record_daily_activity(&mut *conn, user_id, today, activity).await?;

    let (last_study_date, current) = stats_repo::find_statistics_for_update(&mut *conn, user_id)
        .await?
        .map_or((None, 0), |stats| (stats.last_study_date, stats.study_streak_days));

    let streak = next_streak(last_study_date, current, today);
    stats_repo::upsert_streak(&mut *conn, user_id, today, streak).await?;

    Ok(streak)
}
