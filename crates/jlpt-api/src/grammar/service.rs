use chrono::{DateTime, Utc};
use jlpt_db::{models::StudyActivity, repositories::grammar as grammar_repo};
use sqlx::PgPool;

use super::model::{GrammarLessonListItem, GrammarLessonResponse, GrammarProgressResponse};
use crate::{error::ApiError, progress::record_study_activity};

const MAX_NOTES_LEN: usize = 2000;

fn not_found() -> ApiError {
    ApiError::NotFound("Grammar lesson not found".to_string())
}

pub async fn list_lessons(
    pool: &PgPool,
    user_id: i64,
    jlpt_level: Option<i32>,
) -> Result<Vec<GrammarLessonListItem>, ApiError> {
    let lessons = grammar_repo::list_with_status(pool, user_id, jlpt_level).await?;

    Ok(lessons.into_iter().map(Into::into).collect())
}

pub async fn get_lesson(
    pool: &PgPool,
    user_id: i64,
    lesson_id: i64,
) -> Result<GrammarLessonResponse, ApiError> {
    let lesson = grammar_repo::find_lesson(pool, lesson_id)
        .await?
        .ok_or_else(not_found)?;
    let examples = grammar_repo::list_examples(pool, lesson_id).await?;
    let progress = grammar_repo::find_progress(pool, user_id, lesson_id).await?;

    Ok(GrammarLessonResponse::new(lesson, examples, progress))
}

/// Mark a lesson completed. Repeating the call refreshes the notes and still
/// counts as studying today.
pub async fn mark_completed(
    pool: &PgPool,
    user_id: i64,
    lesson_id: i64,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<GrammarProgressResponse, ApiError> {
    let notes = notes.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty());
    if notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
        return Err(ApiError::Validation(format!(
            "Notes must be at most {MAX_NOTES_LEN} characters long"
        )));
    }

    let mut tx = pool.begin().await?;

    grammar_repo::find_lesson(&mut *tx, lesson_id)
        .await?
        .ok_or_else(not_found)?;

    let progress =
        grammar_repo::upsert_completion(&mut *tx, user_id, lesson_id, notes.as_deref(), now)
            .await?;
    record_study_activity(&mut tx, user_id, StudyActivity::GrammarLesson, now).await?;

    tx.commit().await?;

    tracing::info!(user_id, lesson_id, "grammar lesson completed");

    Ok(progress.into())
}
