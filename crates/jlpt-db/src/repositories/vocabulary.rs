use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

use crate::models::{ProgressState, VocabularyProgress, VocabularyWithProgressRow};

pub async fn list_with_progress<'e, E>(
    executor: E,
    user_id: i64,
    jlpt_level: Option<i32>,
) -> Result<Vec<VocabularyWithProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT v.id, v.word, v.reading, v.meaning, v.part_of_speech, v.jlpt_level,
                   v.example_sentence, v.example_translation, v.audio_url, v.created_at, v.updated_at,
                   p.id AS progress_id, p.ease_factor, p.interval_days, p.repetitions,
                   p.next_review_date, p.last_reviewed_at, p.total_reviews, p.correct_reviews
            FROM vocabulary v
            LEFT JOIN user_vocabulary_progress p ON p.vocabulary_id = v.id AND p.user_id = $1
            WHERE ($2::int IS NULL OR v.jlpt_level = $2)
            ORDER BY v.id
        "#,
    )
    .bind(user_id)
    .bind(jlpt_level)
    .fetch_all(executor)
    .await
}

pub async fn find_with_progress<'e, E>(
    executor: E,
    user_id: i64,
    vocabulary_id: i64,
) -> Result<Option<VocabularyWithProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT v.id, v.word, v.reading, v.meaning, v.part_of_speech, v.jlpt_level,
                   v.example_sentence, v.example_translation, v.audio_url, v.created_at, v.updated_at,
                   p.id AS progress_id, p.ease_factor, p.interval_days, p.repetitions,
                   p.next_review_date, p.last_reviewed_at, p.total_reviews, p.correct_reviews
            FROM vocabulary v
            LEFT JOIN user_vocabulary_progress p ON p.vocabulary_id = v.id AND p.user_id = $1
            WHERE v.id = $2
        "#,
    )
    .bind(user_id)
    .bind(vocabulary_id)
    .fetch_optional(executor)
    .await
}

/// Items whose next review is at or before `now`, most overdue first.
pub async fn list_due<'e, E>(
    executor: E,
    user_id: i64,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<VocabularyWithProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT v.id, v.word, v.reading, v.meaning, v.part_of_speech, v.jlpt_level,
                   v.example_sentence, v.example_translation, v.audio_url, v.created_at, v.updated_at,
                   p.id AS progress_id, p.ease_factor, p.interval_days, p.repetitions,
                   p.next_review_date, p.last_reviewed_at, p.total_reviews, p.correct_reviews
            FROM vocabulary v
            INNER JOIN user_vocabulary_progress p ON p.vocabulary_id = v.id
            WHERE p.user_id = $1 AND p.next_review_date <= $2
            ORDER BY p.next_review_date, v.id
            LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, vocabulary_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM vocabulary WHERE id = $1)
        "#,
    )
    .bind(vocabulary_id)
    .fetch_one(executor)
    .await
}

pub async fn find_progress<'e, E>(
    executor: E,
    user_id: i64,
    vocabulary_id: i64,
) -> Result<Option<VocabularyProgress>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, vocabulary_id, ease_factor, interval_days, repetitions,
                   next_review_date, last_reviewed_at, total_reviews, correct_reviews,
                   created_at, updated_at
            FROM user_vocabulary_progress
            WHERE user_id = $1 AND vocabulary_id = $2
        "#,
    )
    .bind(user_id)
    .bind(vocabulary_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_progress`], but locks the row until the transaction ends.
pub async fn find_progress_for_update<'e, E>(
    executor: E,
    user_id: i64,
    vocabulary_id: i64,
) -> Result<Option<VocabularyProgress>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, vocabulary_id, ease_factor, interval_days, repetitions,
                   next_review_date, last_reviewed_at, total_reviews, correct_reviews,
                   created_at, updated_at
            FROM user_vocabulary_progress
            WHERE user_id = $1 AND vocabulary_id = $2
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(vocabulary_id)
    .fetch_optional(executor)
    .await
}

/// Insert progress unless the learner already has a row for this item.
///
/// Returns `true` if a row was created.
pub async fn insert_progress_if_absent<'e, E>(
    executor: E,
    user_id: i64,
    vocabulary_id: i64,
    state: &ProgressState,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_vocabulary_progress (
                user_id, vocabulary_id, ease_factor, interval_days, repetitions,
                next_review_date, last_reviewed_at, total_reviews, correct_reviews
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, vocabulary_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(vocabulary_id)
    .bind(state.ease_factor)
    .bind(state.interval_days)
    .bind(state.repetitions)
    .bind(state.next_review_date)
    .bind(state.last_reviewed_at)
    .bind(state.total_reviews)
    .bind(state.correct_reviews)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_progress<'e, E>(
    executor: E,
    progress_id: i64,
    state: &ProgressState,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE user_vocabulary_progress
            SET ease_factor = $1,
                interval_days = $2,
                repetitions = $3,
                next_review_date = $4,
                last_reviewed_at = $5,
                total_reviews = $6,
                correct_reviews = $7,
                updated_at = NOW()
            WHERE id = $8
        "#,
    )
    .bind(state.ease_factor)
    .bind(state.interval_days)
    .bind(state.repetitions)
    .bind(state.next_review_date)
    .bind(state.last_reviewed_at)
    .bind(state.total_reviews)
    .bind(state.correct_reviews)
    .bind(progress_id)
    .execute(executor)
    .await?;
    Ok(())
}
