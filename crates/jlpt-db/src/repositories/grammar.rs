use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

use crate::models::{GrammarExample, GrammarLesson, GrammarLessonSummary, GrammarProgress};

pub async fn list_with_status<'e, E>(
    executor: E,
    user_id: i64,
    jlpt_level: Option<i32>,
) -> Result<Vec<GrammarLessonSummary>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT gl.id, gl.title, gl.grammar_point, gl.explanation, gl.usage_notes,
                   gl.jlpt_level, gl.lesson_order, gl.created_at, gl.updated_at,
                   COALESCE(ugp.completed, FALSE) AS completed
            FROM grammar_lessons gl
            LEFT JOIN user_grammar_progress ugp
                ON ugp.grammar_lesson_id = gl.id AND ugp.user_id = $1
            WHERE ($2::int IS NULL OR gl.jlpt_level = $2)
            ORDER BY gl.lesson_order NULLS LAST, gl.id
        "#,
    )
    .bind(user_id)
    .bind(jlpt_level)
    .fetch_all(executor)
    .await
}

pub async fn find_lesson<'e, E>(
    executor: E,
    lesson_id: i64,
) -> Result<Option<GrammarLesson>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, grammar_point, explanation, usage_notes, jlpt_level,
                   lesson_order, created_at, updated_at
            FROM grammar_lessons
            WHERE id = $1
        "#,
    )
    .bind(lesson_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_examples<'e, E>(
    executor: E,
    lesson_id: i64,
) -> Result<Vec<GrammarExample>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, grammar_lesson_id, japanese_sentence, english_translation, notes, example_order
            FROM grammar_examples
            WHERE grammar_lesson_id = $1
            ORDER BY example_order NULLS LAST, id
        "#,
    )
    .bind(lesson_id)
    .fetch_all(executor)
    .await
}

pub async fn find_progress<'e, E>(
    executor: E,
    user_id: i64,
    lesson_id: i64,
) -> Result<Option<GrammarProgress>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, grammar_lesson_id, completed, completed_at, notes
            FROM user_grammar_progress
            WHERE user_id = $1 AND grammar_lesson_id = $2
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .fetch_optional(executor)
    .await
}

/// Mark a lesson completed. The first completion time is kept, notes are
/// replaced only when new ones are given.
pub async fn upsert_completion<'e, E>(
    executor: E,
    user_id: i64,
    lesson_id: i64,
    notes: Option<&str>,
    now: DateTime<Utc>,
) -> Result<GrammarProgress, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO user_grammar_progress (user_id, grammar_lesson_id, completed, completed_at, notes)
            VALUES ($1, $2, TRUE, $3, $4)
            ON CONFLICT (user_id, grammar_lesson_id)
            DO UPDATE SET
                completed = TRUE,
                completed_at = COALESCE(user_grammar_progress.completed_at, $3),
                notes = COALESCE($4, user_grammar_progress.notes),
                updated_at = NOW()
            RETURNING user_id, grammar_lesson_id, completed, completed_at, notes
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .bind(now)
    .bind(notes)
    .fetch_one(executor)
    .await
}
