use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};

use crate::models::{
    Quiz, QuizAnswer, QuizQuestionRow, QuizSession, QuizSessionSummary, SessionCompletion,
};

pub async fn list_quizzes<'e, E>(
    executor: E,
    jlpt_level: Option<i32>,
) -> Result<Vec<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, quiz_type, jlpt_level, time_limit_minutes,
                   passing_score, created_at
            FROM quizzes
            WHERE ($1::int IS NULL OR jlpt_level = $1)
            ORDER BY id
        "#,
    )
    .bind(jlpt_level)
    .fetch_all(executor)
    .await
}

pub async fn find_quiz<'e, E>(executor: E, quiz_id: i64) -> Result<Option<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, quiz_type, jlpt_level, time_limit_minutes,
                   passing_score, created_at
            FROM quizzes
            WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_questions<'e, E>(
    executor: E,
    quiz_id: i64,
) -> Result<Vec<QuizQuestionRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, quiz_id, question_type, question_text, correct_answer,
                   option_a, option_b, option_c, option_d, explanation, points, question_order
            FROM quiz_questions
            WHERE quiz_id = $1
            ORDER BY question_order NULLS LAST, id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(executor)
    .await
}

pub async fn create_session<'e, E>(
    executor: E,
    user_id: i64,
    quiz_id: i64,
    started_at: DateTime<Utc>,
) -> Result<QuizSession, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO quiz_sessions (user_id, quiz_id, started_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, quiz_id, started_at, completed_at, score, total_points,
                      percentage, passed, time_spent_seconds
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(started_at)
    .fetch_one(executor)
    .await
}

pub async fn find_session<'e, E>(
    executor: E,
    session_id: i64,
) -> Result<Option<QuizSession>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, quiz_id, started_at, completed_at, score, total_points,
                   percentage, passed, time_spent_seconds
            FROM quiz_sessions
            WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_session`], but locks the row until the transaction ends.
pub async fn find_session_for_update<'e, E>(
    executor: E,
    session_id: i64,
) -> Result<Option<QuizSession>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, quiz_id, started_at, completed_at, score, total_points,
                   percentage, passed, time_spent_seconds
            FROM quiz_sessions
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(session_id)
    .fetch_optional(executor)
    .await
}

pub async fn complete_session<'e, E>(
    executor: E,
    session_id: i64,
    completion: &SessionCompletion,
) -> Result<QuizSession, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE quiz_sessions
            SET completed_at = $1,
                score = $2,
                total_points = $3,
                percentage = $4,
                passed = $5,
                time_spent_seconds = $6
            WHERE id = $7
            RETURNING id, user_id, quiz_id, started_at, completed_at, score, total_points,
                      percentage, passed, time_spent_seconds
        "#,
    )
    .bind(completion.completed_at)
    .bind(completion.score)
    .bind(completion.total_points)
    .bind(completion.percentage)
    .bind(completion.passed)
    .bind(completion.time_spent_seconds)
    .bind(session_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_answer<'e, E>(
    executor: E,
    session_id: i64,
    question_id: i64,
    user_answer: &str,
    is_correct: bool,
    answered_at: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO quiz_answers (quiz_session_id, quiz_question_id, user_answer, is_correct, answered_at)
            VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(session_id)
    .bind(question_id)
    .bind(user_answer)
    .bind(is_correct)
    .bind(answered_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn list_session_answers<'e, E>(
    executor: E,
    session_id: i64,
) -> Result<Vec<QuizAnswer>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, quiz_session_id, quiz_question_id, user_answer, is_correct, answered_at
            FROM quiz_answers
            WHERE quiz_session_id = $1
            ORDER BY id
        "#,
    )
    .bind(session_id)
    .fetch_all(executor)
    .await
}

pub async fn list_user_sessions<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Vec<QuizSessionSummary>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT s.id, s.user_id, s.quiz_id, s.started_at, s.completed_at, s.score,
                   s.total_points, s.percentage, s.passed, s.time_spent_seconds,
                   q.title AS quiz_title
            FROM quiz_sessions s
            INNER JOIN quizzes q ON q.id = s.quiz_id
            WHERE s.user_id = $1
            ORDER BY s.started_at DESC, s.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
