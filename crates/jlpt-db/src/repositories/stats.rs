use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, Postgres};

use crate::models::{StudyActivity, StudyTotals, UserStatistics};

/// Read the streak row and lock it until the transaction ends.
pub async fn find_statistics_for_update<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Option<UserStatistics>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, study_streak_days, last_study_date
            FROM user_statistics
            WHERE user_id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_statistics<'e, E>(
    executor: E,
    user_id: i64,
) -> Result<Option<UserStatistics>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, study_streak_days, last_study_date
            FROM user_statistics
            WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn upsert_streak<'e, E>(
    executor: E,
    user_id: i64,
    study_date: NaiveDate,
    streak_days: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_statistics (user_id, study_streak_days, last_study_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET
                study_streak_days = $2,
                last_study_date = $3,
                updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(streak_days)
    .bind(study_date)
    .execute(executor)
    .await?;
    Ok(())
}

/// Bump the per-day counter for `activity`.
pub async fn record_daily_activity<'e, E>(
    executor: E,
    user_id: i64,
    study_date: NaiveDate,
    activity: StudyActivity,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let (vocabulary, grammar, quizzes) = match activity {
        StudyActivity::VocabularyReview => (1, 0, 0),
        StudyActivity::GrammarLesson => (0, 1, 0),
        StudyActivity::QuizCompleted => (0, 0, 1),
    };

    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO daily_study_logs (user_id, study_date, vocabulary_reviewed, grammar_studied, quizzes_completed)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, study_date)
            DO UPDATE SET
                vocabulary_reviewed = daily_study_logs.vocabulary_reviewed + $3,
                grammar_studied = daily_study_logs.grammar_studied + $4,
                quizzes_completed = daily_study_logs.quizzes_completed + $5
        "#,
    )
    .bind(user_id)
    .bind(study_date)
    .bind(vocabulary)
    .bind(grammar)
    .bind(quizzes)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn fetch_study_totals<'e, E>(
    executor: E,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<StudyTotals, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                (SELECT COUNT(*) FROM user_vocabulary_progress WHERE user_id = $1) AS vocabulary_learned,
                (SELECT COUNT(*) FROM user_vocabulary_progress
                    WHERE user_id = $1 AND next_review_date <= $2) AS vocabulary_due,
                (SELECT COUNT(*) FROM user_grammar_progress
                    WHERE user_id = $1 AND completed) AS grammar_completed,
                (SELECT COUNT(*) FROM grammar_lessons) AS grammar_total,
                (SELECT COUNT(*) FROM quiz_sessions
                    WHERE user_id = $1 AND completed_at IS NOT NULL) AS quizzes_taken,
                (SELECT COUNT(*) FROM quiz_sessions
                    WHERE user_id = $1 AND completed_at IS NOT NULL AND passed) AS quizzes_passed,
                (SELECT AVG(percentage) FROM quiz_sessions
                    WHERE user_id = $1 AND completed_at IS NOT NULL) AS average_quiz_percentage,
                (SELECT COALESCE(SUM(time_spent_seconds), 0)::BIGINT FROM quiz_sessions
                    WHERE user_id = $1 AND completed_at IS NOT NULL) AS quiz_seconds
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_one(executor)
    .await
}
