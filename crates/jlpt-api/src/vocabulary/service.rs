use chrono::{DateTime, Utc};
use jlpt_db::{models::StudyActivity, repositories::vocabulary as vocab_repo};
use jlpt_srs::{Quality, ReviewState, ReviewStats, compute_next_review, initialize_progress};
use sqlx::PgPool;

use super::model::{VocabularyResponse, progress_state, review_state};
use crate::{error::ApiError, metrics::record_review_event, progress::record_study_activity};

fn not_found() -> ApiError {
    ApiError::NotFound("Vocabulary not found".to_string())
}

pub async fn list_vocabulary(
    pool: &PgPool,
    user_id: i64,
    jlpt_level: Option<i32>,
    now: DateTime<Utc>,
) -> Result<Vec<VocabularyResponse>, ApiError> {
    let rows = vocab_repo::list_with_progress(pool, user_id, jlpt_level).await?;

    Ok(rows.into_iter().map(|row| VocabularyResponse::new(row, now)).collect())
}

pub async fn get_vocabulary(
    pool: &PgPool,
    user_id: i64,
    vocabulary_id: i64,
    now: DateTime<Utc>,
) -> Result<VocabularyResponse, ApiError> {
    let row = vocab_repo::find_with_progress(pool, user_id, vocabulary_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(VocabularyResponse::new(row, now))
}

/// Items whose next review is at or before `now`, most overdue first.
pub async fn get_due_vocabulary(
    pool: &PgPool,
    user_id: i64,
    limit: i64,
    now: DateTime<Utc>,
) -> Result<Vec<VocabularyResponse>, ApiError> {
    let rows = vocab_repo::list_due(pool, user_id, now, limit).await?;

    Ok(rows.into_iter().map(|row| VocabularyResponse::new(row, now)).collect())
}

/// Apply one review to the user's progress on an item.
///
/// The progress row is locked for the whole transaction, so concurrent reviews
/// of the same item are applied one after the other. The first review of an
/// item the user never started creates its progress on the fly.
pub async fn submit_review(
    pool: &PgPool,
    user_id: i64,
    vocabulary_id: i64,
    quality: Quality,
    now: DateTime<Utc>,
) -> Result<ReviewState, ApiError> {
    let mut tx = pool.begin().await?;

    if !vocab_repo::exists(&mut *tx, vocabulary_id).await? {
        return Err(not_found());
    }

    let progress = match vocab_repo::find_progress_for_update(&mut *tx, user_id, vocabulary_id)
        .await?
    {
        Some(progress) => progress,
        None => {
            let initial = progress_state(&initialize_progress(now));
            vocab_repo::insert_progress_if_absent(&mut *tx, user_id, vocabulary_id, &initial)
                .await?;

            vocab_repo::find_progress_for_update(&mut *tx, user_id, vocabulary_id)
                .await?
                .ok_or_else(|| ApiError::Internal("progress missing after insert".to_string()))?
        }
    };

    let previous = review_state(&progress.state);
    let next = compute_next_review(&previous, quality, now);

    vocab_repo::update_progress(&mut *tx, progress.id, &progress_state(&next)).await?;
    record_study_activity(&mut tx, user_id, StudyActivity::VocabularyReview, now).await?;

    tx.commit().await?;

    record_review_event(quality);
    tracing::info!(
        user_id,
        vocabulary_id,
        quality = quality.value(),
        interval_days = next.interval,
        ease_factor = next.ease_factor,
        repetitions = next.repetitions,
        "review recorded"
    );

    Ok(next)
}

/// Create the initial progress for an item.
///
/// # Errors
///
/// `NotFound` for an unknown item, `Conflict` if the user already started it.
pub async fn start_studying(
    pool: &PgPool,
    user_id: i64,
    vocabulary_id: i64,
    now: DateTime<Utc>,
) -> Result<ReviewState, ApiError> {
    if !vocab_repo::exists(pool, vocabulary_id).await? {
        return Err(not_found());
    }

    let state = initialize_progress(now);
    let inserted =
        vocab_repo::insert_progress_if_absent(pool, user_id, vocabulary_id, &progress_state(&state))
            .await?;

    if !inserted {
        return Err(ApiError::Conflict(
            "Already studying this vocabulary".to_string(),
        ));
    }

    tracing::debug!(user_id, vocabulary_id, "started studying");

    Ok(state)
}

pub async fn get_review_stats(
    pool: &PgPool,
    user_id: i64,
    vocabulary_id: i64,
    now: DateTime<Utc>,
) -> Result<ReviewStats, ApiError> {
    let progress = vocab_repo::find_progress(pool, user_id, vocabulary_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No progress found for this vocabulary".to_string()))?;

    Ok(ReviewStats::from_state(&review_state(&progress.state), now))
}
