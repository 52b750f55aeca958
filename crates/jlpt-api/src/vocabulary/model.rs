use chrono::{DateTime, Utc};
use jlpt_db::models::{ProgressState, VocabularyWithProgressRow};
use jlpt_srs::{Quality, ReviewState};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Scheduler view of a stored progress row
pub const fn review_state(progress: &ProgressState) -> ReviewState {
    ReviewState {
        ease_factor: progress.ease_factor,
        interval: progress.interval_days,
        repetitions: progress.repetitions,
        next_review_date: progress.next_review_date,
        last_reviewed_at: progress.last_reviewed_at,
        total_reviews: progress.total_reviews,
        correct_reviews: progress.correct_reviews,
    }
}

/// Row view of a scheduler state
pub const fn progress_state(state: &ReviewState) -> ProgressState {
    ProgressState {
        ease_factor: state.ease_factor,
        interval_days: state.interval,
        repetitions: state.repetitions,
        next_review_date: state.next_review_date,
        last_reviewed_at: state.last_reviewed_at,
        total_reviews: state.total_reviews,
        correct_reviews: state.correct_reviews,
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub total_reviews: i32,
    pub correct_reviews: i32,
    pub success_rate: f64,
    pub is_due: bool,
}

impl ProgressResponse {
    pub fn new(state: &ReviewState, now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: state.ease_factor,
            interval_days: state.interval,
            repetitions: state.repetitions,
            next_review_date: state.next_review_date,
            last_reviewed_at: state.last_reviewed_at,
            total_reviews: state.total_reviews,
            correct_reviews: state.correct_reviews,
            success_rate: state.success_rate(),
            is_due: state.is_due(now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub id: i64,
    pub word: String,
    pub reading: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub jlpt_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Absent until the user starts studying the item
    pub progress: Option<ProgressResponse>,
}

impl VocabularyResponse {
    pub fn new(row: VocabularyWithProgressRow, now: DateTime<Utc>) -> Self {
        let progress = row
            .progress()
            .map(|progress| ProgressResponse::new(&review_state(&progress), now));
        let vocabulary = row.vocabulary;

        Self {
            id: vocabulary.id,
            word: vocabulary.word,
            reading: vocabulary.reading,
            meaning: vocabulary.meaning,
            part_of_speech: vocabulary.part_of_speech,
            jlpt_level: vocabulary.jlpt_level,
            example_sentence: vocabulary.example_sentence,
            example_translation: vocabulary.example_translation,
            audio_url: vocabulary.audio_url,
            progress,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DueQuery {
    pub limit: Option<i64>,
}

/// Review body: either the simple `is_correct` flag or a 0-5 `quality` grade.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    pub is_correct: Option<bool>,
    pub quality: Option<i64>,
}

impl ReviewRequest {
    pub fn quality(&self) -> Result<Quality, ApiError> {
        match (self.is_correct, self.quality) {
            (Some(is_correct), None) => Ok(Quality::from_correct(is_correct)),
            (None, Some(quality)) => Ok(Quality::try_from(quality)?),
            (Some(_), Some(_)) => Err(ApiError::Validation(
                "Provide either is_correct or quality, not both".to_string(),
            )),
            (None, None) => Err(ApiError::Validation(
                "Either is_correct or quality is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub quality: Quality,
    pub progress: ProgressResponse,
    pub next_review_date: DateTime<Utc>,
    pub message: &'static str,
}

impl ReviewResponse {
    pub fn new(quality: Quality, state: &ReviewState, now: DateTime<Utc>) -> Self {
        let message = if quality.is_success() {
            "Great job! Keep it up!"
        } else {
            "Don't worry, you'll get it next time!"
        };

        Self {
            success: true,
            quality,
            progress: ProgressResponse::new(state, now),
            next_review_date: state.next_review_date,
            message,
        }
    }
}
