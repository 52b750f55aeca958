use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ReviewState;

/// Display statistics derived from a [`ReviewState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    /// Successful reviews as a percentage of all reviews
    pub success_rate: f64,
    /// Reviews ever submitted
    pub total_reviews: i32,
    /// Reviews with quality 3 or above
    pub correct_reviews: i32,
    /// Interval of the current schedule
    pub current_interval_days: i32,
    /// Consecutive successful reviews
    pub repetitions: i32,
    /// Current ease factor
    pub ease_factor: f64,
    /// Whole days since the last review, `None` if never reviewed
    pub days_since_last_review: Option<i64>,
    /// Whole days until the item is due, 0 once it is due
    pub days_until_next_review: i64,
    /// Whether the item is due at the time the stats were taken
    pub is_due: bool,
}

impl ReviewStats {
    /// Summarize `state` as seen at `now`.
    pub fn from_state(state: &ReviewState, now: DateTime<Utc>) -> Self {
        Self {
            success_rate: state.success_rate(),
            total_reviews: state.total_reviews,
            correct_reviews: state.correct_reviews,
            current_interval_days: state.interval,
            repetitions: state.repetitions,
            ease_factor: state.ease_factor,
            days_since_last_review: state
                .last_reviewed_at
                .map(|reviewed_at| (now - reviewed_at).num_days()),
            days_until_next_review: (state.next_review_date - now).num_days().max(0),
            is_due: state.is_due(now),
        }
    }
}
