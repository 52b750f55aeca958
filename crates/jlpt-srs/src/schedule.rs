use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_EASE_FACTOR, INITIAL_INTERVAL_DAYS, MIN_EASE_FACTOR, Quality, SECOND_INTERVAL_DAYS,
};

/// Scheduling state of one vocabulary item for one learner.
///
/// Values are never mutated in place by the scheduler: every review produces a
/// fresh `ReviewState` and leaves the input untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Interval multiplier, never below [`MIN_EASE_FACTOR`]
    pub ease_factor: f64,
    /// Days between the last review and the next one, at least 1
    pub interval: i32,
    /// Consecutive successful reviews
    pub repetitions: i32,
    /// When the item becomes due again
    pub next_review_date: DateTime<Utc>,
    /// When the item was last reviewed, if ever
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Number of reviews ever submitted
    pub total_reviews: i32,
    /// Number of reviews with quality >= 3
    pub correct_reviews: i32,
}

impl ReviewState {
    /// Fresh state for an item the learner has never reviewed.
    ///
    /// The item is due immediately.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: INITIAL_INTERVAL_DAYS,
            repetitions: 0,
            next_review_date: now,
            last_reviewed_at: None,
            total_reviews: 0,
            correct_reviews: 0,
        }
    }

    /// Whether the item should be shown at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_date
    }

    /// Apply one review. Shorthand for [`compute_next_review`].
    #[must_use]
    pub fn review(&self, quality: Quality, now: DateTime<Utc>) -> Self {
        compute_next_review(self, quality, now)
    }

    /// Percentage of reviews that were successful, 0 when never reviewed.
    pub fn success_rate(&self) -> f64 {
        if self.total_reviews > 0 {
            f64::from(self.correct_reviews) / f64::from(self.total_reviews) * 100.0
        } else {
            0.0
        }
    }
}

/// Create the initial progress for an item, due at `now`.
///
/// # Arguments
///
/// * `now` - The moment the learner starts studying the item
///
/// # Returns
///
/// A [`ReviewState`] with ease 2.5, a one day interval and no reviews
pub const fn initialize_progress(now: DateTime<Utc>) -> ReviewState {
    ReviewState::new(now)
}

/// Compute the state that results from reviewing an item.
///
/// # Arguments
///
/// * `state` - The state before the review
/// * `quality` - How well the item was recalled
/// * `now` - When the review happened; the only clock the scheduler sees
///
/// # Returns
///
/// The new [`ReviewState`]
///
/// # Algorithm
///
/// SM-2, with quality 3 and above counting as success:
///
/// * Failure: repetitions reset to 0, interval reset to 1 day
/// * First success: 1 day
/// * Second success: 6 days
/// * Later successes: previous interval × ease factor, rounded half away from zero
///
/// The ease factor moves by `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)` on every
/// review and never drops below 1.3. A due date past the last representable
/// instant saturates to [`DateTime::MAX_UTC`].
pub fn compute_next_review(state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    let mut next = *state;

    next.total_reviews += 1;
    next.last_reviewed_at = Some(now);

    if quality.is_success() {
        next.correct_reviews += 1;
        next.interval = match state.repetitions {
            0 => INITIAL_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => grow_interval(state.interval, state.ease_factor),
        };
        next.repetitions += 1;
    } else {
        next.repetitions = 0;
        next.interval = INITIAL_INTERVAL_DAYS;
    }

    next.ease_factor = adjust_ease_factor(state.ease_factor, quality);
    next.next_review_date = now
        .checked_add_signed(Duration::days(i64::from(next.interval)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    next
}

/// Multiply an interval by the ease factor, saturating at `i32::MAX`.
fn grow_interval(interval: i32, ease_factor: f64) -> i32 {
    let grown = (f64::from(interval) * ease_factor).round();

    grown.clamp(1.0, f64::from(i32::MAX)) as i32
}

/// Ease factor after a review of the given quality, floored at [`MIN_EASE_FACTOR`].
pub fn adjust_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let distance = 5.0 - f64::from(quality.value());
    let delta = 0.1 - distance * (0.08 + distance * 0.02);

    (ease_factor + delta).max(MIN_EASE_FACTOR)
}
