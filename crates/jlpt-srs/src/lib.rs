//! SRS (Spaced Repetition System) library for JLPT Time
//!
//! This crate implements the SM-2 scheduling algorithm used to decide when a
//! learner should see a vocabulary item again. Everything here is pure: the
//! caller supplies the current time and persists the result.

mod quality;
mod schedule;
mod stats;

pub use quality::{InvalidQuality, Quality};
pub use schedule::{ReviewState, adjust_ease_factor, compute_next_review, initialize_progress};
pub use stats::ReviewStats;

/// Ease factor assigned to items that have never been reviewed.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// The ease factor never drops below this value.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval after a failed review and after the first successful one.
pub const INITIAL_INTERVAL_DAYS: i32 = 1;

/// Interval after the second consecutive successful review.
pub const SECOND_INTERVAL_DAYS: i32 = 6;
