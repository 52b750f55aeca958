use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Where a quiz session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Questions handed out, no answers yet
    Started,
    /// Answers graded
    Completed,
}

/// Illegal transition of an [`Attempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The attempt was already completed and cannot be graded again
    #[error("quiz session already completed")]
    AlreadyCompleted,
}

/// Lifecycle of a single quiz session: started, then completed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// When the questions were handed out
    pub started_at: DateTime<Utc>,
    /// When the answers were graded
    pub completed_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// New attempt started at `now`.
    pub const fn start(now: DateTime<Utc>) -> Self {
        Self { started_at: now, completed_at: None }
    }

    /// Current lifecycle state.
    ///
    /// ```
    /// use chrono::Utc;
    /// use jlpt_quiz::{Attempt, AttemptStatus};
    ///
    /// let attempt = Attempt::start(Utc::now());
    /// assert_eq!(attempt.status(), AttemptStatus::Started);
    ///
    /// let attempt = attempt.complete(Utc::now()).unwrap();
    /// assert_eq!(attempt.status(), AttemptStatus::Completed);
    /// ```
    pub const fn status(&self) -> AttemptStatus {
        match self.completed_at {
            Some(_) => AttemptStatus::Completed,
            None => AttemptStatus::Started,
        }
    }

    /// Mark the attempt completed at `now`.
    ///
    /// # Errors
    ///
    /// [`AttemptError::AlreadyCompleted`] if the attempt was completed before.
    pub fn complete(&self, now: DateTime<Utc>) -> Result<Self, AttemptError> {
        if self.completed_at.is_some() {
            return Err(AttemptError::AlreadyCompleted);
        }

        Ok(Self { started_at: self.started_at, completed_at: Some(now) })
    }

    /// Whole seconds between start and completion, `None` while in progress.
    pub fn time_spent_seconds(&self) -> Option<i64> {
        self.completed_at
            .map(|completed_at| (completed_at - self.started_at).num_seconds().max(0))
    }
}
