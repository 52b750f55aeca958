use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to check a login attempt
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// A vocabulary item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vocabulary {
    pub id: i64,
    /// Word as written (kanji or kana)
    pub word: String,
    /// Kana reading
    pub reading: String,
    pub meaning: String,
    pub part_of_speech: Option<String>,
    /// JLPT level, 5 (easiest) to 1
    pub jlpt_level: i32,
    pub example_sentence: Option<String>,
    pub example_translation: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scheduling columns of a `user_vocabulary_progress` row
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct ProgressState {
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub total_reviews: i32,
    pub correct_reviews: i32,
}

/// A learner's progress on one vocabulary item
#[derive(Debug, Clone, FromRow)]
pub struct VocabularyProgress {
    pub id: i64,
    pub user_id: i64,
    pub vocabulary_id: i64,
    #[sqlx(flatten)]
    pub state: ProgressState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A vocabulary item left-joined with the caller's progress.
///
/// The progress columns are all `NULL` when the learner never started the item.
#[derive(Debug, Clone, FromRow)]
pub struct VocabularyWithProgressRow {
    #[sqlx(flatten)]
    pub vocabulary: Vocabulary,
    pub progress_id: Option<i64>,
    pub ease_factor: Option<f64>,
    pub interval_days: Option<i32>,
    pub repetitions: Option<i32>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub total_reviews: Option<i32>,
    pub correct_reviews: Option<i32>,
}

impl VocabularyWithProgressRow {
    /// Progress columns, if a progress row was joined.
    pub fn progress(&self) -> Option<ProgressState> {
        self.progress_id?;

        Some(ProgressState {
            ease_factor: self.ease_factor?,
            interval_days: self.interval_days?,
            repetitions: self.repetitions?,
            next_review_date: self.next_review_date?,
            last_reviewed_at: self.last_reviewed_at,
            total_reviews: self.total_reviews?,
            correct_reviews: self.correct_reviews?,
        })
    }
}

/// A grammar lesson
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrammarLesson {
    pub id: i64,
    pub title: String,
    /// The pattern being taught, e.g. `〜てもいい`
    pub grammar_point: String,
    pub explanation: String,
    pub usage_notes: Option<String>,
    pub jlpt_level: i32,
    pub lesson_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A lesson plus whether the caller completed it
#[derive(Debug, Clone, FromRow)]
pub struct GrammarLessonSummary {
    #[sqlx(flatten)]
    pub lesson: GrammarLesson,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrammarExample {
    pub id: i64,
    pub grammar_lesson_id: i64,
    pub japanese_sentence: String,
    pub english_translation: String,
    pub notes: Option<String>,
    pub example_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrammarProgress {
    pub user_id: i64,
    pub grammar_lesson_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A quiz definition
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// `vocabulary`, `grammar` or `mixed`
    pub quiz_type: Option<String>,
    pub jlpt_level: i32,
    pub time_limit_minutes: Option<i32>,
    /// Minimum percentage needed to pass
    pub passing_score: i32,
    pub created_at: DateTime<Utc>,
}

/// A row of `quiz_questions`, including the correct answer
#[derive(Debug, Clone, FromRow)]
pub struct QuizQuestionRow {
    pub id: i64,
    pub quiz_id: i64,
    pub question_type: String,
    pub question_text: String,
    pub correct_answer: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub explanation: Option<String>,
    pub points: i32,
    pub question_order: Option<i32>,
}

impl QuizQuestionRow {
    /// Non-empty options, in `a` to `d` order.
    pub fn options(&self) -> Vec<String> {
        [&self.option_a, &self.option_b, &self.option_c, &self.option_d]
            .into_iter()
            .flatten()
            .filter(|option| !option.is_empty())
            .cloned()
            .collect()
    }
}

/// One attempt at a quiz
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizSession {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub total_points: Option<i32>,
    pub percentage: Option<f64>,
    pub passed: Option<bool>,
    pub time_spent_seconds: Option<i32>,
}

/// A session joined with its quiz title, for history listings
#[derive(Debug, Clone, FromRow)]
pub struct QuizSessionSummary {
    #[sqlx(flatten)]
    pub session: QuizSession,
    pub quiz_title: String,
}

/// Values written when a session is graded
#[derive(Debug, Clone, Copy)]
pub struct SessionCompletion {
    pub completed_at: DateTime<Utc>,
    pub score: i32,
    pub total_points: i32,
    pub percentage: f64,
    pub passed: bool,
    pub time_spent_seconds: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizAnswer {
    pub id: i64,
    pub quiz_session_id: i64,
    pub quiz_question_id: i64,
    pub user_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Utc>,
}

/// Streak bookkeeping from `user_statistics`
#[derive(Debug, Clone, Copy, FromRow)]
pub struct UserStatistics {
    pub user_id: i64,
    pub study_streak_days: i32,
    pub last_study_date: Option<NaiveDate>,
}

/// Counters computed live from the progress tables
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StudyTotals {
    pub vocabulary_learned: i64,
    pub vocabulary_due: i64,
    pub grammar_completed: i64,
    pub grammar_total: i64,
    pub quizzes_taken: i64,
    pub quizzes_passed: i64,
    pub average_quiz_percentage: Option<f64>,
    /// Sum of `time_spent_seconds` over completed quiz sessions
    pub quiz_seconds: i64,
}

/// Kind of activity logged in `daily_study_logs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyActivity {
    VocabularyReview,
    GrammarLesson,
    QuizCompleted,
}
