use chrono::NaiveDate;
use jlpt_db::models::{StudyTotals, UserStatistics};
use serde::Serialize;

use super::streak::current_streak;

#[derive(Debug, Serialize)]
pub struct UserStatisticsResponse {
    pub user_id: i64,
    pub study_streak_days: i32,
    pub last_study_date: Option<NaiveDate>,
    /// Items with a progress record
    pub vocabulary_learned: i64,
    pub vocabulary_due_count: i64,
    pub grammar_completed: i64,
    pub grammar_total: i64,
    pub quizzes_taken: i64,
    pub quizzes_passed: i64,
    /// Mean percentage over completed quiz sessions, 0 when none
    pub average_quiz_score: f64,
    /// Whole minutes spent in completed quiz sessions
    pub total_study_time_minutes: i64,
}

impl UserStatisticsResponse {
    /// Combine the stored streak with live totals as seen on `today`.
    pub fn new(
        user_id: i64,
        stats: Option<UserStatistics>,
        totals: StudyTotals,
        today: NaiveDate,
    ) -> Self {
        let (last_study_date, stored_streak) =
            stats.map_or((None, 0), |s| (s.last_study_date, s.study_streak_days));

        Self {
            user_id,
            study_streak_days: current_streak(last_study_date, stored_streak, today),
            last_study_date,
            vocabulary_learned: totals.vocabulary_learned,
            vocabulary_due_count: totals.vocabulary_due,
            grammar_completed: totals.grammar_completed,
            grammar_total: totals.grammar_total,
            quizzes_taken: totals.quizzes_taken,
            quizzes_passed: totals.quizzes_passed,
            average_quiz_score: totals.average_quiz_percentage.unwrap_or(0.0),
            total_study_time_minutes: totals.quiz_seconds / 60,
        }
    }
}
