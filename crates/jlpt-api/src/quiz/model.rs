use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jlpt_db::models::{Quiz, QuizAnswer, QuizQuestionRow, QuizSession, QuizSessionSummary};
use jlpt_quiz::GradedAnswer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_type: Option<String>,
    pub jlpt_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_minutes: Option<i32>,
    pub passing_score: i32,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            quiz_type: quiz.quiz_type,
            jlpt_level: quiz.jlpt_level,
            time_limit_minutes: quiz.time_limit_minutes,
            passing_score: quiz.passing_score,
        }
    }
}

/// A question as shown while taking the quiz, without its answer
#[derive(Debug, Serialize)]
pub struct QuizQuestionResponse {
    pub id: i64,
    pub question_text: String,
    pub question_type: String,
    pub options: Vec<String>,
    pub points: i32,
}

impl From<QuizQuestionRow> for QuizQuestionResponse {
    fn from(row: QuizQuestionRow) -> Self {
        Self {
            options: row.options(),
            id: row.id,
            question_text: row.question_text,
            question_type: row.question_type,
            points: row.points,
        }
    }
}

/// A question as shown with the result, including the answer
#[derive(Debug, Serialize)]
pub struct QuizQuestionDetailResponse {
    pub id: i64,
    pub question_text: String,
    pub question_type: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub points: i32,
}

impl From<QuizQuestionRow> for QuizQuestionDetailResponse {
    fn from(row: QuizQuestionRow) -> Self {
        Self {
            options: row.options(),
            id: row.id,
            question_text: row.question_text,
            question_type: row.question_type,
            correct_answer: row.correct_answer,
            explanation: row.explanation,
            points: row.points,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizDetailResponse {
    #[serde(flatten)]
    pub quiz: QuizResponse,
    pub questions: Vec<QuizQuestionResponse>,
}

#[derive(Debug, Serialize)]
pub struct StartQuizResponse {
    pub session_id: i64,
    pub quiz: QuizResponse,
    pub questions: Vec<QuizQuestionResponse>,
    pub started_at: DateTime<Utc>,
}

/// Submitted answers keyed by question id
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: HashMap<i64, String>,
}

#[derive(Debug, Serialize)]
pub struct QuizAnswerResponse {
    pub question_id: i64,
    pub user_answer: String,
    pub is_correct: bool,
}

impl From<GradedAnswer> for QuizAnswerResponse {
    fn from(answer: GradedAnswer) -> Self {
        Self {
            question_id: answer.question_id,
            user_answer: answer.user_answer,
            is_correct: answer.is_correct,
        }
    }
}

impl From<QuizAnswer> for QuizAnswerResponse {
    fn from(answer: QuizAnswer) -> Self {
        Self {
            question_id: answer.quiz_question_id,
            user_answer: answer.user_answer,
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub session_id: i64,
    pub quiz: QuizResponse,
    /// Points earned
    pub score: i32,
    pub total_points: i32,
    pub percentage: f64,
    pub total_questions: usize,
    pub passed: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_spent_seconds: Option<i32>,
    pub questions: Vec<QuizQuestionDetailResponse>,
    pub answers: Vec<QuizAnswerResponse>,
    /// Submitted ids that do not belong to the quiz
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_question_ids: Vec<i64>,
}

impl QuizResultResponse {
    pub fn new(
        session: QuizSession,
        quiz: Quiz,
        questions: Vec<QuizQuestionRow>,
        answers: Vec<QuizAnswerResponse>,
        ignored_question_ids: Vec<i64>,
    ) -> Self {
        Self {
            session_id: session.id,
            quiz: quiz.into(),
            score: session.score.unwrap_or(0),
            total_points: session.total_points.unwrap_or(0),
            percentage: session.percentage.unwrap_or(0.0),
            total_questions: questions.len(),
            passed: session.passed.unwrap_or(false),
            started_at: session.started_at,
            completed_at: session.completed_at,
            time_spent_seconds: session.time_spent_seconds,
            questions: questions.into_iter().map(Into::into).collect(),
            answers,
            ignored_question_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizSessionResponse {
    pub id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub total_points: Option<i32>,
    pub percentage: Option<f64>,
    pub passed: Option<bool>,
    pub time_spent_seconds: Option<i32>,
}

impl From<QuizSessionSummary> for QuizSessionResponse {
    fn from(summary: QuizSessionSummary) -> Self {
        let session = summary.session;
        Self {
            id: session.id,
            quiz_id: session.quiz_id,
            quiz_title: summary.quiz_title,
            started_at: session.started_at,
            completed_at: session.completed_at,
            score: session.score,
            total_points: session.total_points,
            percentage: session.percentage,
            passed: session.passed,
            time_spent_seconds: session.time_spent_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> QuizQuestionRow {
        QuizQuestionRow {
            id: 3,
            quiz_id: 1,
            question_type: "multiple_choice".into(),
            question_text: "「水」の読み方は？".into(),
            correct_answer: "みず".into(),
            option_a: Some("みず".into()),
            option_b: Some("ひ".into()),
            option_c: None,
            option_d: None,
            explanation: Some("水 is read みず".into()),
            points: 2,
            question_order: Some(1),
        }
    }

    #[test]
    fn test_question_response_hides_answer() {
        let json = serde_json::to_value(QuizQuestionResponse::from(row())).unwrap();

        assert!(json.get("correct_answer").is_none());
        assert!(json.get("explanation").is_none());
        assert_eq!(json["options"], serde_json::json!(["みず", "ひ"]));
    }

    #[test]
    fn test_detail_response_shows_answer() {
        let json = serde_json::to_value(QuizQuestionDetailResponse::from(row())).unwrap();

        assert_eq!(json["correct_answer"], "みず");
        assert_eq!(json["explanation"], "水 is read みず");
    }

    #[test]
    fn test_submit_request_accepts_string_keys() {
        let request: SubmitQuizRequest =
            serde_json::from_str(r#"{"answers": {"1": "A", "20": "みず"}}"#).unwrap();

        assert_eq!(request.answers.get(&1).map(String::as_str), Some("A"));
        assert_eq!(request.answers.get(&20).map(String::as_str), Some("みず"));
    }
}
