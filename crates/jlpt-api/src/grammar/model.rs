use chrono::{DateTime, Utc};
use jlpt_db::models::{GrammarExample, GrammarLesson, GrammarLessonSummary, GrammarProgress};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GrammarLessonListItem {
    pub id: i64,
    pub title: String,
    pub grammar_point: String,
    pub jlpt_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_order: Option<i32>,
    pub completed: bool,
}

impl From<GrammarLessonSummary> for GrammarLessonListItem {
    fn from(summary: GrammarLessonSummary) -> Self {
        let lesson = summary.lesson;
        Self {
            id: lesson.id,
            title: lesson.title,
            grammar_point: lesson.grammar_point,
            jlpt_level: lesson.jlpt_level,
            lesson_order: lesson.lesson_order,
            completed: summary.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GrammarExampleResponse {
    pub id: i64,
    pub japanese_sentence: String,
    pub english_translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<GrammarExample> for GrammarExampleResponse {
    fn from(example: GrammarExample) -> Self {
        Self {
            id: example.id,
            japanese_sentence: example.japanese_sentence,
            english_translation: example.english_translation,
            notes: example.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GrammarProgressResponse {
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<GrammarProgress> for GrammarProgressResponse {
    fn from(progress: GrammarProgress) -> Self {
        Self {
            completed: progress.completed,
            completed_at: progress.completed_at,
            notes: progress.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GrammarLessonResponse {
    pub id: i64,
    pub title: String,
    pub grammar_point: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_notes: Option<String>,
    pub jlpt_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_order: Option<i32>,
    pub examples: Vec<GrammarExampleResponse>,
    pub progress: Option<GrammarProgressResponse>,
}

impl GrammarLessonResponse {
    pub fn new(
        lesson: GrammarLesson,
        examples: Vec<GrammarExample>,
        progress: Option<GrammarProgress>,
    ) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            grammar_point: lesson.grammar_point,
            explanation: lesson.explanation,
            usage_notes: lesson.usage_notes,
            jlpt_level: lesson.jlpt_level,
            lesson_order: lesson.lesson_order,
            examples: examples.into_iter().map(Into::into).collect(),
            progress: progress.map(Into::into),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkCompletedRequest {
    pub notes: Option<String>,
}
