use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Pick one of up to four options
    MultipleChoice,
    /// Type the missing word
    FillInBlank,
}

/// Stored question type that is neither `multiple_choice` nor `fill_in_blank`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown question type: {0}")]
pub struct UnknownQuestionType(pub String);

impl QuestionType {
    /// Name as stored in the database and sent over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillInBlank => "fill_in_blank",
        }
    }
}

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(Self::MultipleChoice),
            "fill_in_blank" => Ok(Self::FillInBlank),
            other => Err(UnknownQuestionType(other.to_owned())),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question as seen by the grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question id, the key of the submitted answer map
    pub id: i64,
    /// Prompt shown to the learner
    pub text: String,
    /// How the answer is entered
    pub question_type: QuestionType,
    /// Expected answer, compared exactly
    pub correct_answer: String,
    /// Up to four choices, empty for fill-in-the-blank questions
    pub options: Vec<String>,
    /// Points awarded for a correct answer
    pub points: i32,
}
