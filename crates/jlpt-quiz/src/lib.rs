//! Quiz grading for JLPT Time
//!
//! Grading is a pure function of the question bank and the submitted answers.
//! The caller is responsible for loading questions and storing the result.

mod attempt;
mod grading;
mod question;

pub use attempt::{Attempt, AttemptError, AttemptStatus};
pub use grading::{
    GradedAnswer, QuizGradeResult, SCORE_OVER_ATTEMPTED_ONLY, ScoringPolicy, grade_submission,
    grade_submission_with_policy,
};
pub use question::{QuestionType, QuizQuestion, UnknownQuestionType};
