use std::collections::HashMap;

use serde::Serialize;

use crate::QuizQuestion;

/// Score only the questions that received an answer.
///
/// With this policy a learner who answers a single question correctly and
/// skips the rest scores 100%. Flip to `false` to count every question.
pub const SCORE_OVER_ATTEMPTED_ONLY: bool = true;

/// Which questions count towards the points total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Only answered questions add to the total
    AttemptedOnly,
    /// Every question in the bank adds to the total
    AllQuestions,
}

impl ScoringPolicy {
    /// The policy selected by [`SCORE_OVER_ATTEMPTED_ONLY`].
    pub const fn current() -> Self {
        if SCORE_OVER_ATTEMPTED_ONLY {
            Self::AttemptedOnly
        } else {
            Self::AllQuestions
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::current()
    }
}

/// One submitted answer after grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedAnswer {
    /// Question the answer belongs to
    pub question_id: i64,
    /// Answer exactly as submitted
    pub user_answer: String,
    /// Whether it matched the expected answer
    pub is_correct: bool,
}

/// Outcome of grading a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizGradeResult {
    /// Points of correctly answered questions
    pub earned_points: i32,
    /// Points available under the scoring policy
    pub total_points: i32,
    /// `earned / total * 100`, not rounded; 0 when nothing was scored
    pub percentage: f64,
    /// `percentage >= passing_score`
    pub passed: bool,
    /// In question bank order
    pub graded_answers: Vec<GradedAnswer>,
    /// Submitted ids that are not part of the quiz, ascending
    pub ignored_question_ids: Vec<i64>,
}

/// Grade a submission using the default [`ScoringPolicy`].
///
/// # Arguments
///
/// * `questions` - The quiz's question bank
/// * `answers` - Submitted answers keyed by question id
/// * `passing_score_percent` - Minimum percentage needed to pass
///
/// # Returns
///
/// The [`QuizGradeResult`]. Answers are compared with exact, case-sensitive
/// string equality.
pub fn grade_submission(
    questions: &[QuizQuestion],
    answers: &HashMap<i64, String>,
    passing_score_percent: i32,
) -> QuizGradeResult {
    grade_submission_with_policy(questions, answers, passing_score_percent, ScoringPolicy::current())
}

/// Grade a submission with an explicit [`ScoringPolicy`].
pub fn grade_submission_with_policy(
    questions: &[QuizQuestion],
    answers: &HashMap<i64, String>,
    passing_score_percent: i32,
    policy: ScoringPolicy,
) -> QuizGradeResult {
    let mut earned_points = 0;
    let mut total_points = 0;
    let mut graded_answers = Vec::with_capacity(answers.len());

    for question in questions {
        let Some(user_answer) = answers.get(&question.id) else {
            if policy == ScoringPolicy::AllQuestions {
                total_points += question.points;
            }
            continue;
        };

        let is_correct = *user_answer == question.correct_answer;
        if is_correct {
            earned_points += question.points;
        }
        total_points += question.points;

        graded_answers.push(GradedAnswer {
            question_id: question.id,
            user_answer: user_answer.clone(),
            is_correct,
        });
    }

    let mut ignored_question_ids: Vec<i64> = answers
        .keys()
        .filter(|id| !questions.iter().any(|question| question.id == **id))
        .copied()
        .collect();
    ignored_question_ids.sort_unstable();

    let percentage = if total_points > 0 {
        f64::from(earned_points) / f64::from(total_points) * 100.0
    } else {
        0.0
    };

    QuizGradeResult {
        earned_points,
        total_points,
        percentage,
        passed: percentage >= f64::from(passing_score_percent),
        graded_answers,
        ignored_question_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionType;

    fn question(id: i64, correct_answer: &str, points: i32) -> QuizQuestion {
        QuizQuestion {
            id,
            text: format!("Question {id}"),
            question_type: QuestionType::MultipleChoice,
            correct_answer: correct_answer.to_owned(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            points,
        }
    }

    fn bank() -> Vec<QuizQuestion> {
        vec![question(1, "A", 1), question(2, "B", 2)]
    }

    fn answers(pairs: &[(i64, &str)]) -> HashMap<i64, String> {
        pairs.iter().map(|(id, answer)| (*id, (*answer).to_owned())).collect()
    }

    #[test]
    fn test_partial_credit_fails() {
        let result = grade_submission(&bank(), &answers(&[(1, "A"), (2, "C")]), 50);

        assert_eq!(result.earned_points, 1);
        assert_eq!(result.total_points, 3);
        assert!((result.percentage - 33.333_333).abs() < 1e-3);
        assert!(!result.passed);
        assert_eq!(
            result.graded_answers,
            vec![
                GradedAnswer { question_id: 1, user_answer: "A".into(), is_correct: true },
                GradedAnswer { question_id: 2, user_answer: "C".into(), is_correct: false },
            ]
        );
    }

    #[test]
    fn test_all_correct_passes() {
        let result = grade_submission(&bank(), &answers(&[(1, "A"), (2, "B")]), 70);

        assert_eq!(result.earned_points, 3);
        assert_eq!(result.total_points, 3);
        assert_eq!(result.percentage, 100.0);
        assert!(result.passed);
        assert!(result.ignored_question_ids.is_empty());
    }

    #[test]
    fn test_passing_score_is_inclusive() {
        let questions = vec![question(1, "A", 1), question(2, "B", 1)];
        let result = grade_submission(&questions, &answers(&[(1, "A"), (2, "D")]), 50);

        assert_eq!(result.percentage, 50.0);
        assert!(result.passed);
    }

    #[test]
    fn test_unknown_question_ids_are_ignored() {
        let result = grade_submission(&bank(), &answers(&[(1, "A"), (99, "A"), (42, "B")]), 50);

        assert_eq!(result.earned_points, 1);
        assert_eq!(result.total_points, 1);
        assert_eq!(result.graded_answers.len(), 1);
        assert_eq!(result.ignored_question_ids, vec![42, 99]);
    }

    #[test]
    fn test_unanswered_questions_excluded_by_default() {
        let result = grade_submission(&bank(), &answers(&[(2, "B")]), 80);

        assert_eq!(result.earned_points, 2);
        assert_eq!(result.total_points, 2);
        assert_eq!(result.percentage, 100.0);
        assert!(result.passed);
    }

    #[test]
    fn test_all_questions_policy_counts_skipped() {
        let result = grade_submission_with_policy(
            &bank(),
            &answers(&[(2, "B")]),
            80,
            ScoringPolicy::AllQuestions,
        );

        assert_eq!(result.earned_points, 2);
        assert_eq!(result.total_points, 3);
        assert!(!result.passed);
        assert_eq!(result.graded_answers.len(), 1);
    }

    #[test]
    fn test_empty_submission() {
        let result = grade_submission(&bank(), &HashMap::new(), 0);

        assert_eq!(result.total_points, 0);
        assert_eq!(result.percentage, 0.0);
        // 0 >= 0
        assert!(result.passed);

        let result = grade_submission(&bank(), &HashMap::new(), 60);
        assert!(!result.passed);
    }

    #[test]
    fn test_comparison_is_exact() {
        let questions = vec![question(1, "たべる", 1), question(2, "Apple", 1)];
        let result = grade_submission(&questions, &answers(&[(1, "たべる "), (2, "apple")]), 50);

        assert_eq!(result.earned_points, 0);
        assert!(result.graded_answers.iter().all(|answer| !answer.is_correct));
    }

    #[test]
    fn test_graded_answers_follow_bank_order() {
        let questions = vec![question(30, "A", 1), question(10, "B", 1), question(20, "C", 1)];
        let result = grade_submission(&questions, &answers(&[(10, "B"), (20, "A"), (30, "A")]), 50);

        let order: Vec<i64> = result.graded_answers.iter().map(|a| a.question_id).collect();
        assert_eq!(order, vec![30, 10, 20]);
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(ScoringPolicy::default(), ScoringPolicy::AttemptedOnly);
    }
}
