use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jlpt_db::{
    models::{QuizQuestionRow, QuizSession, SessionCompletion, StudyActivity},
    repositories::quiz as quiz_repo,
};
use jlpt_quiz::{Attempt, AttemptStatus, QuizQuestion, grade_submission};
use sqlx::PgPool;

use super::model::{
    QuizAnswerResponse, QuizDetailResponse, QuizResponse, QuizResultResponse,
    QuizSessionResponse, StartQuizResponse,
};
use crate::{error::ApiError, metrics::record_quiz_submission, progress::record_study_activity};

fn quiz_not_found() -> ApiError {
    ApiError::NotFound("Quiz not found".to_string())
}

fn session_not_found() -> ApiError {
    ApiError::NotFound("Quiz session not found".to_string())
}

const fn attempt(session: &QuizSession) -> Attempt {
    Attempt {
        started_at: session.started_at,
        completed_at: session.completed_at,
    }
}

/// Grader view of a stored question
fn grader_question(row: &QuizQuestionRow) -> Result<QuizQuestion, ApiError> {
    let question_type = row.question_type.parse().map_err(|err| {
        ApiError::Internal(format!("question {} has {err}", row.id))
    })?;

    Ok(QuizQuestion {
        id: row.id,
        text: row.question_text.clone(),
        question_type,
        correct_answer: row.correct_answer.clone(),
        options: row.options(),
        points: row.points,
    })
}

pub async fn list_quizzes(
    pool: &PgPool,
    jlpt_level: Option<i32>,
) -> Result<Vec<QuizResponse>, ApiError> {
    let quizzes = quiz_repo::list_quizzes(pool, jlpt_level).await?;

    Ok(quizzes.into_iter().map(Into::into).collect())
}

pub async fn get_quiz(pool: &PgPool, quiz_id: i64) -> Result<QuizDetailResponse, ApiError> {
    let quiz = quiz_repo::find_quiz(pool, quiz_id)
        .await?
        .ok_or_else(quiz_not_found)?;
    let questions = quiz_repo::list_questions(pool, quiz_id).await?;

    Ok(QuizDetailResponse {
        quiz: quiz.into(),
        questions: questions.into_iter().map(Into::into).collect(),
    })
}

pub async fn start_quiz(
    pool: &PgPool,
    user_id: i64,
    quiz_id: i64,
    now: DateTime<Utc>,
) -> Result<StartQuizResponse, ApiError> {
    let quiz = quiz_repo::find_quiz(pool, quiz_id)
        .await?
        .ok_or_else(quiz_not_found)?;
    let questions = quiz_repo::list_questions(pool, quiz_id).await?;

    if questions.is_empty() {
        return Err(ApiError::BadRequest("Quiz has no questions".to_string()));
    }

    let attempt = Attempt::start(now);
    let session = quiz_repo::create_session(pool, user_id, quiz_id, attempt.started_at).await?;

    tracing::info!(user_id, quiz_id, session_id = session.id, "quiz session started");

    Ok(StartQuizResponse {
        session_id: session.id,
        quiz: quiz.into(),
        questions: questions.into_iter().map(Into::into).collect(),
        started_at: session.started_at,
    })
}

/// Grade a submission and close the session.
///
/// The session row stays locked until the answers and the score are stored, so
/// a second submission waits and then fails as already completed.
pub async fn submit_quiz(
    pool: &PgPool,
    user_id: i64,
    session_id: i64,
    answers: HashMap<i64, String>,
    now: DateTime<Utc>,
) -> Result<QuizResultResponse, ApiError> {
    if answers.is_empty() {
        return Err(ApiError::BadRequest("No answers provided".to_string()));
    }

    let mut tx = pool.begin().await?;

    let session = quiz_repo::find_session_for_update(&mut *tx, session_id)
        .await?
        .ok_or_else(session_not_found)?;

    if session.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Not authorized to submit answers for this session".to_string(),
        ));
    }

    let completed = attempt(&session).complete(now)?;

    let quiz = quiz_repo::find_quiz(&mut *tx, session.quiz_id)
        .await?
        .ok_or_else(quiz_not_found)?;
    let rows = quiz_repo::list_questions(&mut *tx, quiz.id).await?;
    let questions = rows
        .iter()
        .map(grader_question)
        .collect::<Result<Vec<_>, _>>()?;

    let result = grade_submission(&questions, &answers, quiz.passing_score);

    if !result.ignored_question_ids.is_empty() {
        tracing::warn!(
            session_id,
            ignored = ?result.ignored_question_ids,
            "ignoring answers for questions outside the quiz"
        );
    }

    for answer in &result.graded_answers {
        quiz_repo::insert_answer(
            &mut *tx,
            session.id,
            answer.question_id,
            &answer.user_answer,
            answer.is_correct,
            now,
        )
        .await?;
    }

    let time_spent = completed.time_spent_seconds().unwrap_or(0);
    let completion = SessionCompletion {
        completed_at: now,
        score: result.earned_points,
        total_points: result.total_points,
        percentage: result.percentage,
        passed: result.passed,
        time_spent_seconds: i32::try_from(time_spent).unwrap_or(i32::MAX),
    };
    let session = quiz_repo::complete_session(&mut *tx, session.id, &completion).await?;

    record_study_activity(&mut tx, user_id, StudyActivity::QuizCompleted, now).await?;

    tx.commit().await?;

    record_quiz_submission(result.passed);
    tracing::info!(
        user_id,
        session_id,
        quiz_id = quiz.id,
        score = result.earned_points,
        total_points = result.total_points,
        percentage = result.percentage,
        passed = result.passed,
        "quiz completed"
    );

    let answers = result.graded_answers.into_iter().map(Into::into).collect();

    Ok(QuizResultResponse::new(
        session,
        quiz,
        rows,
        answers,
        result.ignored_question_ids,
    ))
}

/// Result of a session the user already completed.
pub async fn get_session_result(
    pool: &PgPool,
    user_id: i64,
    session_id: i64,
) -> Result<QuizResultResponse, ApiError> {
    let session = quiz_repo::find_session(pool, session_id)
        .await?
        .ok_or_else(session_not_found)?;

    if session.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Not authorized to view this session".to_string(),
        ));
    }

    if attempt(&session).status() != AttemptStatus::Completed {
        return Err(ApiError::BadRequest(
            "Quiz session not completed yet".to_string(),
        ));
    }

    let quiz = quiz_repo::find_quiz(pool, session.quiz_id)
        .await?
        .ok_or_else(quiz_not_found)?;
    let questions = quiz_repo::list_questions(pool, quiz.id).await?;
    let answers: Vec<QuizAnswerResponse> = quiz_repo::list_session_answers(pool, session.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(QuizResultResponse::new(session, quiz, questions, answers, Vec::new()))
}

pub async fn get_history(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<QuizSessionResponse>, ApiError> {
    let sessions = quiz_repo::list_user_sessions(pool, user_id).await?;

    Ok(sessions.into_iter().map(Into::into).collect())
}
