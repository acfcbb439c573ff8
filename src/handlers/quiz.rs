// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{TimeDelta, Utc};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        attempt::SubmitAttemptRequest,
        quiz::{QuizListing, SearchParams},
    },
    services::attempt::AttemptSession,
    utils::jwt::Claims,
};

fn attempt_session(pool: SqlitePool, config: &Config) -> AttemptSession {
    let ttl = TimeDelta::try_seconds(config.attempt_marker_ttl_secs).unwrap_or(TimeDelta::MAX);
    AttemptSession::new(pool, ttl)
}

/// Lists quizzes with their chapter and subject.
///
/// `search` matches quiz title, chapter title or subject name (case-insensitive).
/// Each row says whether the caller already attempted it.
pub async fn list_quizzes(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let user_id = claims.user_id()?;
    let pattern = format!("%{}%", params.normalized());

    let quizzes = sqlx::query_as::<_, QuizListing>(
        r#"
        SELECT
            qz.id,
            qz.title,
            c.title AS chapter,
            sub.name AS subject,
            qz.date_of_quiz,
            qz.time_duration,
            qz.remarks,
            (SELECT COUNT(*) FROM questions q WHERE q.quiz_id = qz.id) AS question_count,
            EXISTS (SELECT 1 FROM scores s WHERE s.quiz_id = qz.id AND s.user_id = ?) AS attempted
        FROM quizzes qz
        JOIN chapters c ON c.id = qz.chapter_id
        JOIN subjects sub ON sub.id = c.subject_id
        WHERE LOWER(qz.title) LIKE ? OR LOWER(c.title) LIKE ? OR LOWER(sub.name) LIKE ?
        ORDER BY qz.id
        "#,
    )
    .bind(user_id)
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Starts an attempt, or re-enters the one this session already started.
///
/// Returns the questions (without answers) and the start time.
pub async fn start_attempt(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let ticket = attempt_session(pool, &config)
        .start(user_id, &claims.sid, quiz_id, Utc::now())
        .await?;

    Ok(Json(ticket))
}

/// Submits the answers of a started attempt.
///
/// * Scores one point per correct option.
/// * Records elapsed time since start.
/// * Rejects a second submission with 409 Conflict.
pub async fn submit_attempt(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let result = attempt_session(pool, &config)
        .submit(user_id, &claims.sid, quiz_id, &req.answers, Utc::now())
        .await?;

    Ok(Json(result))
}

/// Reports whether the caller has not started, is taking, or completed a quiz.
pub async fn attempt_state(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let state = attempt_session(pool, &config)
        .state(user_id, &claims.sid, quiz_id)
        .await?;

    Ok(Json(state))
}
