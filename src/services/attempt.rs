// src/services/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    error::QuizError,
    models::{
        attempt::{AttemptMarker, AttemptResult, AttemptTicket},
        question::{PublicQuestion, Question},
        quiz::Quiz,
        score::Score,
    },
    services::scoring,
};

/// Where a (user, quiz) pair stands, as seen from one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AttemptState {
    NotStarted,
    InProgress { started_at: DateTime<Utc> },
    Completed { score_id: i64 },
}

/// Runs the start → submit lifecycle of quiz attempts.
///
/// The start marker lives in `quiz_attempts`, keyed by (user, quiz) and owned
/// by the session that created it. The one-score-per-(user, quiz) rule is
/// enforced by the unique constraint on `scores`, never by a prior read alone.
#[derive(Debug, Clone)]
pub struct AttemptSession {
    pool: SqlitePool,
    marker_ttl: TimeDelta,
}

impl AttemptSession {
    /// `marker_ttl` is how long a marker owned by another session blocks a new start.
    pub fn new(pool: SqlitePool, marker_ttl: TimeDelta) -> Self {
        Self { pool, marker_ttl }
    }

    /// Starts (or re-enters) an attempt.
    ///
    /// * Fails with `AlreadyAttempted` if a score exists or another live session holds the attempt.
    /// * Re-entry from the owning session keeps the original start time.
    pub async fn start(
        &self,
        user_id: i64,
        session_id: &str,
        quiz_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AttemptTicket, QuizError> {
        let quiz = fetch_quiz(&self.pool, quiz_id).await?;
        let (started_at, resumed) = self.claim_marker(user_id, session_id, quiz_id, now).await?;

        let questions = fetch_questions(&self.pool, quiz_id).await?;

        if resumed {
            tracing::debug!(user_id, quiz_id, "Attempt resumed");
        } else {
            tracing::info!(user_id, quiz_id, "Attempt started");
        }

        Ok(AttemptTicket {
            quiz_id: quiz.id,
            title: quiz.title,
            duration_minutes: quiz.time_duration,
            started_at,
            resumed,
            questions: questions.into_iter().map(PublicQuestion::from).collect(),
        })
    }

    /// Scores and records an attempt started by this session.
    ///
    /// Runs in one write transaction: on any failure the marker survives and
    /// the caller may retry; the unique constraint still rejects a second score.
    /// An unknown quiz is `NotFound`.
    pub async fn submit(
        &self,
        user_id: i64,
        session_id: &str,
        quiz_id: i64,
        answers: &HashMap<i64, String>,
        now: DateTime<Utc>,
    ) -> Result<AttemptResult, QuizError> {
        // Take the write lock up front: concurrent submits queue on the busy
        // timeout and then observe the committed score.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let marker = fetch_marker(&mut *tx, user_id, quiz_id).await?;
        let started_at = match marker {
            Some(m) if m.session_id == session_id => m.started_at,
            _ => {
                fetch_quiz(&mut *tx, quiz_id).await?;
                let completed = find_score_id(&mut *tx, user_id, quiz_id).await?.is_some();
                return Err(if completed {
                    QuizError::AlreadyAttempted
                } else {
                    QuizError::NotStarted
                });
            }
        };

        let questions = fetch_questions(&mut *tx, quiz_id).await?;
        let total_questions = questions.len() as i64;
        let raw_score = scoring::score(&questions, answers);
        let time_taken = (now - started_at).num_seconds().max(0);

        let record = sqlx::query_as::<_, Score>(
            r#"
            INSERT INTO scores (user_id, quiz_id, score, time_taken, date_taken, completed)
            VALUES (?, ?, ?, ?, ?, TRUE)
            RETURNING id, user_id, quiz_id, score, time_taken, date_taken, completed
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(raw_score)
        .bind(time_taken)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                QuizError::AlreadyAttempted
            } else {
                tracing::error!("Failed to insert score: {:?}", e);
                QuizError::Persistence(e)
            }
        })?;

        sqlx::query("DELETE FROM quiz_attempts WHERE user_id = ? AND quiz_id = ?")
            .bind(user_id)
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            quiz_id,
            score = raw_score,
            total_questions,
            time_taken,
            "Attempt submitted"
        );

        Ok(AttemptResult {
            percentage: scoring::percentage(record.score, total_questions),
            record,
            total_questions,
        })
    }

    /// Reports the attempt state for this session.
    pub async fn state(
        &self,
        user_id: i64,
        session_id: &str,
        quiz_id: i64,
    ) -> Result<AttemptState, QuizError> {
        if let Some(score_id) = find_score_id(&self.pool, user_id, quiz_id).await? {
            return Ok(AttemptState::Completed { score_id });
        }

        match fetch_marker(&self.pool, user_id, quiz_id).await? {
            Some(m) if m.session_id == session_id => Ok(AttemptState::InProgress {
                started_at: m.started_at,
            }),
            _ => Ok(AttemptState::NotStarted),
        }
    }

    /// Inserts the start marker, or explains why it cannot.
    /// Returns the effective start time and whether this was a re-entry.
    async fn claim_marker(
        &self,
        user_id: i64,
        session_id: &str,
        quiz_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, bool), QuizError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO quiz_attempts (user_id, quiz_id, session_id, started_at)
            SELECT ?, ?, ?, ?
            WHERE NOT EXISTS (SELECT 1 FROM scores WHERE user_id = ? AND quiz_id = ?)
            ON CONFLICT (user_id, quiz_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(session_id)
        .bind(now)
        .bind(user_id)
        .bind(quiz_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 1 {
            return Ok((now, false));
        }

        if find_score_id(&self.pool, user_id, quiz_id).await?.is_some() {
            return Err(QuizError::AlreadyAttempted);
        }

        match fetch_marker(&self.pool, user_id, quiz_id).await? {
            Some(m) if m.session_id == session_id => Ok((m.started_at, true)),
            Some(m) if now - m.started_at >= self.marker_ttl => {
                // Compare-and-swap on the stale owner; a concurrent takeover wins once.
                let taken = sqlx::query(
                    r#"
                    UPDATE quiz_attempts
                    SET session_id = ?, started_at = ?
                    WHERE user_id = ? AND quiz_id = ? AND session_id = ?
                    "#,
                )
                .bind(session_id)
                .bind(now)
                .bind(user_id)
                .bind(quiz_id)
                .bind(&m.session_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

                if taken == 1 {
                    tracing::info!(user_id, quiz_id, "Took over abandoned attempt marker");
                    Ok((now, false))
                } else {
                    Err(QuizError::AlreadyAttempted)
                }
            }
            // Held by another live session, or completed since the insert.
            _ => Err(QuizError::AlreadyAttempted),
        }
    }
}

async fn fetch_quiz<'e, E>(executor: E, quiz_id: i64) -> Result<Quiz, QuizError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, chapter_id, title, date_of_quiz, time_duration, remarks
        FROM quizzes
        WHERE id = ?
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| QuizError::NotFound("Quiz".to_string()))
}

async fn fetch_questions<'e, E>(executor: E, quiz_id: i64) -> Result<Vec<Question>, QuizError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, question_text, option1, option2, option3, option4, correct_option
        FROM questions
        WHERE quiz_id = ?
        ORDER BY id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(executor)
    .await?;

    Ok(questions)
}

async fn fetch_marker<'e, E>(
    executor: E,
    user_id: i64,
    quiz_id: i64,
) -> Result<Option<AttemptMarker>, QuizError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let marker = sqlx::query_as::<_, AttemptMarker>(
        r#"
        SELECT user_id, quiz_id, session_id, started_at
        FROM quiz_attempts
        WHERE user_id = ? AND quiz_id = ?
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(executor)
    .await?;

    Ok(marker)
}

async fn find_score_id<'e, E>(
    executor: E,
    user_id: i64,
    quiz_id: i64,
) -> Result<Option<i64>, QuizError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM scores WHERE user_id = ? AND quiz_id = ?")
        .bind(user_id)
        .bind(quiz_id)
        .fetch_optional(executor)
        .await?;

    Ok(id)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
