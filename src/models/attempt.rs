// src/models/attempt.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{question::PublicQuestion, score::Score};

/// Represents the 'quiz_attempts' table: the start marker of an attempt in progress.
#[derive(Debug, Clone, FromRow)]
pub struct AttemptMarker {
    pub user_id: i64,
    pub quiz_id: i64,
    pub session_id: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Returned by a successful start.
#[derive(Debug, Serialize)]
pub struct AttemptTicket {
    pub quiz_id: i64,
    pub title: String,
    pub duration_minutes: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// True when the caller re-entered an attempt its session had already started.
    pub resumed: bool,
    pub questions: Vec<PublicQuestion>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    /// User's answers map.
    /// Key: Question ID (i64)
    /// Value: selected option identifier ("1".."4")
    #[serde(default)]
    pub answers: HashMap<i64, String>,
}

/// Result of a successful submission.
#[derive(Debug, Serialize)]
pub struct AttemptResult {
    #[serde(flatten)]
    pub record: Score,
    pub total_questions: i64,
    pub percentage: f64,
}
