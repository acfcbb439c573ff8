// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database.
/// One row per completed attempt; never updated after insertion.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub score: i64,
    /// Elapsed seconds between start and submission.
    pub time_taken: i64,
    pub date_taken: chrono::DateTime<chrono::Utc>,
    pub completed: bool,
}

/// A score joined with its quiz, chapter and subject, as listed on the scorecard.
#[derive(Debug, Clone, FromRow)]
pub struct ScorecardRow {
    pub score_id: i64,
    pub quiz_title: String,
    pub subject: String,
    pub chapter: String,
    pub score: i64,
    pub total_questions: i64,
    pub date_taken: chrono::DateTime<chrono::Utc>,
    pub time_taken: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardEntry {
    pub score_id: i64,
    pub quiz_title: String,
    pub subject: String,
    pub chapter: String,
    pub score: i64,
    pub total_questions: i64,
    /// Whole-number percentage, truncated.
    pub percentage: i64,
    pub date_taken: chrono::DateTime<chrono::Utc>,
    pub time_taken: i64,
}
