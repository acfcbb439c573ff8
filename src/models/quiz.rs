// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub chapter_id: i64,
    pub title: String,
    pub date_of_quiz: Option<chrono::DateTime<chrono::Utc>>,

    /// Allotted time in minutes. Informational only; the timer is shown by the client.
    pub time_duration: i64,

    pub remarks: String,
}

/// Catalogue row: a quiz joined with its chapter and subject.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizListing {
    pub id: i64,
    pub title: String,
    pub chapter: String,
    pub subject: String,
    pub date_of_quiz: Option<chrono::DateTime<chrono::Utc>>,
    pub time_duration: i64,
    pub remarks: String,
    pub question_count: i64,

    /// Whether the calling user already has a score for this quiz.
    pub attempted: bool,
}

/// Query parameters shared by the searchable listings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(max = 100, message = "Search query must be at most 100 characters."))]
    pub search: Option<String>,
}

impl SearchParams {
    /// Lower-cased, trimmed query; empty when absent.
    pub fn normalized(&self) -> String {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }
}
