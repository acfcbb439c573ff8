// src/models/question.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// One of the four answer slots of a question.
///
/// Stored as the integer 1..=4. Submitted answers are parsed into this type,
/// so anything outside the set never reaches the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum CorrectOption {
    One,
    Two,
    Three,
    Four,
}

/// Error for option identifiers outside 1..=4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOption(pub String);

impl fmt::Display for InvalidOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid option identifier '{}'", self.0)
    }
}

impl std::error::Error for InvalidOption {}

impl TryFrom<i64> for CorrectOption {
    type Error = InvalidOption;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CorrectOption::One),
            2 => Ok(CorrectOption::Two),
            3 => Ok(CorrectOption::Three),
            4 => Ok(CorrectOption::Four),
            other => Err(InvalidOption(other.to_string())),
        }
    }
}

impl From<CorrectOption> for i64 {
    fn from(option: CorrectOption) -> Self {
        match option {
            CorrectOption::One => 1,
            CorrectOption::Two => 2,
            CorrectOption::Three => 3,
            CorrectOption::Four => 4,
        }
    }
}

impl FromStr for CorrectOption {
    type Err = InvalidOption;

    /// Parses a submitted identifier, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_err(|_| InvalidOption(trimmed.to_string()))
            .and_then(CorrectOption::try_from)
    }
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,

    /// The index of the correct option.
    #[sqlx(try_from = "i64")]
    pub correct_option: CorrectOption,
}

/// DTO for sending a question to the quiz taker (excludes the correct option).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub options: [String; 4],
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            options: [q.option1, q.option2, q.option3, q.option4],
        }
    }
}
