// src/services/scorecard.rs

use sqlx::SqlitePool;

use crate::{
    error::QuizError,
    models::score::{ScorecardEntry, ScorecardRow},
    services::scoring,
};

/// Lists a user's completed attempts with their percentages, filtered by `search`.
pub async fn scorecard(
    pool: &SqlitePool,
    user_id: i64,
    search: &str,
) -> Result<Vec<ScorecardEntry>, QuizError> {
    let rows = sqlx::query_as::<_, ScorecardRow>(
        r#"
        SELECT
            s.id AS score_id,
            qz.title AS quiz_title,
            sub.name AS subject,
            c.title AS chapter,
            s.score,
            (SELECT COUNT(*) FROM questions q WHERE q.quiz_id = s.quiz_id) AS total_questions,
            s.date_taken,
            s.time_taken
        FROM scores s
        JOIN quizzes qz ON qz.id = s.quiz_id
        JOIN chapters c ON c.id = qz.chapter_id
        JOIN subjects sub ON sub.id = c.subject_id
        WHERE s.user_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let entries = rows.into_iter().map(to_entry).collect::<Vec<_>>();
    Ok(filter_entries(entries, search))
}

fn to_entry(row: ScorecardRow) -> ScorecardEntry {
    let percentage = scoring::percentage(row.score, row.total_questions).trunc() as i64;
    ScorecardEntry {
        score_id: row.score_id,
        quiz_title: row.quiz_title,
        subject: row.subject,
        chapter: row.chapter,
        score: row.score,
        total_questions: row.total_questions,
        percentage,
        date_taken: row.date_taken,
        time_taken: row.time_taken,
    }
}

/// Keeps entries matching `search` (already lower-cased).
///
/// Text matches subject, chapter, quiz title, raw score or question count.
/// A query like `"80%"` that matches none of those selects by exact percentage.
pub fn filter_entries(entries: Vec<ScorecardEntry>, search: &str) -> Vec<ScorecardEntry> {
    if search.is_empty() {
        return entries;
    }

    let wanted_percentage = search
        .strip_suffix('%')
        .and_then(|n| n.trim().parse::<i64>().ok());

    entries
        .into_iter()
        .filter(|entry| {
            let text_match = entry.subject.to_lowercase().contains(search)
                || entry.chapter.to_lowercase().contains(search)
                || entry.quiz_title.to_lowercase().contains(search)
                || entry.score.to_string().contains(search)
                || entry.total_questions.to_string().contains(search);

            text_match || wanted_percentage == Some(entry.percentage)
        })
        .collect()
}
