// src/services/analytics.rs

use std::collections::HashMap;

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::QuizError,
    models::summary::{ChartSeries, SubjectSummary},
    services::scoring,
};

/// Which score records feed an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    User(i64),
}

/// A score record resolved to its subject, carrying the question count of
/// the quiz that produced it.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectAttempt {
    pub subject: String,
    pub score: i64,
    pub question_count: i64,
}

/// Loads the score records in `scope`, in insertion order.
pub async fn load_subject_attempts(
    pool: &SqlitePool,
    scope: Scope,
) -> Result<Vec<SubjectAttempt>, QuizError> {
    let mut query_builder = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT
            sub.name AS subject,
            s.score,
            (SELECT COUNT(*) FROM questions q WHERE q.quiz_id = s.quiz_id) AS question_count
        FROM scores s
        JOIN quizzes qz ON qz.id = s.quiz_id
        JOIN chapters c ON c.id = qz.chapter_id
        JOIN subjects sub ON sub.id = c.subject_id
        "#,
    );

    if let Scope::User(user_id) = scope {
        query_builder.push(" WHERE s.user_id = ").push_bind(user_id);
    }
    query_builder.push(" ORDER BY s.id");

    let rows = query_builder
        .build_query_as::<SubjectAttempt>()
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load subject attempts: {:?}", e);
            QuizError::Persistence(e)
        })?;

    Ok(rows)
}

/// Highest raw score per subject, as a percentage of its own quiz's length.
///
/// Ties on the raw score keep whichever record gives the higher percentage.
pub fn top_scores(records: &[SubjectAttempt]) -> ChartSeries<f64> {
    let mut best: Vec<(&str, i64, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let pct = scoring::percentage(record.score, record.question_count);
        match index.get(record.subject.as_str()) {
            Some(&idx) => {
                let (_, top, top_pct) = &mut best[idx];
                if record.score > *top || (record.score == *top && pct > *top_pct) {
                    *top = record.score;
                    *top_pct = pct;
                }
            }
            None => {
                index.insert(record.subject.as_str(), best.len());
                best.push((record.subject.as_str(), record.score, pct));
            }
        }
    }

    let mut series = ChartSeries::default();
    for (subject, _, pct) in best {
        series.push(subject, pct);
    }
    series
}

/// Number of score records per subject, in order of first encounter.
pub fn attempt_counts(records: &[SubjectAttempt]) -> ChartSeries<i64> {
    let mut series: ChartSeries<i64> = ChartSeries::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.subject.as_str()) {
            Some(&idx) => series.values[idx] += 1,
            None => {
                index.insert(record.subject.as_str(), series.len());
                series.push(record.subject.as_str(), 1);
            }
        }
    }
    series
}

pub async fn top_scores_by_subject(
    pool: &SqlitePool,
    scope: Scope,
) -> Result<ChartSeries<f64>, QuizError> {
    let records = load_subject_attempts(pool, scope).await?;
    Ok(top_scores(&records))
}

pub async fn attempt_counts_by_subject(
    pool: &SqlitePool,
    scope: Scope,
) -> Result<ChartSeries<i64>, QuizError> {
    let records = load_subject_attempts(pool, scope).await?;
    Ok(attempt_counts(&records))
}

/// Dashboard summary from a single read: top scores for a bar chart and
/// attempt counts trimmed for a pie chart.
pub async fn summarize(pool: &SqlitePool, scope: Scope) -> Result<SubjectSummary, QuizError> {
    let records = load_subject_attempts(pool, scope).await?;
    tracing::debug!(?scope, records = records.len(), "Summarizing attempts");

    Ok(SubjectSummary {
        top_scores: top_scores(&records),
        attempts: attempt_counts(&records).proportional(),
    })
}
