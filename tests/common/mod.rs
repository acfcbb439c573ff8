// tests/common/mod.rs

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use quizdom::db;
use sqlx::SqlitePool;

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> SqlitePool {
    db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// File-backed database with the production pool settings, so several
/// connections contend for the same file. Keep the `TempDir` alive.
pub async fn file_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("quizdom.db").display());
    let pool = db::connect(&url)
        .await
        .expect("Failed to open file database");
    (dir, pool)
}

pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, minute, second)
        .single()
        .expect("valid timestamp")
}

pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (username) VALUES (?) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("Failed to seed user")
}

pub async fn seed_subject(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO subjects (name, description) VALUES (?, '') RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to seed subject")
}

pub async fn seed_chapter(pool: &SqlitePool, subject_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO chapters (subject_id, title, description) VALUES (?, ?, '') RETURNING id",
    )
    .bind(subject_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .expect("Failed to seed chapter")
}

/// Inserts a quiz with one question per entry of `correct_options`.
pub async fn seed_quiz(
    pool: &SqlitePool,
    chapter_id: i64,
    title: &str,
    correct_options: &[i64],
) -> (i64, Vec<i64>) {
    let quiz_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO quizzes (chapter_id, title, date_of_quiz, time_duration, remarks)
        VALUES (?, ?, ?, 30, 'seeded')
        RETURNING id
        "#,
    )
    .bind(chapter_id)
    .bind(title)
    .bind(at(9, 0, 0))
    .fetch_one(pool)
    .await
    .expect("Failed to seed quiz");

    let mut question_ids = Vec::new();
    for (i, correct) in correct_options.iter().enumerate() {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO questions
                (quiz_id, question_text, option1, option2, option3, option4, correct_option)
            VALUES (?, ?, 'A', 'B', 'C', 'D', ?)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(format!("{} question {}", title, i + 1))
        .bind(correct)
        .fetch_one(pool)
        .await
        .expect("Failed to seed question");
        question_ids.push(id);
    }

    (quiz_id, question_ids)
}

/// Records a finished attempt directly, bypassing the attempt lifecycle.
pub async fn seed_score(pool: &SqlitePool, user_id: i64, quiz_id: i64, score: i64) {
    sqlx::query(
        r#"
        INSERT INTO scores (user_id, quiz_id, score, time_taken, date_taken, completed)
        VALUES (?, ?, ?, 60, ?, TRUE)
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(score)
    .bind(at(12, 0, 0))
    .execute(pool)
    .await
    .expect("Failed to seed score");
}

pub async fn count_scores(pool: &SqlitePool, user_id: i64, quiz_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE user_id = ? AND quiz_id = ?")
        .bind(user_id)
        .bind(quiz_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count scores")
}
