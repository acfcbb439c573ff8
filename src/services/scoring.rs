// src/services/scoring.rs

use std::collections::HashMap;

use crate::models::question::{CorrectOption, Question};

/// Counts the questions whose submitted option matches the stored correct option.
///
/// Answers are keyed by question id. A missing answer, an identifier outside
/// 1..=4, or an answer for a question that is not part of `questions` never
/// scores. The result is always within `0..=questions.len()`.
pub fn score(questions: &[Question], answers: &HashMap<i64, String>) -> i64 {
    let mut correct_count = 0;

    for question in questions {
        let Some(raw) = answers.get(&question.id) else {
            continue;
        };

        match raw.parse::<CorrectOption>() {
            Ok(selected) if selected == question.correct_option => correct_count += 1,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(question_id = question.id, "Rejected selection: {}", e);
            }
        }
    }

    correct_count
}

/// Converts a raw score to a percentage of `question_count`.
///
/// Zero when the quiz has no questions; capped to `[0, 100]` otherwise.
pub fn percentage(score: i64, question_count: i64) -> f64 {
    if question_count <= 0 {
        return 0.0;
    }
    (score as f64 * 100.0 / question_count as f64).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct: CorrectOption) -> Question {
        Question {
            id,
            quiz_id: 1,
            question_text: format!("Question {}", id),
            option1: "A".to_string(),
            option2: "B".to_string(),
            option3: "C".to_string(),
            option4: "D".to_string(),
            correct_option: correct,
        }
    }

    fn algebra_basics() -> Vec<Question> {
        vec![
            question(1, CorrectOption::One),
            question(2, CorrectOption::Two),
            question(3, CorrectOption::Three),
            question(4, CorrectOption::Four),
        ]
    }

    #[test]
    fn test_score_all_correct() {
        let questions = algebra_basics();
        let answers: HashMap<i64, String> = (1..=4).map(|i| (i, i.to_string())).collect();

        assert_eq!(score(&questions, &answers), 4);
    }

    #[test]
    fn test_score_none_correct() {
        let questions = algebra_basics();
        let mut answers = HashMap::new();
        answers.insert(1, "2".to_string());
        answers.insert(2, "3".to_string());
        answers.insert(3, "4".to_string());
        answers.insert(4, "1".to_string());

        assert_eq!(score(&questions, &answers), 0);
    }

    #[test]
    fn test_score_invalid_and_missing_count_as_wrong() {
        let questions = algebra_basics();
        let mut answers = HashMap::new();
        answers.insert(1, "1".to_string());
        answers.insert(2, "2".to_string());
        answers.insert(3, "9".to_string()); // Outside 1..=4
        answers.insert(4, "".to_string()); // Nothing selected

        let raw = score(&questions, &answers);
        assert_eq!(raw, 2);
        assert_eq!(percentage(raw, questions.len() as i64), 50.0);
    }

    #[test]
    fn test_score_trims_whitespace() {
        let questions = algebra_basics();
        let mut answers = HashMap::new();
        answers.insert(3, "  3\n".to_string());

        assert_eq!(score(&questions, &answers), 1);
    }

    #[test]
    fn test_score_ignores_foreign_questions() {
        let questions = algebra_basics();
        let mut answers = HashMap::new();
        for i in 1..=4 {
            answers.insert(i, i.to_string());
        }
        answers.insert(99, "1".to_string());

        assert_eq!(score(&questions, &answers), 4);
    }

    #[test]
    fn test_score_empty_quiz() {
        let answers: HashMap<i64, String> = HashMap::new();
        assert_eq!(score(&[], &answers), 0);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let questions = algebra_basics();
        let inputs = ["", "0", "1", "2", "3", "4", "5", "x", " 4 "];
        for a in inputs {
            for b in inputs {
                let mut answers = HashMap::new();
                answers.insert(1, a.to_string());
                answers.insert(2, b.to_string());
                answers.insert(3, a.to_string());
                answers.insert(4, b.to_string());
                let raw = score(&questions, &answers);
                assert!((0..=4).contains(&raw), "score {} out of range", raw);
            }
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(7, 10), 70.0);
        assert_eq!(percentage(15, 10), 100.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(-1, 10), 0.0);
    }
}
