//! crates/quiz_engine_core/src/scoring.rs
//!
//! Aggregates per-question correctness into a score summary.

use std::collections::BTreeMap;

use crate::domain::{Question, Selection};
use crate::validator::is_correct;

/// Minimum percentage needed to pass an attempt.
pub const PASS_THRESHOLD: u32 = 70;

/// Outcome of a single question, in session order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub index: usize,
    pub selected: Selection,
    pub correct_option_ids: Selection,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total: usize,
    /// Rounded half-up; 0 when there are no questions.
    pub percentage: u32,
    pub passed: bool,
    pub per_question: Vec<QuestionResult>,
}

/// Scores `answers` (question index to selection) against `questions`.
///
/// Missing answers count as empty selections. Pure and deterministic.
pub fn score(answers: &BTreeMap<usize, Selection>, questions: &[Question]) -> ScoreSummary {
    let per_question: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(&index).cloned().unwrap_or_default();
            QuestionResult {
                index,
                is_correct: is_correct(&selected, question),
                correct_option_ids: question.correct_option_ids(),
                selected,
            }
        })
        .collect();

    let correct_count = per_question.iter().filter(|r| r.is_correct).count();
    let total = questions.len();
    let percentage = rounded_percentage(correct_count, total);

    ScoreSummary {
        correct_count,
        total,
        percentage,
        passed: percentage >= PASS_THRESHOLD,
        per_question,
    }
}

fn rounded_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // round(correct / total * 100) with halves rounded up, in integers.
    let (correct, total) = (correct as u64, total as u64);
    ((correct * 200 + total) / (total * 2)) as u32
}
