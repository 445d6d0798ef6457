//! crates/quiz_engine_core/src/validator.rs
//!
//! Decides whether a selection answers a question correctly.

use crate::domain::{Question, Selection};

/// True iff `selected` is exactly the question's set of correct option ids.
///
/// Single- and multi-answer questions use the same rule. An empty selection is
/// never correct, so a question without any correct option can never be satisfied.
pub fn is_correct(selected: &Selection, question: &Question) -> bool {
    if selected.is_empty() {
        return false;
    }
    *selected == question.correct_option_ids()
}
