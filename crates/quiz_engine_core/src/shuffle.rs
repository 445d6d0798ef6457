//! crates/quiz_engine_core/src/shuffle.rs
//!
//! Randomized orderings of questions and options.

use rand::Rng;

use crate::domain::{Mode, Question};

/// Returns a uniformly random permutation of `items` without touching the input.
///
/// Reverse Fisher–Yates: for `i` from `len - 1` down to `1`, pick `j` in `[0, i]`
/// and swap. Every one of the `n!` orderings is equally likely.
pub fn shuffle<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Prepares an assignment's questions for a session in the given mode.
///
/// `Learn` and `TestSequential` keep the authored order. `TestRandomized` shuffles
/// the question order and then, independently, each question's options.
pub fn prepare_for_mode<R>(questions: &[Question], mode: Mode, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    match mode {
        Mode::Learn | Mode::TestSequential => questions.to_vec(),
        Mode::TestRandomized => shuffle(questions, rng)
            .into_iter()
            .map(|mut q| {
                q.options = shuffle(&q.options, rng);
                q
            })
            .collect(),
    }
}
