//! crates/quiz_engine_core/src/session.rs
//!
//! The quiz session state machine.
//!
//! A session is `InProgress(current_index)` while `current_index < total` and
//! `Complete` once the index has moved past the last question. It is owned by a
//! single caller and mutated only through the operations below; none of them
//! block or perform I/O.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Mode, Question, Selection};
use crate::ports::Clock;
use crate::scoring::{score, ScoreSummary};
use crate::shuffle::prepare_for_mode;

/// Operations that are not valid in the session's current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session {0} is already complete")]
    Completed(Uuid),
    #[error("question index {index} is outside the session ({total} questions)")]
    IndexOutOfRange { index: usize, total: usize },
}

/// What a call to [`QuizSession::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Test mode: the answer was revealed, the index did not move.
    FeedbackRevealed,
    Moved { to: usize },
    Completed,
}

/// One quiz attempt.
pub struct QuizSession {
    id: Uuid,
    assignment_id: String,
    mode: Mode,
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, Selection>,
    feedback_visible: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

/// An owned view of a session for whoever renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub assignment_id: String,
    pub mode: Mode,
    pub current_index: usize,
    pub total: usize,
    pub current_question: Option<Question>,
    pub current_selection: Option<Selection>,
    pub answered_count: usize,
    pub feedback_visible: bool,
    pub can_advance: bool,
    pub is_complete: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub elapsed: Duration,
}

impl QuizSession {
    /// Creates a session over questions that are already prepared for `mode`.
    ///
    /// `questions` must not be empty; filtering out empty assignments is the
    /// caller's job.
    pub fn new(
        assignment_id: impl Into<String>,
        mode: Mode,
        questions: Vec<Question>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let assignment_id = assignment_id.into();
        if questions.is_empty() {
            warn!(%assignment_id, "Creating a quiz session without questions.");
        }
        let started_at = clock.now();
        let session = Self {
            id: Uuid::new_v4(),
            assignment_id,
            mode,
            questions,
            current_index: 0,
            answers: BTreeMap::new(),
            feedback_visible: mode.feedback_on_entry(),
            started_at,
            completed_at: None,
            clock,
        };
        debug!(
            session_id = %session.id,
            assignment_id = %session.assignment_id,
            %mode,
            total = session.questions.len(),
            "Quiz session started."
        );
        session
    }

    /// Prepares `source` for `mode` (shuffling for `TestRandomized`) and starts a session.
    pub fn begin<R>(
        assignment_id: impl Into<String>,
        mode: Mode,
        source: &[Question],
        clock: Arc<dyn Clock>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(assignment_id, mode, prepare_for_mode(source, mode, rng), clock)
    }

    // --- Queries ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn assignment_id(&self) -> &str {
        &self.assignment_id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &BTreeMap<usize, Selection> {
        &self.answers
    }

    pub fn feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// The question being shown, or `None` once the session is complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn selection_for(&self, index: usize) -> Option<&Selection> {
        self.answers.get(&index)
    }

    /// Questions with a non-empty recorded answer.
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|s| !s.is_empty()).count()
    }

    /// 1-based position and total, for "question x of y".
    pub fn progress(&self) -> (usize, usize) {
        let total = self.total();
        ((self.current_index + 1).min(total), total)
    }

    /// Whether a "next" action should be offered. Advisory; `advance` does not check it.
    pub fn can_advance(&self) -> bool {
        self.mode == Mode::Learn || self.has_answer(self.current_index)
    }

    /// Time since the start, frozen at completion.
    pub fn elapsed_time(&self) -> Duration {
        self.completed_at.unwrap_or_else(|| self.clock.now()) - self.started_at
    }

    /// Scores the answers recorded so far.
    pub fn score(&self) -> ScoreSummary {
        score(&self.answers, &self.questions)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            assignment_id: self.assignment_id.clone(),
            mode: self.mode,
            current_index: self.current_index,
            total: self.total(),
            current_question: self.current_question().cloned(),
            current_selection: self.selection_for(self.current_index).cloned(),
            answered_count: self.answered_count(),
            feedback_visible: self.feedback_visible,
            can_advance: self.can_advance(),
            is_complete: self.is_complete(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            elapsed: self.elapsed_time(),
        }
    }

    // --- Transitions ---

    /// Stores `selected` against question `index`. Does not reveal or move.
    ///
    /// An empty selection clears the answer.
    pub fn record_answer(&mut self, index: usize, selected: Selection) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if index >= self.total() {
            return Err(SessionError::IndexOutOfRange {
                index,
                total: self.total(),
            });
        }
        debug!(session_id = %self.id, index, selected = ?selected, "Answer recorded.");
        if selected.is_empty() {
            self.answers.remove(&index);
        } else {
            self.answers.insert(index, selected);
        }
        Ok(())
    }

    /// Reveals correctness for the current question. Learn sessions always show it.
    pub fn reveal_feedback(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.feedback_visible = true;
        Ok(())
    }

    /// The "next" transition.
    ///
    /// In a test mode with an answered question whose feedback is still hidden,
    /// the first call reveals feedback and the second call moves on. Otherwise
    /// the index moves forward, and moving past the last question completes the
    /// session.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.ensure_in_progress()?;

        if self.mode.is_test() && !self.feedback_visible && self.has_answer(self.current_index) {
            self.feedback_visible = true;
            debug!(session_id = %self.id, index = self.current_index, "Feedback revealed.");
            return Ok(Advance::FeedbackRevealed);
        }

        self.feedback_visible = self.mode.feedback_on_entry();
        let next = self.current_index + 1;
        if next >= self.total() {
            self.current_index = self.total();
            let now = self.clock.now();
            self.completed_at = Some(now);
            debug!(
                session_id = %self.id,
                answered = self.answered_count(),
                total = self.total(),
                "Quiz session complete."
            );
            return Ok(Advance::Completed);
        }

        self.current_index = next;
        debug!(session_id = %self.id, index = next, "Moved to next question.");
        Ok(Advance::Moved { to: next })
    }

    /// The "previous" transition. Stays at 0 when already on the first question.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.ensure_in_progress()?;
        self.current_index = self.current_index.saturating_sub(1);
        self.feedback_visible = self.mode.feedback_on_entry();
        debug!(session_id = %self.id, index = self.current_index, "Moved to previous question.");
        Ok(self.current_index)
    }

    fn has_answer(&self, index: usize) -> bool {
        self.answers.get(&index).is_some_and(|s| !s.is_empty())
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed(self.id));
        }
        Ok(())
    }
}
