//! services/quiz_service/src/controller.rs
//!
//! The session consumer façade: maps user intents (select, next, previous, skip,
//! retake) one-to-one onto quiz session operations, and owns what a retake needs.

use crate::error::{ServiceError, ServiceResult};
use crate::repository::CachedQuestionRepository;
use quiz_engine_core::domain::{selection, Mode, OptionId, Question};
use quiz_engine_core::ports::Clock;
use quiz_engine_core::scoring::ScoreSummary;
use quiz_engine_core::session::{QuizSession, SessionError, SessionSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one learner's attempts at one assignment.
pub struct QuizController {
    assignment_id: String,
    mode: Mode,
    /// Questions in authored order; every retake prepares these afresh.
    source: Arc<Vec<Question>>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    session: QuizSession,
}

impl QuizController {
    /// Loads the assignment through `repository` and starts the first attempt.
    pub async fn start(
        repository: &CachedQuestionRepository,
        clock: Arc<dyn Clock>,
        assignment_id: &str,
        mode: Mode,
    ) -> ServiceResult<Self> {
        let questions = repository.questions(assignment_id).await?;
        Self::with_rng(assignment_id, mode, questions, clock, StdRng::from_entropy())
    }

    /// Starts an attempt over already-loaded questions with the given random source.
    pub fn with_rng(
        assignment_id: &str,
        mode: Mode,
        questions: Arc<Vec<Question>>,
        clock: Arc<dyn Clock>,
        mut rng: StdRng,
    ) -> ServiceResult<Self> {
        if questions.is_empty() {
            return Err(ServiceError::EmptyAssignment(assignment_id.to_string()));
        }
        let session = QuizSession::begin(assignment_id, mode, &questions, clock.clone(), &mut rng);
        info!(
            session_id = %session.id(),
            assignment_id,
            %mode,
            questions = questions.len(),
            "Quiz attempt started."
        );
        Ok(Self {
            assignment_id: assignment_id.to_string(),
            mode,
            source: questions,
            clock,
            rng,
            session,
        })
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn summary(&self) -> ScoreSummary {
        self.session.score()
    }

    /// Records the learner's choice for the question on screen.
    pub fn select_options<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<OptionId>,
    {
        let index = self.session.current_index();
        let result = self.session.record_answer(index, selection(ids));
        self.absorb("select_options", result);
    }

    /// The "Next" control. Ignored while a test question is still unanswered.
    pub fn next(&mut self) {
        if !self.session.can_advance() {
            debug!(session_id = %self.session.id(), "Next ignored: question unanswered.");
            return;
        }
        let result = self.session.advance();
        self.absorb("next", result);
    }

    pub fn previous(&mut self) {
        let result = self.session.retreat();
        self.absorb("previous", result);
    }

    /// Moves on without the answered-question gate.
    pub fn skip(&mut self) {
        let result = self.session.advance();
        self.absorb("skip", result);
    }

    /// Discards the current attempt and starts a fresh one, reshuffled when the mode asks for it.
    pub fn retake(&mut self) {
        let previous = self.session.id();
        self.session = QuizSession::begin(
            self.assignment_id.as_str(),
            self.mode,
            &self.source,
            self.clock.clone(),
            &mut self.rng,
        );
        info!(
            previous_session = %previous,
            session_id = %self.session.id(),
            "Quiz retake started."
        );
    }

    /// Invalid operations are UI logic bugs; they are logged and otherwise ignored.
    fn absorb<T>(&self, intent: &str, result: Result<T, SessionError>) {
        if let Err(e) = result {
            warn!(session_id = %self.session.id(), intent, "Ignoring invalid operation: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{questions, ManualClock, MockSource};

    fn controller(mode: Mode, count: usize, seed: u64) -> QuizController {
        QuizController::with_rng(
            "week-1",
            mode,
            Arc::new(questions("week-1", count)),
            ManualClock::new(),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_mode_next_is_gated_then_reveals_then_moves() {
        let mut c = controller(Mode::TestSequential, 3, 1);

        c.next();
        assert_eq!(c.snapshot().current_index, 0);

        c.select_options(["A"]);
        c.next();
        let snap = c.snapshot();
        assert_eq!(snap.current_index, 0);
        assert!(snap.feedback_visible);

        c.next();
        let snap = c.snapshot();
        assert_eq!(snap.current_index, 1);
        assert!(!snap.feedback_visible);
    }

    #[test]
    fn skip_bypasses_the_gate() {
        let mut c = controller(Mode::TestSequential, 3, 1);
        c.skip();
        assert_eq!(c.snapshot().current_index, 1);
    }

    #[test]
    fn learn_mode_walkthrough_to_summary() {
        let mut c = controller(Mode::Learn, 3, 1);
        c.select_options(["A"]);
        c.next();
        c.skip();
        c.select_options(["B", "B"]);
        c.next();
        c.previous();
        assert!(c.snapshot().is_complete);

        let summary = c.summary();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.percentage, 33);
        assert!(!summary.passed);
    }

    #[test]
    fn intents_after_completion_change_nothing() {
        let mut c = controller(Mode::Learn, 1, 1);
        c.next();
        assert!(c.session().is_complete());
        c.select_options(["A"]);
        c.previous();
        assert!(c.session().answers().is_empty());
        assert_eq!(c.session().current_index(), 1);
    }

    #[test]
    fn retake_starts_a_fresh_reshuffled_attempt() {
        let mut c = controller(Mode::TestRandomized, 10, 9);
        let first_id = c.session().id();
        let first_order: Vec<String> = c
            .session()
            .questions()
            .iter()
            .map(|q| q.question_id.clone())
            .collect();
        c.select_options(["A"]);
        c.next();
        assert!(c.snapshot().feedback_visible);

        c.retake();

        let s = c.session();
        assert_ne!(s.id(), first_id);
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
        assert!(!s.feedback_visible());
        let second_order: Vec<String> = s.questions().iter().map(|q| q.question_id.clone()).collect();
        assert_ne!(first_order, second_order);
    }

    #[test]
    fn empty_assignments_are_refused() {
        let result = QuizController::with_rng(
            "week-0",
            Mode::Learn,
            Arc::new(Vec::new()),
            ManualClock::new(),
            StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ServiceError::EmptyAssignment(id)) if id == "week-0"));
    }

    #[tokio::test]
    async fn start_loads_through_the_repository() {
        let mut source = MockSource::new();
        source
            .expect_fetch_questions()
            .times(1)
            .returning(|id| Ok(questions(id, 4)));
        let clock = ManualClock::new();
        let repo = CachedQuestionRepository::new(
            Arc::new(source),
            clock.clone(),
            chrono::Duration::seconds(60),
        );

        let first = QuizController::start(&repo, clock.clone(), "week-1", Mode::Learn)
            .await
            .unwrap();
        let second = QuizController::start(&repo, clock, "week-1", Mode::TestRandomized)
            .await
            .unwrap();

        assert_eq!(first.snapshot().total, 4);
        assert!(first.snapshot().feedback_visible);
        assert_eq!(second.snapshot().mode, Mode::TestRandomized);
    }
}
