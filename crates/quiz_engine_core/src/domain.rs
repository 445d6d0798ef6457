//! crates/quiz_engine_core/src/domain.rs
//!
//! Defines the pure, core data structures for the quiz engine.
//! These structs are independent of any storage or serialization format.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifier of an option within its question (e.g. "A", "B").
pub type OptionId = String;

/// A set of selected option identifiers. Order and duplicates never matter.
pub type Selection = BTreeSet<OptionId>;

/// Builds a `Selection` from any list of ids, collapsing duplicates.
pub fn selection<I, S>(ids: I) -> Selection
where
    I: IntoIterator<Item = S>,
    S: Into<OptionId>,
{
    ids.into_iter().map(Into::into).collect()
}

/// One selectable choice of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub option_id: OptionId,
    pub text: String,
    pub is_correct: bool,
}

/// Represents one quiz item belonging to an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub assignment_id: String,
    pub question_id: String,
    /// Prompt text. May embed inline math markup, which the engine never inspects.
    pub text: String,
    pub image_ref: Option<String>,
    pub options: Vec<QuizOption>,
}

/// Why a question record cannot be satisfied by any answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionDefect {
    #[error("question has no options")]
    NoOptions,
    #[error("question has no correct option")]
    NoCorrectOption,
    #[error("option id '{0}' appears more than once")]
    DuplicateOptionId(OptionId),
}

impl Question {
    /// The ids of all options flagged as correct.
    pub fn correct_option_ids(&self) -> Selection {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.option_id.clone())
            .collect()
    }

    /// A question is multi-answer when more than one option is correct.
    pub fn is_multi_answer(&self) -> bool {
        self.options.iter().filter(|o| o.is_correct).count() > 1
    }

    /// Checks the data-model invariants. Repositories call this at load time;
    /// the engine itself tolerates defective questions.
    pub fn validate(&self) -> Result<(), QuestionDefect> {
        if self.options.is_empty() {
            return Err(QuestionDefect::NoOptions);
        }
        let mut seen = BTreeSet::new();
        for option in &self.options {
            if !seen.insert(option.option_id.as_str()) {
                return Err(QuestionDefect::DuplicateOptionId(option.option_id.clone()));
            }
        }
        if !self.options.iter().any(|o| o.is_correct) {
            return Err(QuestionDefect::NoCorrectOption);
        }
        Ok(())
    }
}

/// The learning mode of a session. Fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Study mode: answers are shown from the start and skipping is allowed.
    Learn,
    TestSequential,
    /// The "difficult" mode: questions and options are shuffled.
    TestRandomized,
}

impl Mode {
    pub fn is_test(self) -> bool {
        !matches!(self, Mode::Learn)
    }

    /// Whether feedback is visible when a question is first shown.
    pub fn feedback_on_entry(self) -> bool {
        matches!(self, Mode::Learn)
    }

    /// The route-style name used by the surrounding application.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Learn => "learn",
            Mode::TestSequential => "test",
            Mode::TestRandomized => "difficult",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quiz mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learn" => Ok(Mode::Learn),
            "test" | "test_sequential" => Ok(Mode::TestSequential),
            "difficult" | "test_randomized" => Ok(Mode::TestRandomized),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}
