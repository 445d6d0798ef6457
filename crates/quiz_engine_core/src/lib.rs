pub mod domain;
pub mod ports;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod validator;

pub use domain::{
    selection, Mode, OptionId, Question, QuestionDefect, QuizOption, Selection, UnknownMode,
};
pub use ports::{Clock, PortError, PortResult, QuestionSource};
pub use scoring::{score, QuestionResult, ScoreSummary, PASS_THRESHOLD};
pub use session::{Advance, QuizSession, SessionError, SessionSnapshot};
pub use shuffle::{prepare_for_mode, shuffle};
pub use validator::is_correct;
