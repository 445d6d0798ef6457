pub mod clock;
pub mod json_bank;

pub use clock::SystemClock;
pub use json_bank::JsonQuestionBank;
