pub mod adapters;
pub mod config;
pub mod controller;
pub mod error;
pub mod repository;
pub mod telemetry;

pub use controller::QuizController;
pub use repository::CachedQuestionRepository;
