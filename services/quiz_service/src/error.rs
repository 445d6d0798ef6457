//! services/quiz_service/src/error.rs
//!
//! Defines the primary error type for the quiz service.

use crate::config::ConfigError;
use quiz_engine_core::ports::PortError;

/// The primary error type for the `quiz_service` crate.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// A session cannot be started for an assignment with no usable questions.
    #[error("Assignment '{0}' has no questions")]
    EmptyAssignment(String),
}

/// A convenience type alias for `Result<T, ServiceError>`.
pub type ServiceResult<T> = Result<T, ServiceError>;
