//! crates/quiz_engine_core/src/ports.rs
//!
//! Defines the service contracts (traits) the quiz engine relies on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to stay independent of where questions are stored and which clock is used.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Question;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., file system, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only provider of questions, grouped by assignment.
///
/// Implementations are expected to hand out well-formed questions only; the
/// engine tolerates malformed ones but cannot make them answerable.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns the questions of one assignment in their authored order.
    async fn fetch_questions(&self, assignment_id: &str) -> PortResult<Vec<Question>>;

    /// Lists the identifiers of all assignments the source knows about.
    async fn list_assignments(&self) -> PortResult<Vec<String>>;
}

/// The single wall-clock source used for session timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
