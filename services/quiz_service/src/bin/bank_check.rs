//! services/quiz_service/src/bin/bank_check.rs
//!
//! Loads every assignment of the configured question bank and reports what a quiz
//! session would receive. Malformed records are reported as warnings while loading.

use quiz_engine_core::ports::Clock;
use quiz_service_lib::{
    adapters::{JsonQuestionBank, SystemClock},
    config::Config,
    error::ServiceError,
    repository::CachedQuestionRepository,
    telemetry::init_tracing,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    init_tracing(config.log_level);
    info!(
        "Checking question bank at {}",
        config.question_bank_path.display()
    );

    // --- 2. Build the Repository ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let bank = Arc::new(JsonQuestionBank::new(config.question_bank_path.clone()));
    let repository = CachedQuestionRepository::new(bank, clock, config.cache_ttl);

    // --- 3. Load Every Assignment ---
    let assignments = repository.assignments().await?;
    if assignments.is_empty() {
        warn!("The question bank contains no assignments.");
    }

    let mut failures = 0;
    for assignment_id in &assignments {
        match repository.questions(assignment_id).await {
            Ok(questions) if questions.is_empty() => {
                warn!(%assignment_id, "Assignment has no usable questions.");
            }
            Ok(questions) => {
                let multi = questions.iter().filter(|q| q.is_multi_answer()).count();
                info!(
                    %assignment_id,
                    questions = questions.len(),
                    multi_answer = multi,
                    "Assignment ready."
                );
            }
            Err(e) => {
                failures += 1;
                error!(%assignment_id, "Failed to load assignment: {}", e);
            }
        }
    }

    info!(
        assignments = assignments.len(),
        failures, "Question bank check finished."
    );
    Ok(())
}
