//! services/quiz_service/src/adapters/json_bank.rs
//!
//! This module contains the question bank adapter, which is the concrete implementation
//! of the `QuestionSource` port from the `core` crate. It reads one JSON file per
//! assignment from a directory and converts the records into domain questions.

use async_trait::async_trait;
use quiz_engine_core::domain::{Question, QuizOption};
use quiz_engine_core::ports::{PortError, PortResult, QuestionSource};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A question source backed by `<root>/<assignment_id>.json` files.
#[derive(Clone, Debug)]
pub struct JsonQuestionBank {
    root: PathBuf,
}

impl JsonQuestionBank {
    /// Creates a new `JsonQuestionBank`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn assignment_path(&self, assignment_id: &str) -> PortResult<PathBuf> {
        let acceptable = !assignment_id.is_empty()
            && !assignment_id.contains(|c: char| c == '/' || c == '\\')
            && assignment_id != "."
            && assignment_id != "..";
        if !acceptable {
            return Err(PortError::NotFound(format!(
                "Assignment {} not found",
                assignment_id
            )));
        }
        Ok(self.root.join(format!("{assignment_id}.json")))
    }
}

//=========================================================================================
// "Impure" File Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    #[serde(default)]
    assignment_id: Option<String>,
    question_id: String,
    text: String,
    #[serde(default, alias = "imageRef")]
    image: Option<String>,
    #[serde(default)]
    options: Vec<OptionRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionRecord {
    option_id: String,
    text: String,
    #[serde(default)]
    is_correct: bool,
}

impl QuestionRecord {
    fn to_domain(self, fallback_assignment: &str) -> Question {
        Question {
            assignment_id: self
                .assignment_id
                .unwrap_or_else(|| fallback_assignment.to_string()),
            question_id: self.question_id,
            text: self.text,
            image_ref: self.image.filter(|s| !s.trim().is_empty()),
            options: self
                .options
                .into_iter()
                .map(|o| QuizOption {
                    option_id: o.option_id,
                    text: o.text,
                    is_correct: o.is_correct,
                })
                .collect(),
        }
    }
}

/// Converts records to questions, dropping those that break the data-model invariants.
fn usable_questions(records: Vec<QuestionRecord>, assignment_id: &str) -> Vec<Question> {
    records
        .into_iter()
        .map(|r| r.to_domain(assignment_id))
        .filter(|q| match q.validate() {
            Ok(()) => true,
            Err(defect) => {
                warn!(
                    assignment_id,
                    question_id = %q.question_id,
                    "Dropping malformed question: {}", defect
                );
                false
            }
        })
        .collect()
}

//=========================================================================================
// `QuestionSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuestionSource for JsonQuestionBank {
    async fn fetch_questions(&self, assignment_id: &str) -> PortResult<Vec<Question>> {
        let path = self.assignment_path(assignment_id)?;
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                PortError::NotFound(format!("Assignment {} not found", assignment_id))
            }
            _ => PortError::Unexpected(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        let records: Vec<QuestionRecord> = serde_json::from_str(&raw).map_err(|e| {
            PortError::Unexpected(format!("Invalid question file {}: {}", path.display(), e))
        })?;
        let read = records.len();
        let questions = usable_questions(records, assignment_id);
        debug!(assignment_id, read, usable = questions.len(), "Question file loaded.");
        Ok(questions)
    }

    async fn list_assignments(&self) -> PortResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(|e| {
            PortError::Unexpected(format!(
                "Failed to read question bank {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut assignments = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                assignments.push(stem.to_string());
            }
        }
        assignments.sort();
        Ok(assignments)
    }
}
