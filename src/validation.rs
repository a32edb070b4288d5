//! Completeness checks run before a session may be committed.
//!
//! Validation is read-only. Every problem is collected so a caller can show all
//! of them at once; nothing here returns early.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::Error as CrateError, session::ReconciliationSession};

/// One reason a session cannot be committed yet.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("source word `{0}` has no target word")]
    EmptySourceMapping(String),

    #[error("unassigned words left: {}", .0.join(", "))]
    NonEmptyUnassignedPool(Vec<String>),

    #[error("words not in the natural translation: {}", .0.join(", "))]
    UnknownTargetWords(Vec<String>),
}

/// Outcome of [`validate_complete`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Source words reported as having no target word.
    pub fn empty_source_words(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::EmptySourceMapping(word) => Some(word.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Converts a failed result into [`CrateError::IncompleteAlignment`].
    pub fn into_result(self) -> Result<(), CrateError> {
        if self.valid {
            Ok(())
        } else {
            Err(CrateError::IncompleteAlignment(self.errors))
        }
    }
}

/// Checks that every source word has at least one target word and that every
/// natural-translation word is used.
///
/// Assigned words outside the natural translation are reported as well unless
/// the session allows foreign words. Double assignment needs no check: the
/// session cannot represent it.
pub fn validate_complete(session: &ReconciliationSession) -> ValidationResult {
    let mut errors: Vec<ValidationError> = session
        .entries()
        .iter()
        .filter(|entry| entry.is_empty())
        .map(|entry| ValidationError::EmptySourceMapping(entry.source_word.clone()))
        .collect();

    let pool = session.unassigned_pool();
    if !pool.is_empty() {
        errors.push(ValidationError::NonEmptyUnassignedPool(pool));
    }

    if !session.options().allow_foreign_words {
        let foreign = session.foreign_words();
        if !foreign.is_empty() {
            errors.push(ValidationError::UnknownTargetWords(foreign));
        }
    }

    ValidationResult::from_errors(errors)
}
