//! All error types for the decodec crate.
//!
//! Mutation errors are returned before any state changes, so a caller can
//! recover by simply leaving the session as it is.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown source word `{0}`")]
    UnknownSourceWord(String),

    #[error("unknown target word `{0}`")]
    UnknownTargetWord(String),

    #[error("`{target_word}` is not assigned to `{source_word}`")]
    NotAssigned {
        source_word: String,
        target_word: String,
    },

    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error("incomplete alignment: {} problem(s) found", .0.len())]
    IncompleteAlignment(Vec<ValidationError>),

    #[error("post-processing pipeline has no transforms")]
    EmptyPipeline,

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new not-assigned error
    pub fn not_assigned(source_word: impl Into<String>, target_word: impl Into<String>) -> Self {
        Error::NotAssigned {
            source_word: source_word.into(),
            target_word: target_word.into(),
        }
    }

    /// Creates a new data integrity error
    pub fn data_integrity(message: impl Into<String>) -> Self {
        Error::DataIntegrity(message.into())
    }
}
