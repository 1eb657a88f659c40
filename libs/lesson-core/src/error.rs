//! Error types for lesson-core.

use thiserror::Error;

/// Result type alias using LessonError.
pub type Result<T> = std::result::Result<T, LessonError>;

/// Errors that can occur while parsing or validating a lesson document.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("invalid lesson document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lesson contains no exercises")]
    EmptyLesson,

    #[error("duplicate exercise id: {id}")]
    DuplicateExerciseId { id: String },

    #[error("exercise {id}: correct answer index {index} out of range for {len} options")]
    OptionIndexOutOfRange {
        id: String,
        index: usize,
        len: usize,
    },

    #[error("exercise {id}: correct answer is not in the word bank")]
    MissingWordBankAnswer { id: String },

    #[error("exercise {id}: match-pairs exercise has no pairs")]
    EmptyPairs { id: String },
}
