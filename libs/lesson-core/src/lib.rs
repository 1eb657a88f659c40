//! Core lesson library shared by the session engine and its front-ends.
//!
//! Provides:
//! - Lesson document types (Lesson, Exercise, AnswerPayload, ...)
//! - Answer evaluation with edit-distance fuzzy matching
//! - Lesson document parsing and validation

pub mod error;
pub mod evaluator;
pub mod loader;
pub mod types;

pub use error::{LessonError, Result};
pub use evaluator::{is_correct, levenshtein_distance};
pub use loader::parse_lesson;
pub use types::{
    AnswerPayload, Difficulty, Exercise, ExerciseKind, Lesson, MatchPair, NextLesson,
};
