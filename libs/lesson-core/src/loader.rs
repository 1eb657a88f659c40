//! Lesson document parsing and validation.
//!
//! The lesson is a static JSON document bundled with the app. Parsing is
//! strict so a malformed document surfaces a readable error instead of a
//! half-usable lesson.

use crate::error::{LessonError, Result};
use crate::types::{ExerciseKind, Lesson};
use std::collections::HashSet;

/// Parse JSON content into a validated lesson.
pub fn parse_lesson(content: &str) -> Result<Lesson> {
    let lesson: Lesson = serde_json::from_str(content)?;
    validate(&lesson)?;
    Ok(lesson)
}

fn validate(lesson: &Lesson) -> Result<()> {
    if lesson.exercises.is_empty() {
        return Err(LessonError::EmptyLesson);
    }

    let mut seen_ids = HashSet::new();
    for exercise in &lesson.exercises {
        if !seen_ids.insert(exercise.id.as_str()) {
            return Err(LessonError::DuplicateExerciseId {
                id: exercise.id.clone(),
            });
        }

        match &exercise.kind {
            ExerciseKind::Mcq {
                options,
                correct_answer,
            } => {
                if *correct_answer >= options.len() {
                    return Err(LessonError::OptionIndexOutOfRange {
                        id: exercise.id.clone(),
                        index: *correct_answer,
                        len: options.len(),
                    });
                }
            }
            ExerciseKind::WordBank {
                words,
                correct_answer,
            } => {
                if !words.contains(correct_answer) {
                    return Err(LessonError::MissingWordBankAnswer {
                        id: exercise.id.clone(),
                    });
                }
            }
            ExerciseKind::MatchPairs { pairs } => {
                if pairs.is_empty() {
                    return Err(LessonError::EmptyPairs {
                        id: exercise.id.clone(),
                    });
                }
            }
            ExerciseKind::TypeAnswer { .. } | ExerciseKind::Listening { .. } => {}
        }
    }

    Ok(())
}
