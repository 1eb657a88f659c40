//! Core types for the lesson domain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lesson difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

/// One left/right pair in a match-pairs exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// Type-specific exercise fields, tagged by the document's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExerciseKind {
    #[serde(rename_all = "camelCase")]
    Mcq {
        options: Vec<String>,
        correct_answer: usize,
    },
    #[serde(rename_all = "camelCase")]
    TypeAnswer {
        correct_answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tolerance: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    WordBank {
        words: Vec<String>,
        correct_answer: String,
    },
    #[serde(rename_all = "camelCase")]
    MatchPairs { pairs: Vec<MatchPair> },
    #[serde(rename_all = "camelCase")]
    Listening {
        audio_url: String,
        correct_answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tolerance: Option<u32>,
    },
}

/// A single exercise within a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub question: String,
    pub explanation: String,
    #[serde(flatten)]
    pub kind: ExerciseKind,
}

/// Answer submitted for an exercise, tagged by exercise type.
///
/// The tag must match the exercise's type for the answer to be evaluated;
/// a mismatched tag is simply incorrect, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerPayload {
    #[serde(rename_all = "camelCase")]
    Mcq { selected_index: usize },
    TypeAnswer { text: String },
    #[serde(rename_all = "camelCase")]
    WordBank { selected_word: String },
    MatchPairs { matches: HashMap<String, String> },
    Listening { text: String },
}

/// Pointer to the lesson that follows this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextLesson {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// An immutable lesson document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Base estimate in minutes, used for display only.
    pub estimated_time: u32,
    pub difficulty: Difficulty,
    /// Streak bonus applied on completion. Absent means 1.
    #[serde(
        rename = "streak_increment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub streak_increment: Option<u32>,
    pub exercises: Vec<Exercise>,
    pub completion_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_lesson: Option<NextLesson>,
}

impl Lesson {
    /// Look up an exercise by id.
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id == id)
    }

    /// Streak bonus applied on completion (defaults to 1).
    pub fn streak_increment(&self) -> u32 {
        self.streak_increment.unwrap_or(1)
    }

    /// Number of exercises in the lesson.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exercise_round_trips_through_document_format() {
        let json = r#"{
            "id": "ex1",
            "type": "mcq",
            "question": "Pick one",
            "explanation": "Because",
            "options": ["a", "b"],
            "correctAnswer": 1
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.id, "ex1");
        assert_eq!(
            exercise.kind,
            ExerciseKind::Mcq {
                options: vec!["a".into(), "b".into()],
                correct_answer: 1,
            }
        );

        let back = serde_json::to_value(&exercise).unwrap();
        assert_eq!(back["type"], "mcq");
        assert_eq!(back["correctAnswer"], 1);
    }

    #[test]
    fn answer_payload_uses_camel_case_tags() {
        let payload = AnswerPayload::WordBank {
            selected_word: "hola".into(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "wordBank");
        assert_eq!(value["selectedWord"], "hola");

        let mcq: AnswerPayload =
            serde_json::from_str(r#"{"type":"mcq","selectedIndex":2}"#).unwrap();
        assert_eq!(mcq, AnswerPayload::Mcq { selected_index: 2 });
    }

    #[test]
    fn streak_increment_defaults_to_one() {
        let lesson = Lesson {
            id: "l1".into(),
            title: "T".into(),
            description: "D".into(),
            estimated_time: 5,
            difficulty: Difficulty::Beginner,
            streak_increment: None,
            exercises: vec![],
            completion_message: "done".into(),
            next_lesson: None,
        };
        assert_eq!(lesson.streak_increment(), 1);
    }
}
