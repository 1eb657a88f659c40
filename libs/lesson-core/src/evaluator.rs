//! Answer evaluation for lesson exercises.
//!
//! Pure functions only: evaluation never touches session state, so the rules
//! here are testable in isolation.

use crate::types::{AnswerPayload, Exercise, ExerciseKind};

/// Check a submitted answer against an exercise.
///
/// A payload whose tag does not match the exercise type is treated as
/// incorrect rather than an error.
pub fn is_correct(exercise: &Exercise, answer: &AnswerPayload) -> bool {
    match (&exercise.kind, answer) {
        (
            ExerciseKind::Mcq { correct_answer, .. },
            AnswerPayload::Mcq { selected_index },
        ) => selected_index == correct_answer,

        (
            ExerciseKind::TypeAnswer {
                correct_answer,
                tolerance,
            },
            AnswerPayload::TypeAnswer { text },
        ) => text_matches(text, correct_answer, tolerance.unwrap_or(0)),

        (
            ExerciseKind::WordBank { correct_answer, .. },
            AnswerPayload::WordBank { selected_word },
        ) => selected_word == correct_answer,

        (ExerciseKind::MatchPairs { pairs }, AnswerPayload::MatchPairs { matches }) => pairs
            .iter()
            .all(|pair| matches.get(&pair.left) == Some(&pair.right)),

        (
            ExerciseKind::Listening {
                correct_answer,
                tolerance,
                ..
            },
            AnswerPayload::Listening { text },
        ) => text_matches(text, correct_answer, tolerance.unwrap_or(0)),

        _ => false,
    }
}

/// Compare typed text to the expected answer after normalization.
///
/// Tolerance is the maximum edit distance still accepted; 0 means exact.
fn text_matches(submitted: &str, expected: &str, tolerance: u32) -> bool {
    let submitted = normalize(submitted);
    let expected = normalize(expected);

    if tolerance == 0 {
        return submitted == expected;
    }

    levenshtein_distance(&submitted, &expected) <= tolerance as usize
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchPair;
    use std::collections::HashMap;

    fn mcq(correct: usize) -> Exercise {
        Exercise {
            id: "ex-mcq".into(),
            question: "Pick".into(),
            explanation: "".into(),
            kind: ExerciseKind::Mcq {
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_answer: correct,
            },
        }
    }

    fn type_answer(correct: &str, tolerance: Option<u32>) -> Exercise {
        Exercise {
            id: "ex-type".into(),
            question: "Type".into(),
            explanation: "".into(),
            kind: ExerciseKind::TypeAnswer {
                correct_answer: correct.into(),
                tolerance,
            },
        }
    }

    fn match_pairs() -> Exercise {
        Exercise {
            id: "ex-pairs".into(),
            question: "Match".into(),
            explanation: "".into(),
            kind: ExerciseKind::MatchPairs {
                pairs: vec![
                    MatchPair {
                        left: "a".into(),
                        right: "1".into(),
                    },
                    MatchPair {
                        left: "b".into(),
                        right: "2".into(),
                    },
                ],
            },
        }
    }

    fn pairs_answer(entries: &[(&str, &str)]) -> AnswerPayload {
        AnswerPayload::MatchPairs {
            matches: entries
                .iter()
                .map(|(l, r)| (l.to_string(), r.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn mcq_requires_exact_index() {
        let exercise = mcq(1);
        assert!(is_correct(
            &exercise,
            &AnswerPayload::Mcq { selected_index: 1 }
        ));
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::Mcq { selected_index: 0 }
        ));
        // Out of range is just another wrong index.
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::Mcq { selected_index: 99 }
        ));
    }

    #[test]
    fn tag_mismatch_is_incorrect_not_an_error() {
        let exercise = mcq(0);
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::TypeAnswer {
                text: "whatever".into()
            }
        ));
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::WordBank {
                selected_word: "a".into()
            }
        ));
    }

    #[test]
    fn typed_answer_trims_and_case_folds() {
        let exercise = type_answer("hello", None);
        for submitted in ["hello", "  Hello  ", "HELLO", "\thello\n"] {
            assert!(
                is_correct(
                    &exercise,
                    &AnswerPayload::TypeAnswer {
                        text: submitted.into()
                    }
                ),
                "expected {submitted:?} to match"
            );
        }
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::TypeAnswer {
                text: "helo".into()
            }
        ));
    }

    #[test]
    fn typed_answer_respects_tolerance() {
        let exercise = type_answer("bonjour", Some(2));
        assert!(is_correct(
            &exercise,
            &AnswerPayload::TypeAnswer {
                text: "bonjor".into() // distance 1
            }
        ));
        assert!(is_correct(
            &exercise,
            &AnswerPayload::TypeAnswer {
                text: "bonjr".into() // distance 2
            }
        ));
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::TypeAnswer {
                text: "bnjr".into() // distance 3
            }
        ));
    }

    #[test]
    fn word_bank_is_case_sensitive() {
        let exercise = Exercise {
            id: "ex-bank".into(),
            question: "Pick the word".into(),
            explanation: "".into(),
            kind: ExerciseKind::WordBank {
                words: vec!["Hola".into(), "Adios".into()],
                correct_answer: "Hola".into(),
            },
        };
        assert!(is_correct(
            &exercise,
            &AnswerPayload::WordBank {
                selected_word: "Hola".into()
            }
        ));
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::WordBank {
                selected_word: "hola".into()
            }
        ));
    }

    #[test]
    fn match_pairs_requires_every_pair() {
        let exercise = match_pairs();
        assert!(is_correct(
            &exercise,
            &pairs_answer(&[("a", "1"), ("b", "2")])
        ));
        // Missing key
        assert!(!is_correct(&exercise, &pairs_answer(&[("a", "1")])));
        // Swapped values
        assert!(!is_correct(
            &exercise,
            &pairs_answer(&[("a", "2"), ("b", "1")])
        ));
        // Extra keys do not hurt as long as every declared pair matches.
        assert!(is_correct(
            &exercise,
            &pairs_answer(&[("a", "1"), ("b", "2"), ("c", "3")])
        ));
    }

    #[test]
    fn listening_matches_like_typed_answer() {
        let exercise = Exercise {
            id: "ex-listen".into(),
            question: "What did you hear?".into(),
            explanation: "".into(),
            kind: ExerciseKind::Listening {
                audio_url: "audio/greeting.mp3".into(),
                correct_answer: "buenos dias".into(),
                tolerance: Some(1),
            },
        };
        assert!(is_correct(
            &exercise,
            &AnswerPayload::Listening {
                text: " Buenos Dias ".into()
            }
        ));
        assert!(is_correct(
            &exercise,
            &AnswerPayload::Listening {
                text: "buenos diaz".into()
            }
        ));
        assert!(!is_correct(
            &exercise,
            &AnswerPayload::Listening {
                text: "buenas dios".into()
            }
        ));
    }

    #[test]
    fn levenshtein_distance_table() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn levenshtein_distance_is_symmetric() {
        let cases = [("kitten", "sitting"), ("hola", "ola"), ("", "abc"), ("a", "b")];
        for (a, b) in cases {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        }
    }
}
