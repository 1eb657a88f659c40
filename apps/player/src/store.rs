//! Lesson progress state machine.
//!
//! `LessonStore` is the single authoritative owner of session state for the
//! active lesson attempt. All mutation goes through the named operations
//! below; callers read state through the accessors and never write fields
//! directly. The store knows nothing about storage or async; persistence is
//! layered on top by the engine.

use crate::persistence::Snapshot;
use lesson_core::{evaluator, AnswerPayload, Exercise, Lesson};
use std::collections::HashMap;

/// Hearts at the start of every attempt.
pub const STARTING_HEARTS: u32 = 3;

/// Base XP awarded per correct answer.
const BASE_XP: u32 = 10;

/// XP awarded for a correct answer at the given resulting streak.
///
/// Streak thresholds 3 and 5 raise the per-answer gain to 15 and 20; the
/// higher bonus replaces the lower one rather than stacking.
fn xp_for_streak(streak: u32) -> u32 {
    if streak >= 5 {
        BASE_XP + 10
    } else if streak >= 3 {
        BASE_XP + 5
    } else {
        BASE_XP
    }
}

/// Progress summary for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: f32,
}

/// Mutable session state for one lesson attempt.
#[derive(Debug, Default)]
pub struct LessonStore {
    lesson: Option<Lesson>,
    error: Option<String>,

    current_index: usize,
    answers_by_id: HashMap<String, AnswerPayload>,
    correct_by_id: HashMap<String, bool>,

    hearts: u32,
    streak: u32,
    xp: u32,
    is_complete: bool,
    is_game_over: bool,

    locale: String,
    theme: String,

    should_navigate_to_player: bool,
    has_hydrated: bool,
}

impl LessonStore {
    pub fn new() -> Self {
        Self {
            hearts: STARTING_HEARTS,
            locale: "en".to_string(),
            theme: "light".to_string(),
            ..Self::default()
        }
    }

    // ── Loader outcomes ────────────────────────────────────────────────

    /// Install a loaded lesson.
    ///
    /// Progress already restored from a snapshot is kept so a resumed
    /// session survives the load; otherwise progress resets to defaults.
    pub fn set_lesson(&mut self, lesson: Lesson) {
        let has_existing_progress = self.current_index > 0
            || !self.answers_by_id.is_empty()
            || self.hearts < STARTING_HEARTS
            || self.xp > 0
            || self.streak > 0;

        if has_existing_progress {
            // Restored progress may predate a lesson revision; keep the
            // index inside the new exercise list.
            self.current_index = self.current_index.min(lesson.len());
        } else {
            self.reset_progress();
            self.is_complete = false;
        }

        tracing::info!(
            title = %lesson.title,
            exercises = lesson.len(),
            has_existing_progress,
            "lesson loaded"
        );
        self.lesson = Some(lesson);
        self.error = None;
    }

    /// Record a lesson load failure without disturbing any active session.
    pub fn set_error(&mut self, message: String) {
        tracing::warn!(error = %message, "lesson load failed");
        self.error = Some(message);
    }

    // ── State transitions ──────────────────────────────────────────────

    /// Begin a fresh attempt. Safe no-op when no lesson is loaded.
    pub fn start_lesson(&mut self) {
        let Some(lesson) = &self.lesson else {
            return;
        };

        tracing::info!(title = %lesson.title, total = lesson.len(), "lesson started");
        self.reset_progress();
        self.is_complete = false;
        self.is_game_over = false;
    }

    /// Evaluate and record an answer for an exercise.
    ///
    /// Returns the correctness, or `None` when the lesson is absent or the
    /// id is unknown. That is a silent guard, since the UI only submits for the
    /// current exercise. Re-submission overwrites the prior entry.
    ///
    /// Hearts are not touched here; the caller decides whether an incorrect
    /// result costs a heart via [`decrement_heart`](Self::decrement_heart).
    pub fn submit_answer(&mut self, exercise_id: &str, payload: AnswerPayload) -> Option<bool> {
        let exercise = self.lesson.as_ref()?.exercise(exercise_id)?;
        let correct = evaluator::is_correct(exercise, &payload);

        self.answers_by_id
            .insert(exercise_id.to_string(), payload);
        self.correct_by_id.insert(exercise_id.to_string(), correct);

        if correct {
            self.streak += 1;
            self.xp += xp_for_streak(self.streak);
        } else {
            self.streak = 0;
        }

        tracing::debug!(
            exercise_id,
            correct,
            streak = self.streak,
            xp = self.xp,
            "answer submitted"
        );
        Some(correct)
    }

    /// Lose one heart. Hitting zero triggers game over; a no-op at zero.
    pub fn decrement_heart(&mut self) {
        if self.hearts == 0 {
            return;
        }

        self.hearts -= 1;
        tracing::debug!(hearts = self.hearts, "heart lost");

        if self.hearts == 0 {
            self.game_over();
        }
    }

    /// Advance to the next exercise; at the last index this completes the
    /// lesson instead. Progression is strictly forward.
    pub fn next(&mut self) {
        let Some(lesson) = &self.lesson else {
            return;
        };

        let next_index = self.current_index + 1;
        if next_index >= lesson.len() {
            self.complete();
        } else {
            self.current_index = next_index;
            tracing::debug!(
                exercise = next_index + 1,
                total = lesson.len(),
                "moved to next exercise"
            );
        }
    }

    /// Mark the attempt complete and apply the lesson's streak bonus.
    ///
    /// No-op when already complete, so the bonus cannot be applied twice.
    pub fn complete(&mut self) {
        let Some(lesson) = &self.lesson else {
            return;
        };
        if self.is_complete {
            return;
        }

        self.is_complete = true;
        self.streak += lesson.streak_increment();
        tracing::info!(
            title = %lesson.title,
            xp = self.xp,
            final_streak = self.streak,
            "lesson completed"
        );
    }

    /// Terminal state of a failed attempt: progress restarts from scratch.
    fn game_over(&mut self) {
        tracing::info!("game over, resetting lesson progress");
        self.is_game_over = true;
        self.is_complete = false;
        self.reset_progress();
        self.should_navigate_to_player = false;
    }

    /// Reset progress fields to defaults.
    pub fn reset_lesson(&mut self) {
        self.reset_progress();
        self.is_complete = false;
        tracing::debug!("lesson reset");
    }

    /// Reset progress and clear the game-over flag as well.
    pub fn reset_lesson_completely(&mut self) {
        self.reset_lesson();
        self.is_game_over = false;
    }

    fn reset_progress(&mut self) {
        self.current_index = 0;
        self.answers_by_id.clear();
        self.correct_by_id.clear();
        self.hearts = STARTING_HEARTS;
        self.streak = 0;
        self.xp = 0;
    }

    // ── Preferences and flags ──────────────────────────────────────────

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    pub fn set_should_navigate_to_player(&mut self, should: bool) {
        self.should_navigate_to_player = should;
    }

    pub fn set_has_hydrated(&mut self, hydrated: bool) {
        self.has_hydrated = hydrated;
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// True when progress exists but the attempt is not finished: the
    /// basis for offering "resume" after a restart.
    pub fn is_mid_lesson(&self) -> bool {
        self.lesson.is_some() && self.current_index > 0 && !self.is_complete
    }

    /// The exercise at the current index, if any remains.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.lesson.as_ref()?.exercises.get(self.current_index)
    }

    pub fn progress(&self) -> LessonProgress {
        let Some(lesson) = &self.lesson else {
            return LessonProgress {
                current: 0,
                total: 0,
                percentage: 0.0,
            };
        };

        let total = lesson.len();
        let current = self.current_index + 1;
        LessonProgress {
            current,
            total,
            percentage: current as f32 / total as f32 * 100.0,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers_by_id.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_by_id.values().filter(|c| **c).count()
    }

    /// Share of answered exercises that were correct, in percent.
    pub fn accuracy(&self) -> f32 {
        let total = self.correct_by_id.len();
        if total == 0 {
            return 0.0;
        }
        self.correct_count() as f32 / total as f32 * 100.0
    }

    pub fn is_last_exercise(&self) -> bool {
        self.lesson
            .as_ref()
            .is_some_and(|lesson| self.current_index + 1 >= lesson.len())
    }

    /// True once the current exercise has a recorded answer.
    pub fn can_proceed(&self) -> bool {
        self.current_exercise()
            .is_some_and(|ex| self.answers_by_id.contains_key(&ex.id))
    }

    pub fn lesson(&self) -> Option<&Lesson> {
        self.lesson.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answer(&self, exercise_id: &str) -> Option<&AnswerPayload> {
        self.answers_by_id.get(exercise_id)
    }

    pub fn was_correct(&self, exercise_id: &str) -> Option<bool> {
        self.correct_by_id.get(exercise_id).copied()
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn should_navigate_to_player(&self) -> bool {
        self.should_navigate_to_player
    }

    pub fn has_hydrated(&self) -> bool {
        self.has_hydrated
    }

    // ── Persistence boundary ───────────────────────────────────────────

    /// The serializable subset of state mirrored to storage.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_index: self.current_index,
            answers_by_id: self.answers_by_id.clone(),
            correct_by_id: self.correct_by_id.clone(),
            hearts: self.hearts,
            xp: self.xp,
            streak: self.streak,
            locale: self.locale.clone(),
            theme: self.theme.clone(),
            is_complete: self.is_complete,
        }
    }

    /// Seed a resumed session from a restored snapshot.
    ///
    /// Only the persisted fields are overwritten; the lesson, error state
    /// and transient flags are untouched. A stale index from a snapshot
    /// written against a longer lesson revision is clamped so the pointer
    /// never runs past the exercise list.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.current_index = match &self.lesson {
            Some(lesson) => snapshot.current_index.min(lesson.len()),
            None => snapshot.current_index,
        };
        self.answers_by_id = snapshot.answers_by_id;
        self.correct_by_id = snapshot.correct_by_id;
        self.hearts = snapshot.hearts;
        self.xp = snapshot.xp;
        self.streak = snapshot.streak;
        self.locale = snapshot.locale;
        self.theme = snapshot.theme;
        self.is_complete = snapshot.is_complete;
    }
}
