//! Session engine: the command funnel in front of the state machine.
//!
//! Every mutating operation follows the same sequence: apply the mutation to
//! the store, then fire the resulting snapshot at the background writer. The
//! engine never waits for a save; ordering is guaranteed by the writer's
//! single consumer.

use crate::persistence::{self, Snapshot, SnapshotStore};
use crate::store::LessonStore;
use lesson_core::{AnswerPayload, LessonError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Lesson document bundled with the binary.
const EMBEDDED_LESSON: &str = include_str!("../assets/lesson.json");

/// Where the lesson document comes from.
#[derive(Debug, Clone, Default)]
pub enum LessonSource {
    /// The document compiled into the binary.
    #[default]
    Embedded,
    /// A document on disk, mainly for development.
    Path(PathBuf),
}

/// Errors from loading the lesson document.
///
/// These are recoverable: the engine mirrors the message into the store's
/// `error` field so the front-end can offer a retry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read lesson file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lesson(#[from] LessonError),
}

/// Owns the state machine and mirrors each mutation into storage.
pub struct SessionEngine {
    store: LessonStore,
    backend: Arc<dyn SnapshotStore>,
    source: LessonSource,
    saves: mpsc::UnboundedSender<Snapshot>,
    writer: JoinHandle<()>,
}

impl SessionEngine {
    /// Compose the engine with a storage backend chosen by the caller.
    ///
    /// Must be called from within a tokio runtime (spawns the writer task).
    pub fn new(backend: Arc<dyn SnapshotStore>, source: LessonSource) -> Self {
        let (saves, writer) = persistence::spawn_writer(backend.clone());
        Self {
            store: LessonStore::new(),
            backend,
            source,
            saves,
            writer,
        }
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &LessonStore {
        &self.store
    }

    /// Load the lesson document and install it in the store.
    ///
    /// Failure is surfaced both as the returned error and as the store's
    /// `error` field; an already-active session is left untouched.
    ///
    /// Installing the document is not progress, so nothing is persisted
    /// here: a save at this point would race the startup restore and could
    /// overwrite a durable snapshot with fresh defaults.
    pub fn load_lesson(&mut self) -> Result<(), LoadError> {
        let result = self.read_document().and_then(|content| {
            lesson_core::parse_lesson(&content).map_err(LoadError::from)
        });

        match result {
            Ok(lesson) => {
                self.store.set_lesson(lesson);
                Ok(())
            }
            Err(err) => {
                self.store.set_error(err.to_string());
                Err(err)
            }
        }
    }

    fn read_document(&self) -> Result<String, LoadError> {
        match &self.source {
            LessonSource::Embedded => Ok(EMBEDDED_LESSON.to_string()),
            LessonSource::Path(path) => Ok(std::fs::read_to_string(path)?),
        }
    }

    /// One-shot restore from storage at startup.
    ///
    /// Any backend failure is treated the same as "no prior snapshot": the
    /// session keeps its defaults and play continues un-persisted. Never
    /// errors and never blocks startup beyond the single load attempt.
    pub async fn restore(&mut self) {
        match self.backend.load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    current_index = snapshot.current_index,
                    xp = snapshot.xp,
                    "restored saved progress"
                );
                self.store.apply_snapshot(snapshot);
            }
            Ok(None) => {
                tracing::debug!("no saved progress found");
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not restore progress, starting fresh");
            }
        }
        self.store.set_has_hydrated(true);
    }

    // ── Commands: mutate, then fire-and-forget persist ─────────────────

    pub fn start_lesson(&mut self) {
        self.store.start_lesson();
        self.persist();
    }

    pub fn submit_answer(&mut self, exercise_id: &str, payload: AnswerPayload) -> Option<bool> {
        let correct = self.store.submit_answer(exercise_id, payload);
        if correct.is_some() {
            self.persist();
        }
        correct
    }

    pub fn next(&mut self) {
        self.store.next();
        self.persist();
    }

    pub fn decrement_heart(&mut self) {
        self.store.decrement_heart();
        self.persist();
    }

    pub fn complete(&mut self) {
        self.store.complete();
        self.persist();
    }

    pub fn reset_lesson(&mut self) {
        self.store.reset_lesson();
        self.persist();
    }

    pub fn reset_lesson_completely(&mut self) {
        self.store.reset_lesson_completely();
        self.persist();
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.store.set_locale(locale);
        self.persist();
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.store.set_theme(theme);
        self.persist();
    }

    /// Navigation hint owned by the front-end; not persisted content-wise
    /// but funneled here so all mutation shares one path.
    pub fn set_should_navigate_to_player(&mut self, should: bool) {
        self.store.set_should_navigate_to_player(should);
    }

    fn persist(&self) {
        // The writer only disappears at shutdown; a failed send just means
        // this snapshot is not mirrored, which is within the best-effort
        // durability contract.
        if self.saves.send(self.store.snapshot()).is_err() {
            tracing::warn!("snapshot writer is gone, progress not persisted");
        }
    }

    /// Drop the command side and wait for queued saves to hit storage.
    pub async fn shutdown(self) {
        drop(self.saves);
        if let Err(err) = self.writer.await {
            tracing::warn!(error = %err, "snapshot writer task failed");
        }
    }
}
