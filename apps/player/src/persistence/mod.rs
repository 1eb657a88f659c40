//! Durable storage for session progress.
//!
//! Progress is persisted as a single named record holding a full JSON
//! snapshot. Every mutation overwrites the whole record, so a lost write
//! costs at most the latest mutation and can never corrupt the stored copy.
//!
//! Storage failures are best-effort by contract: a read error is the same as
//! "no prior snapshot" and a write error is logged and dropped. Lesson play
//! never blocks on, or fails because of, the storage backend.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use lesson_core::AnswerPayload;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors surfaced by storage backends.
///
/// These never reach the user; callers log them and fall back to an
/// in-memory session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// The serializable subset of session state written to durable storage.
///
/// Deliberately excludes transient fields (`is_game_over`, the hydration
/// flag, navigation hints). Field names match the original wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_index: usize,
    pub answers_by_id: HashMap<String, AnswerPayload>,
    pub correct_by_id: HashMap<String, bool>,
    pub hearts: u32,
    pub xp: u32,
    pub streak: u32,
    pub locale: String,
    pub theme: String,
    pub is_complete: bool,
}

/// Key-value storage backend for progress snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
    async fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Spawn the background writer that applies snapshots in send order.
///
/// The sender is fire-and-forget for callers; the single consumer task
/// guarantees a later save can never be overtaken by an earlier one. The
/// task drains the channel and exits once every sender is dropped.
pub fn spawn_writer(
    backend: Arc<dyn SnapshotStore>,
) -> (mpsc::UnboundedSender<Snapshot>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();

    let handle = tokio::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            if let Err(err) = backend.save(&snapshot).await {
                tracing::warn!(error = %err, "failed to persist progress snapshot");
            }
        }
        tracing::debug!("snapshot writer finished");
    });

    (tx, handle)
}
