//! In-memory snapshot store.

use super::{Snapshot, SnapshotStore, StoreError};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Non-durable backend holding the snapshot in memory.
///
/// Used when no durable location is available and as the storage stand-in
/// in tests. Selected at composition time, not by runtime fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the stored snapshot without going through the async trait.
    pub fn get(&self) -> Option<Snapshot> {
        self.lock().clone()
    }

    // A backend that must never fail the session cannot panic on a
    // poisoned lock; the snapshot is a plain value, so the inner state is
    // usable regardless of how a previous holder exited.
    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.lock() = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.get())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn save_load_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        let snapshot = Snapshot {
            current_index: 2,
            answers_by_id: HashMap::new(),
            correct_by_id: HashMap::new(),
            hearts: 3,
            xp: 20,
            streak: 2,
            locale: "es".into(),
            theme: "dark".into(),
            is_complete: false,
        };
        store.save(&snapshot).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(snapshot));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn poisoned_lock_does_not_fail_the_backend() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let poisoner = store.clone();
        std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join()
        .unwrap_err();

        let snapshot = Snapshot {
            current_index: 1,
            answers_by_id: HashMap::new(),
            correct_by_id: HashMap::new(),
            hearts: 3,
            xp: 10,
            streak: 1,
            locale: "en".into(),
            theme: "light".into(),
            is_complete: false,
        };
        store.save(&snapshot).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(snapshot));
        store.clear().await.unwrap();
    }
}
