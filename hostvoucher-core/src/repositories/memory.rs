use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use tokio::sync::Mutex;
use hostvoucher_common::models::Snapshot;
use hostvoucher_common::traits::repository_traits::StateRepository;
use crate::Error;

/// Keeps the snapshot in memory. Used by tests and by `--ephemeral` runs.
#[derive(Clone, Default)]
pub struct InMemoryStateRepository {
    data: Arc<Mutex<Option<Snapshot>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(snapshot))),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn current(&self) -> Option<Snapshot> {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self) -> Result<Option<Snapshot>, Error> {
        Ok(self.data.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), Error> {
        *self.data.lock().await = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
