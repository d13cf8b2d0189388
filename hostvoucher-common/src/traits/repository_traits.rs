use async_trait::async_trait;
use crate::error::Error;
use crate::models::Snapshot;

/// Durable home of the engine snapshot (the browser's local storage on the site).
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<Snapshot>, Error>;
    async fn save(&self, snapshot: &Snapshot) -> Result<(), Error>;
}
