use async_trait::async_trait;
use crate::error::Error;
use crate::models::LedgerEntry;

/// Side channel to the admin points ledger. Never on the mutation path.
#[async_trait]
pub trait ActivityReporter: Send + Sync {
    async fn report(&self, entry: &LedgerEntry) -> Result<(), Error>;
}
