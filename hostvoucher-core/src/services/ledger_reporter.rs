use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;
use url::Url;
use hostvoucher_common::models::LedgerEntry;
use hostvoucher_common::traits::reporting_traits::ActivityReporter;
use crate::Error;
use crate::http::HttpClient;

/// Posts ledger entries to `<base>/api/action`.
pub struct HttpActivityReporter {
    http: Arc<dyn HttpClient>,
    endpoint: Url,
}

impl HttpActivityReporter {
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid ledger url '{base_url}': {e}")))?;
        let endpoint = base
            .join("/api/action")
            .map_err(|e| Error::Config(format!("invalid ledger url '{base_url}': {e}")))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ActivityReporter for HttpActivityReporter {
    async fn report(&self, entry: &LedgerEntry) -> Result<(), Error> {
        let body = serde_json::to_string(entry)?;
        self.http.post_json(self.endpoint.to_string(), body).await?;
        debug!("Reported {} points ({}) to ledger", entry.points, entry.reason);
        Ok(())
    }
}

/// Used when no ledger URL is configured.
pub struct NoopActivityReporter;

#[async_trait]
impl ActivityReporter for NoopActivityReporter {
    async fn report(&self, _entry: &LedgerEntry) -> Result<(), Error> {
        Ok(())
    }
}
