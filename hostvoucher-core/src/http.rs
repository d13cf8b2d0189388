//! HTTP client abstraction used for the admin ledger side channel.
//!
//! The reporter only needs to POST JSON, but going through a trait keeps the
//! network out of tests: a mock implementation records the calls instead.
//!
//! # Example Usage:
//! ``
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! let reporter = HttpActivityReporter::new(
//!     Arc::new(DefaultHttpClient::new()),
//!     "https://hostvoucher.example",
//! )?;
//! ``

use async_trait::async_trait;
use reqwest;
use crate::Error;

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POSTs `body` as `application/json` and returns the response text.
    /// Non-2xx responses are errors.
    async fn post_json(&self, url: String, body: String) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_json(&self, url: String, body: String) -> Result<String, Error> {
        let response = self.client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(response)
    }
}
