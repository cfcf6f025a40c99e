//! HTTP client for the dividend and inflation pages.

use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::errors::Result;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetches HTML pages. No retries: a failure aborts the run.
#[derive(Clone)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body, failing on a non-success status.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
