// Plain HTTP page fetcher. One pooled client per process.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::FetchError;

const USER_AGENT: &str = concat!("finollama/", env!("CARGO_PKG_VERSION"));

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build the shared client. Redirects follow reqwest's default policy (10 hops).
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` once and return the body. Any non-2xx status is an error; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "Fetching page");

        let resp = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Page fetch failed");
            FetchError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Page fetch returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        info!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
