//! Outbound JSON fetch capability.
//!
//! The github handler never talks to the network directly; it goes through
//! [`FetchJson`] so tests can substitute a deterministic stub.

use std::{future::Future, time::Duration};
use tracing::warn;

/// Fetches the body of a URL as text.
///
/// The contract is deliberately lossy: any failure (connect error, timeout,
/// non-success status, unreadable body) yields an empty string, which
/// callers treat as an upstream failure. No retries.
pub trait FetchJson: Send + Sync + 'static {
    /// Performs one GET of `url` and returns the body text, or an empty
    /// string on any failure.
    fn fetch(&self, url: &str) -> impl Future<Output = String> + Send;
}

/// Production fetcher backed by [`reqwest`] with a bounded timeout.
///
/// GitHub rejects requests without a `User-Agent`, so one is always sent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// The whole request must finish within this window or it fails.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Creates a fetcher with the given overall request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("funweb/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build the HTTP client");

        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        HttpFetcher::new(Self::DEFAULT_TIMEOUT)
    }
}

impl FetchJson for HttpFetcher {
    async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url, %err, "fetch failed");
                return String::new();
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                warn!(url, %err, "fetch returned an error status");
                return String::new();
            }
        };

        response.text().await.unwrap_or_default()
    }
}
