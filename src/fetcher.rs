//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;

use crate::Result;

/// Trait for fetching the full HTML content of a URL.
///
/// Implementations fetch either directly or through a rendering proxy.
/// User-agent, timeout and credentials are set at construction time;
/// a non-success status is reported as [`crate::FinderError::Provider`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Short label used in logs.
    fn label(&self) -> &str;

    /// Request timeout in seconds enforced by this fetcher.
    fn timeout_secs(&self) -> u64;
}

/// Reads a response body, mapping a non-success status to a provider error.
pub(crate) async fn read_success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(crate::FinderError::provider(status.as_u16(), body));
    }
    Ok(body)
}
