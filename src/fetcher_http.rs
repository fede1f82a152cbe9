//! Direct HTTP page fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::fetcher::{read_success_body, PageFetcher};
use crate::Result;

/// Generic desktop browser identification sent on direct fetches.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// A page fetcher that requests the target URL directly.
///
/// Search pages are more likely to block these requests than ones routed
/// through [`crate::proxy::RenderProxyFetcher`].
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Creates a fetcher with a browser user-agent and the given timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FinderError::Transport`] if the client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client whose timeout is `timeout_secs`.
    pub fn with_client(client: Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout_secs,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        read_success_body(response).await
    }

    fn label(&self) -> &str {
        "direct"
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
