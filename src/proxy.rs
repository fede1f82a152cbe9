//! Rendering proxy fetcher.
//!
//! Routes page fetches through a ScrapingBee-style service: the proxy is asked
//! for `GET {base}?api_key=..&url=..` and answers with the target page's
//! rendered HTML. Requests through the proxy are much less likely to be
//! blocked by the search site than direct ones.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::fetcher::{read_success_body, PageFetcher};
use crate::{ProxyCredential, Result};

/// A page fetcher that delegates to a rendering proxy service.
pub struct RenderProxyFetcher {
    client: Client,
    base_url: Url,
    credential: ProxyCredential,
    timeout_secs: u64,
}

impl RenderProxyFetcher {
    /// Creates a proxy fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FinderError::UrlParse`] for a malformed base URL or
    /// [`crate::FinderError::Transport`] if the client cannot be built.
    pub fn new(base_url: &str, credential: ProxyCredential, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            credential,
            timeout_secs,
        })
    }

    /// Returns the proxy request URL for a target page.
    pub fn request_url(&self, target_url: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", self.credential.api_key())
            .append_pair("url", target_url);
        url
    }
}

#[async_trait]
impl PageFetcher for RenderProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {} through rendering proxy", url);
        let response = self.client.get(self.request_url(url)).send().await?;
        read_success_body(response).await
    }

    fn label(&self) -> &str {
        "proxy"
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
