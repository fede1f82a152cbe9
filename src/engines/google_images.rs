//! Google Custom Search image provider.
//!
//! Queries the Custom Search JSON API with `searchType=image`, ten results per
//! page, walking the brand's phrasings in order until the cap is reached. Any
//! failure aborts the whole attempt so the caller can fall back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::collector::{Admission, Collector};
use crate::{
    BrandQuery, FinderError, ImageProvider, ImageResult, PrimaryCredentials, ProviderConfig,
    Result,
};

/// Results requested per API page.
pub const PAGE_SIZE: usize = 10;

/// Primary image provider backed by the Custom Search JSON API.
pub struct GoogleImages {
    config: ProviderConfig,
    client: Client,
    base_url: String,
    credentials: PrimaryCredentials,
}

impl GoogleImages {
    /// Creates a provider against the given API endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        credentials: PrimaryCredentials,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            config: Self::default_config(timeout_secs),
            client,
            base_url: base_url.into(),
            credentials,
        })
    }

    /// Returns the configuration `new` uses.
    pub fn default_config(timeout_secs: u64) -> ProviderConfig {
        ProviderConfig {
            name: "Google Images".to_string(),
            shortcut: "google".to_string(),
            timeout: timeout_secs,
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetches one page of raw results. `start` is 1-indexed.
    ///
    /// An empty vector means the query has no more results.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidQuery`] if `start` is 0.
    /// - [`FinderError::QuotaExceeded`] on HTTP 429.
    /// - [`FinderError::Provider`] on any other non-success status.
    /// - [`FinderError::Transport`] on network failure.
    /// - [`FinderError::Parse`] if the body is not the expected JSON.
    pub async fn search_page(&self, query: &str, num: usize, start: usize) -> Result<Vec<ImageResult>> {
        if start == 0 {
            return Err(FinderError::InvalidQuery(
                "Result offsets start at 1".to_string(),
            ));
        }

        let start = start.to_string();
        let num = num.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("cx", self.credentials.cse_id.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("start", start.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FinderError::QuotaExceeded);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FinderError::provider(status.as_u16(), body));
        }

        parse_page(&body)
    }
}

#[derive(Deserialize)]
struct CseResponse {
    // absent or null both mean an empty page
    #[serde(default)]
    items: Option<Vec<CseItem>>,
}

#[derive(Deserialize)]
struct CseItem {
    link: Option<String>,
    image: Option<CseImage>,
}

#[derive(Deserialize)]
struct CseImage {
    #[serde(rename = "contextLink")]
    context_link: Option<String>,
}

/// Parses an API response body, dropping items without both links.
fn parse_page(body: &str) -> Result<Vec<ImageResult>> {
    let response: CseResponse = serde_json::from_str(body)
        .map_err(|e| FinderError::Parse(format!("Custom Search response: {e}")))?;

    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let page_url = item.image.and_then(|image| image.context_link);
            ImageResult::from_parts(item.link, page_url)
        })
        .collect())
}

#[async_trait]
impl ImageProvider for GoogleImages {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn collect(&self, query: &BrandQuery) -> Result<Vec<String>> {
        let mut collector = Collector::new(query.max_images);
        let pages = query.max_images.div_ceil(PAGE_SIZE);

        for search in &query.queries {
            if collector.is_full() {
                break;
            }
            info!("[Google] Searching for: \"{}\"", search.query);

            for page_idx in 0..pages {
                if collector.is_full() {
                    break;
                }
                let start = page_idx * PAGE_SIZE + 1;
                info!(
                    "[Google] Fetching results {} to {}",
                    start,
                    start + PAGE_SIZE - 1
                );

                let items = self.search_page(&search.query, PAGE_SIZE, start).await?;
                if items.is_empty() {
                    break;
                }

                for item in &items {
                    match collector.offer(item, &query.keywords) {
                        Admission::Accepted => {
                            info!(
                                "[Google] Collected: {} (page: {})",
                                item.image_url, item.page_url
                            );
                        }
                        Admission::Full => break,
                        skipped => debug!("[Google] Skipped {} ({:?})", item.image_url, skipped),
                    }
                }
            }
        }

        info!(
            "[Google] Collected {} URLs (target={})",
            collector.len(),
            query.max_images
        );
        Ok(collector.into_vec())
    }
}
