//! Bing image search provider.
//!
//! Scrapes the Bing images results page for each brand phrasing. Every result
//! anchor (`a.iusc`) carries an `m` attribute holding JSON metadata with the
//! image URL (`murl`) and hosting page URL (`purl`).
//!
//! Failures only ever skip the phrasing being fetched, so `collect` never
//! returns an error.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::collector::{Admission, Collector};
use crate::fetcher::PageFetcher;
use crate::{BrandQuery, FinderError, ImageProvider, ImageResult, ProviderConfig, Result};

/// Fallback image provider that scrapes Bing's image results page.
pub struct BingImages {
    config: ProviderConfig,
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
}

#[derive(Deserialize)]
struct AnchorMetadata {
    murl: Option<String>,
    purl: Option<String>,
}

impl BingImages {
    /// Creates a provider that fetches result pages with the given fetcher.
    ///
    /// The reported timeout is the one the fetcher enforces.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::UrlParse`] if `base_url` is malformed.
    pub fn new(base_url: &str, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Ok(Self {
            config: Self::default_config(fetcher.timeout_secs()),
            fetcher,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Returns the configuration `new` uses.
    pub fn default_config(timeout_secs: u64) -> ProviderConfig {
        ProviderConfig {
            name: "Bing Images".to_string(),
            shortcut: "bing".to_string(),
            timeout: timeout_secs,
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the results page URL for a phrase, with spaces encoded as `+`.
    pub fn search_url(&self, phrase: &str) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().clear().append_pair("q", phrase);
        url.to_string()
    }

    fn parse_results(&self, html: &str) -> Result<Vec<ImageResult>> {
        let document = Html::parse_document(html);

        let anchor_selector = Selector::parse("a.iusc")
            .map_err(|e| FinderError::Parse(format!("Failed to parse selector: {:?}", e)))?;

        let anchors: Vec<_> = document.select(&anchor_selector).collect();
        info!("[Bing] Found {} result anchors", anchors.len());

        let mut results = Vec::new();
        for anchor in anchors {
            let Some(raw) = anchor.value().attr("m").filter(|m| !m.is_empty()) else {
                continue;
            };

            let metadata: AnchorMetadata = match serde_json::from_str(raw) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!("[Bing] Skipping anchor with malformed metadata: {}", e);
                    continue;
                }
            };

            if let Some(result) = ImageResult::from_parts(metadata.murl, metadata.purl) {
                results.push(result);
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl ImageProvider for BingImages {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn collect(&self, query: &BrandQuery) -> Result<Vec<String>> {
        let mut collector = Collector::new(query.max_images);

        for search in &query.queries {
            if collector.is_full() {
                break;
            }

            let url = self.search_url(&search.query);
            info!("[Bing] Fetching via {}: {}", self.fetcher.label(), url);

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    error!("[Bing] Failed to fetch {}: {}", url, e);
                    continue;
                }
            };

            let items = match self.parse_results(&html) {
                Ok(items) => items,
                Err(e) => {
                    error!("[Bing] Failed to parse {}: {}", url, e);
                    continue;
                }
            };

            for item in &items {
                match collector.offer(item, &query.keywords) {
                    Admission::Accepted => {
                        info!("[Bing] Collected: {} (page: {})", item.image_url, item.page_url);
                    }
                    Admission::Full => break,
                    skipped => debug!("[Bing] Skipped {} ({:?})", item.image_url, skipped),
                }
            }

            info!(
                "[Bing] Collected {} URLs so far (target={})",
                collector.len(),
                query.max_images
            );
        }

        Ok(collector.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages keyed by phrase; unknown phrases fail.
    struct ScriptedFetcher {
        pages: HashMap<String, std::result::Result<String, u16>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn page(mut self, phrase: &str, html: String) -> Self {
            self.pages.insert(phrase.to_string(), Ok(html));
            self
        }

        fn failing(mut self, phrase: &str, status: u16) -> Self {
            self.pages.insert(phrase.to_string(), Err(status));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let phrase = Url::parse(url)
                .unwrap()
                .query_pairs()
                .find(|(k, _)| k == "q")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            self.requested.lock().unwrap().push(phrase.clone());
            match self.pages.get(&phrase) {
                Some(Ok(html)) => Ok(html.clone()),
                Some(Err(status)) => Err(FinderError::provider(*status, "blocked")),
                None => Err(FinderError::provider(404, "not found")),
            }
        }

        fn label(&self) -> &str {
            "scripted"
        }

        fn timeout_secs(&self) -> u64 {
            7
        }
    }

    fn anchor(murl: &str, purl: &str) -> String {
        format!(
            r#"<a class="iusc" m='{{"murl":"{murl}","purl":"{purl}","turl":"http://thumb"}}' href="/images/x"></a>"#
        )
    }

    fn page(anchors: &[String]) -> String {
        format!("<html><body><div>{}</div></body></html>", anchors.join(""))
    }

    fn provider(fetcher: Arc<ScriptedFetcher>) -> BingImages {
        BingImages::new("https://www.bing.com/images/search", fetcher).unwrap()
    }

    #[test]
    fn test_bing_images_new() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        assert_eq!(engine.name(), "Bing Images");
        assert_eq!(engine.shortcut(), "bing");
        let defaults = BingImages::default_config(7);
        assert_eq!(engine.name(), defaults.name);
        assert_eq!(engine.shortcut(), defaults.shortcut);
    }

    #[test]
    fn test_timeout_comes_from_fetcher() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        assert_eq!(engine.config().timeout, 7);

        let direct = Arc::new(crate::fetcher_http::HttpFetcher::new(12).unwrap());
        let engine = BingImages::new("https://www.bing.com/images/search", direct).unwrap();
        assert_eq!(engine.config().timeout, 12);
    }

    #[test]
    fn test_bing_images_with_config() {
        let config = ProviderConfig {
            name: "Custom Bing".to_string(),
            ..Default::default()
        };
        let engine = provider(Arc::new(ScriptedFetcher::new())).with_config(config);
        assert_eq!(engine.name(), "Custom Bing");
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let result = BingImages::new("::", Arc::new(ScriptedFetcher::new()));
        assert!(matches!(result, Err(FinderError::UrlParse(_))));
    }

    #[test]
    fn test_search_url_encodes_phrase() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        assert_eq!(
            engine.search_url("Acme & Co print ad"),
            "https://www.bing.com/images/search?q=Acme+%26+Co+print+ad"
        );
    }

    #[test]
    fn test_parse_results_empty() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        let results = engine.parse_results("<html><body></body></html>").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_results_with_data() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        let html = page(&[
            anchor("http://y/1.png", "http://acme.co/a"),
            anchor("http://y/2.png", "http://acme.co/b"),
        ]);
        let results = engine.parse_results(&html).unwrap();
        assert_eq!(
            results,
            vec![
                ImageResult::new("http://y/1.png", "http://acme.co/a"),
                ImageResult::new("http://y/2.png", "http://acme.co/b"),
            ]
        );
    }

    #[test]
    fn test_parse_results_skips_bad_anchors() {
        let engine = provider(Arc::new(ScriptedFetcher::new()));
        let html = r#"
        <html><body>
        <a class="iusc" href="/no-metadata"></a>
        <a class="iusc" m="">empty</a>
        <a class="iusc" m="{not json">broken</a>
        <a class="iusc" m='{"murl":"http://y/1.png"}'>no purl</a>
        <a class="iusc" m='{"purl":"http://acme.co/"}'>no murl</a>
        <a class="other" m='{"murl":"http://y/9.png","purl":"http://acme.co/"}'>wrong class</a>
        <a class="iusc" m='{"murl":"http://y/2.png","purl":"http://acme.co/"}'>good</a>
        </body></html>
        "#;
        let results = engine.parse_results(html).unwrap();
        assert_eq!(results, vec![ImageResult::new("http://y/2.png", "http://acme.co/")]);
    }

    #[tokio::test]
    async fn test_collect_filters_non_matching_pages() {
        let fetcher = Arc::new(ScriptedFetcher::new().page(
            "Acme Co newspaper ad",
            page(&[anchor("http://y/2.png", "http://notmatching.example/")]),
        ));
        let query = BrandQuery::new("Acme Co", 30).unwrap();
        let urls = provider(fetcher).collect(&query).await.unwrap();
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_collect_accumulates_across_all_phrasings() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .page("Acme newspaper ad", page(&[anchor("http://y/1.png", "http://acme.co/")]))
                .page(
                    "Acme magazine ad",
                    page(&[
                        anchor("http://y/1.png", "http://acme.co/again"),
                        anchor("http://y/2.png", "http://acme.co/"),
                    ]),
                )
                .page("Acme print ad", page(&[anchor("http://y/3.png", "http://acme.co/")]))
                .page(
                    "Acme social media ad",
                    page(&[anchor("http://y/4.png", "http://acme.co/")]),
                ),
        );
        let query = BrandQuery::new("Acme", 30).unwrap();
        let urls = provider(Arc::clone(&fetcher)).collect(&query).await.unwrap();
        assert_eq!(
            urls,
            vec!["http://y/1.png", "http://y/2.png", "http://y/3.png", "http://y/4.png"]
        );
        assert_eq!(fetcher.requested().len(), 4);
    }

    #[tokio::test]
    async fn test_collect_failure_only_skips_that_phrase() {
        let fetcher = Arc::new(
            ScriptedFetcher::new()
                .failing("Acme newspaper ad", 500)
                .page("Acme magazine ad", page(&[anchor("http://y/1.png", "http://acme.co/")])),
        );
        let query = BrandQuery::new("Acme", 30).unwrap();
        let urls = provider(Arc::clone(&fetcher)).collect(&query).await.unwrap();
        assert_eq!(urls, vec!["http://y/1.png"]);
        assert_eq!(
            fetcher.requested(),
            vec![
                "Acme newspaper ad",
                "Acme magazine ad",
                "Acme print ad",
                "Acme social media ad",
            ]
        );
    }

    #[tokio::test]
    async fn test_collect_stops_once_cap_reached() {
        let anchors: Vec<_> = (0..5)
            .map(|i| anchor(&format!("http://y/{i}.png"), "http://acme.co/"))
            .collect();
        let fetcher = Arc::new(ScriptedFetcher::new().page("Acme newspaper ad", page(&anchors)));
        let query = BrandQuery::new("Acme", 3).unwrap();
        let urls = provider(Arc::clone(&fetcher)).collect(&query).await.unwrap();
        assert_eq!(urls, vec!["http://y/0.png", "http://y/1.png", "http://y/2.png"]);
        assert_eq!(fetcher.requested(), vec!["Acme newspaper ad"]);
    }
}
