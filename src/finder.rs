//! Provider orchestration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::engines::{BingImages, GoogleImages};
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::proxy::RenderProxyFetcher;
use crate::{BrandQuery, Credentials, FinderConfig, ImageProvider, Result};

/// Which providers a run will use, decided once from the configured credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderPlan {
    /// Try the primary provider, falling back on any failure.
    PrimaryThenFallback,
    /// Go straight to the fallback provider.
    FallbackOnly,
}

/// Finds ad images for a brand using a primary provider with a fallback.
///
/// The primary result is returned as-is on success. On failure its partial
/// output is discarded and the fallback starts from scratch; the fallback's
/// result, even if empty, is final.
pub struct AdFinder {
    primary: Option<Arc<dyn ImageProvider>>,
    fallback: Arc<dyn ImageProvider>,
}

impl AdFinder {
    /// Creates a finder that only uses the fallback provider.
    pub fn new<F: ImageProvider + 'static>(fallback: F) -> Self {
        Self {
            primary: None,
            fallback: Arc::new(fallback),
        }
    }

    /// Sets the primary provider.
    pub fn with_primary<P: ImageProvider + 'static>(mut self, primary: P) -> Self {
        self.primary = Some(Arc::new(primary));
        self
    }

    /// Wires the real providers from credentials and configuration.
    ///
    /// The primary provider is only created when both primary credentials are
    /// present. The fallback fetches through the rendering proxy when a proxy
    /// key is present and directly otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or a configured
    /// endpoint is malformed.
    pub fn from_config(credentials: &Credentials, config: &FinderConfig) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = match &credentials.proxy {
            Some(credential) => Arc::new(RenderProxyFetcher::new(
                &config.proxy_base_url,
                credential.clone(),
                config.proxy_timeout,
            )?),
            None => Arc::new(HttpFetcher::new(config.direct_timeout)?),
        };
        let mut finder = Self::new(BingImages::new(&config.bing_base_url, fetcher)?);

        if let Some(primary) = &credentials.primary {
            finder = finder.with_primary(GoogleImages::new(
                config.google_base_url.clone(),
                primary.clone(),
                config.primary_timeout,
            )?);
        }

        Ok(finder)
    }

    /// Returns the plan this finder will follow.
    pub fn plan(&self) -> FinderPlan {
        if self.primary.is_some() {
            FinderPlan::PrimaryThenFallback
        } else {
            FinderPlan::FallbackOnly
        }
    }

    /// Finds up to `max_images` deduplicated ad image URLs for a brand.
    ///
    /// Finding nothing is not an error: provider failures are logged and
    /// result in the fallback being used, and the worst case is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FinderError::InvalidQuery`] if the brand is blank.
    pub async fn find_ads(&self, brand: &str, max_images: usize) -> Result<Vec<String>> {
        let query = BrandQuery::new(brand, max_images)?;
        Ok(self.run(&query).await)
    }

    /// Runs the primary-then-fallback sequence for a prepared query.
    pub async fn run(&self, query: &BrandQuery) -> Vec<String> {
        let plan = self.plan();
        info!("Finding ads for \"{}\" ({:?})", query.brand, plan);

        if let (FinderPlan::PrimaryThenFallback, Some(primary)) = (plan, &self.primary) {
            info!("Attempting {}", primary.name());
            match primary.collect(query).await {
                Ok(urls) => return urls,
                Err(e) => warn!("{} failed, falling back to {}: {}", primary.name(), self.fallback.name(), e),
            }
        }

        info!("Using {}", self.fallback.name());
        match self.fallback.collect(query).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("{} failed: {}", self.fallback.name(), e);
                Vec::new()
            }
        }
    }
}

/// Finds ad images for a brand with the real providers.
///
/// # Errors
///
/// Returns an error only for a blank brand or when the providers cannot be
/// constructed; provider failures yield an empty or fallback result instead.
pub async fn find_ads(
    brand: &str,
    credentials: &Credentials,
    config: &FinderConfig,
) -> Result<Vec<String>> {
    AdFinder::from_config(credentials, config)?
        .find_ads(brand, config.max_images)
        .await
}
