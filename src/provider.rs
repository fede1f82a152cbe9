//! Image provider trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{BrandQuery, Result};

/// Configuration for an image provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name of the provider.
    pub name: String,
    /// Short identifier (e.g., "google" for the Custom Search API).
    pub shortcut: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            shortcut: String::new(),
            timeout: default_timeout(),
        }
    }
}

/// Trait for implementing image providers.
///
/// `collect` returns at most `query.max_images` deduplicated image URLs whose
/// hosting page mentions the brand. An `Err` means the whole attempt failed and
/// any partial output was discarded.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Returns the provider configuration.
    fn config(&self) -> &ProviderConfig;

    /// Collects image URLs for a brand.
    async fn collect(&self, query: &BrandQuery) -> Result<Vec<String>>;

    /// Returns the provider name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the provider shortcut.
    fn shortcut(&self) -> &str {
        &self.config().shortcut
    }
}
