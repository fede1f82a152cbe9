//! Provider credentials and finder configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FinderError, Result};

/// Smallest image cap a configuration may request.
pub const MIN_IMAGE_CAP: usize = 5;

/// Largest image cap a configuration may request.
pub const MAX_IMAGE_CAP: usize = 100;

/// Key material for the search API primary provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryCredentials {
    /// Custom Search JSON API key.
    pub api_key: String,
    /// Custom Search Engine id.
    pub cse_id: String,
}

/// API key for the page rendering proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCredential(pub String);

impl ProxyCredential {
    /// Returns the key.
    pub fn api_key(&self) -> &str {
        &self.0
    }
}

/// Optional credentials for each provider.
///
/// Presence decides eligibility: values are trimmed and empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub primary: Option<PrimaryCredentials>,
    pub proxy: Option<ProxyCredential>,
}

impl Credentials {
    /// Creates credentials with neither provider configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds credentials from raw, possibly blank, user input.
    pub fn from_raw(api_key: Option<&str>, cse_id: Option<&str>, proxy_key: Option<&str>) -> Self {
        let primary = match (non_blank(api_key), non_blank(cse_id)) {
            (Some(api_key), Some(cse_id)) => Some(PrimaryCredentials { api_key, cse_id }),
            _ => None,
        };

        Self {
            primary,
            proxy: non_blank(proxy_key).map(ProxyCredential),
        }
    }

    /// Sets the primary provider credentials.
    pub fn with_primary(mut self, api_key: &str, cse_id: &str) -> Self {
        self.primary = Self::from_raw(Some(api_key), Some(cse_id), None).primary;
        self
    }

    /// Sets the rendering proxy key.
    pub fn with_proxy(mut self, api_key: &str) -> Self {
        self.proxy = non_blank(Some(api_key)).map(ProxyCredential);
        self
    }

    /// Returns whether both primary credentials are present.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Returns whether a rendering proxy key is present.
    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Endpoints, timeouts and the default cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Maximum number of image URLs to return.
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    /// Custom Search JSON API endpoint.
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,
    /// Image search results page.
    #[serde(default = "default_bing_base_url")]
    pub bing_base_url: String,
    /// Rendering proxy endpoint.
    #[serde(default = "default_proxy_base_url")]
    pub proxy_base_url: String,
    /// Primary request timeout in seconds.
    #[serde(default = "default_primary_timeout")]
    pub primary_timeout: u64,
    /// Direct page fetch timeout in seconds.
    #[serde(default = "default_direct_timeout")]
    pub direct_timeout: u64,
    /// Proxy page fetch timeout in seconds.
    #[serde(default = "default_proxy_timeout")]
    pub proxy_timeout: u64,
}

fn default_max_images() -> usize {
    30
}

fn default_google_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_bing_base_url() -> String {
    "https://www.bing.com/images/search".to_string()
}

fn default_proxy_base_url() -> String {
    "https://app.scrapingbee.com/api/v1/".to_string()
}

fn default_primary_timeout() -> u64 {
    10
}

fn default_direct_timeout() -> u64 {
    10
}

// the proxy renders pages server-side
fn default_proxy_timeout() -> u64 {
    20
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
            google_base_url: default_google_base_url(),
            bing_base_url: default_bing_base_url(),
            proxy_base_url: default_proxy_base_url(),
            primary_timeout: default_primary_timeout(),
            direct_timeout: default_direct_timeout(),
            proxy_timeout: default_proxy_timeout(),
        }
    }
}

impl FinderConfig {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FinderError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] if the document is not valid or its
    /// cap is out of range.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| FinderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the cap lies within [`MIN_IMAGE_CAP`]..=[`MAX_IMAGE_CAP`].
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] naming the offending value.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_IMAGE_CAP..=MAX_IMAGE_CAP).contains(&self.max_images) {
            return Err(FinderError::Config(format!(
                "max_images must be between {} and {}, got {}",
                MIN_IMAGE_CAP, MAX_IMAGE_CAP, self.max_images
            )));
        }
        Ok(())
    }

    /// Sets the cap.
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images;
        self
    }
}
