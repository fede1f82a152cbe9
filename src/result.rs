//! Image result types.

use serde::{Deserialize, Serialize};

/// A candidate ad image returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Direct URL of the image.
    pub image_url: String,
    /// URL of the page the image was found on.
    pub page_url: String,
}

impl ImageResult {
    /// Creates a new image result.
    pub fn new(image_url: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            page_url: page_url.into(),
        }
    }

    /// Builds a result from optional raw fields, dropping it when either is missing or empty.
    pub fn from_parts(image_url: Option<String>, page_url: Option<String>) -> Option<Self> {
        match (image_url, page_url) {
            (Some(image_url), Some(page_url)) if !image_url.is_empty() && !page_url.is_empty() => {
                Some(Self::new(image_url, page_url))
            }
            _ => None,
        }
    }
}
