//! Brand query representation.

use serde::{Deserialize, Serialize};

use crate::{matcher, FinderError, Result};

/// Suffixes combined with the brand name, in the order they are searched.
pub const AD_SUFFIXES: [&str; 4] = ["newspaper ad", "magazine ad", "print ad", "social media ad"];

/// A single search phrase sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub query: String,
}

impl SearchQuery {
    /// Creates a new search query with the given terms.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Returns the ad phrasings for a brand, earliest-tried first.
    pub fn for_brand(brand: &str) -> Vec<Self> {
        AD_SUFFIXES
            .iter()
            .map(|suffix| Self::new(format!("{brand} {suffix}")))
            .collect()
    }
}

/// Lower-cased whitespace tokens of a brand name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandKeywords(Vec<String>);

impl BrandKeywords {
    /// Derives keywords from a brand name.
    pub fn from_brand(brand: &str) -> Self {
        let mut keywords: Vec<String> = Vec::new();
        for word in brand.split_whitespace() {
            let word = word.to_lowercase();
            if !keywords.contains(&word) {
                keywords.push(word);
            }
        }
        Self(keywords)
    }

    /// Returns whether the hosting page URL mentions the brand.
    pub fn matches(&self, page_url: &str) -> bool {
        matcher::matches(page_url, self.0.as_slice())
    }

    /// Returns the keywords.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns whether there are no keywords.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything a provider needs for one "find ads for brand X" run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandQuery {
    /// Trimmed brand name.
    pub brand: String,
    /// Relevance keywords derived from the brand.
    pub keywords: BrandKeywords,
    /// Search phrases, in the order they are tried.
    pub queries: Vec<SearchQuery>,
    /// Maximum number of image URLs to return.
    pub max_images: usize,
}

impl BrandQuery {
    /// Builds the query set for a brand.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidQuery`] if the brand is blank.
    pub fn new(brand: &str, max_images: usize) -> Result<Self> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(FinderError::InvalidQuery("Brand name cannot be empty".into()));
        }

        Ok(Self {
            brand: brand.to_string(),
            keywords: BrandKeywords::from_brand(brand),
            queries: SearchQuery::for_brand(brand),
            max_images,
        })
    }
}
