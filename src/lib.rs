//! # print-ad-finder
//!
//! Finds print advertisement images for a brand.
//!
//! Candidate images come from the Google Custom Search image API when
//! credentials are configured, falling back to scraping Bing image search
//! (optionally through a rendering proxy) when they are not or when the API
//! fails. Every candidate must be hosted on a page whose URL mentions one of
//! the brand's words, and results are deduplicated and capped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use print_ad_finder::{find_ads, Credentials, FinderConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::from_raw(
//!         std::env::var("GOOGLE_API_KEY").ok().as_deref(),
//!         std::env::var("GOOGLE_CSE_ID").ok().as_deref(),
//!         std::env::var("SCRAPINGBEE_API_KEY").ok().as_deref(),
//!     );
//!     let config = FinderConfig::default().with_max_images(12);
//!
//!     for url in find_ads("Acme Co", &credentials, &config).await? {
//!         println!("{url}");
//!     }
//!     Ok(())
//! }
//! ```

mod collector;
mod config;
mod error;
mod finder;
mod matcher;
mod provider;
mod query;
mod result;

pub mod engines;
pub mod fetcher;
pub mod fetcher_http;
pub mod proxy;

pub use collector::{Admission, Collector};
pub use config::{
    Credentials, FinderConfig, PrimaryCredentials, ProxyCredential, MAX_IMAGE_CAP, MIN_IMAGE_CAP,
};
pub use error::{FinderError, Result};
pub use finder::{find_ads, AdFinder, FinderPlan};
pub use matcher::matches;
pub use provider::{ImageProvider, ProviderConfig};
pub use query::{BrandKeywords, BrandQuery, SearchQuery, AD_SUFFIXES};
pub use result::ImageResult;
