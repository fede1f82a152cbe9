//! Deduplicating, capped accumulation of image URLs.

use std::collections::HashSet;

use crate::{BrandKeywords, ImageResult};

/// Outcome of offering a result to a [`Collector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The image URL was added.
    Accepted,
    /// The hosting page does not mention the brand.
    Irrelevant,
    /// The image URL was already collected.
    Duplicate,
    /// The cap was already reached.
    Full,
}

/// Accumulates image URLs for a single run.
///
/// `ordered` never holds the same URL twice and never grows past `max_images`.
#[derive(Debug)]
pub struct Collector {
    seen: HashSet<String>,
    ordered: Vec<String>,
    max_images: usize,
}

impl Collector {
    /// Creates an empty collector with the given cap.
    pub fn new(max_images: usize) -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
            max_images,
        }
    }

    /// Returns whether the cap has been reached.
    pub fn is_full(&self) -> bool {
        self.ordered.len() >= self.max_images
    }

    /// Returns the number of collected URLs.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the cap.
    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// Adds an image URL unless it is a duplicate or the cap is reached.
    pub fn insert(&mut self, image_url: &str) -> Admission {
        if self.is_full() {
            return Admission::Full;
        }
        if self.seen.contains(image_url) {
            return Admission::Duplicate;
        }
        self.seen.insert(image_url.to_string());
        self.ordered.push(image_url.to_string());
        Admission::Accepted
    }

    /// Applies the relevance filter then the dedup/cap policy to a result.
    pub fn offer(&mut self, result: &ImageResult, keywords: &BrandKeywords) -> Admission {
        if self.is_full() {
            return Admission::Full;
        }
        if !keywords.matches(&result.page_url) {
            return Admission::Irrelevant;
        }
        self.insert(&result.image_url)
    }

    /// Returns the collected URLs in insertion order.
    pub fn items(&self) -> &[String] {
        &self.ordered
    }

    /// Consumes the collector, returning the collected URLs.
    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
