//! Brand keyword relevance check.

/// Returns whether `page_url` mentions any of `keywords`.
///
/// The URL is lower-cased and each keyword is tested as a literal substring.
/// Keywords are expected to already be lower-case. An empty keyword set never
/// matches, and empty keywords are ignored so they cannot match every URL.
pub fn matches<S: AsRef<str>>(page_url: &str, keywords: &[S]) -> bool {
    let page_lower = page_url.to_lowercase();
    keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|kw| !kw.is_empty())
        .any(|kw| page_lower.contains(kw))
}
