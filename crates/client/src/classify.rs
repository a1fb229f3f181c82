// ABOUTME: Classifies a fetched page as detail, search results, or unrecognized from its resolved path.
// ABOUTME: The site redirects unambiguous searches straight to the movie page, so the path decides the extractor.

use once_cell::sync::Lazy;
use regex::Regex;

static DETAIL_PAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\w{2}/film(\d+)\.html$").unwrap());

static SEARCH_PAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/\w{2}/search\.php.*$").unwrap());

/// Which layout a fetched page has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A single movie page, with the id taken from the path.
    Detail { id: u64 },
    SearchResults,
    Unrecognized,
}

/// Classify a resolved request path (path plus query string).
pub fn classify(resolved_path: &str) -> PageKind {
    if let Some(caps) = DETAIL_PAGE_RE.captures(resolved_path) {
        if let Some(id) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
            return PageKind::Detail { id };
        }
    }
    if SEARCH_PAGE_RE.is_match(resolved_path) {
        return PageKind::SearchResults;
    }
    PageKind::Unrecognized
}
