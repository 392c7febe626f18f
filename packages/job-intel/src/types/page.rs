//! Candidate pages returned by the search gateway.

use serde::{Deserialize, Serialize};

/// An unvalidated page from the search provider, pending
/// classification by the parser stage.
///
/// Ephemeral: never persisted individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePage {
    /// Page URL
    pub url: String,

    /// Page title, if the provider supplied one
    pub title: Option<String>,

    /// Raw page content as returned by the provider
    pub raw_content: String,
}

impl CandidatePage {
    /// Create a new candidate page.
    pub fn new(url: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            raw_content: raw_content.into(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Content truncated to `max_chars`, respecting char boundaries.
    ///
    /// Applied before the page is handed to the completion service to
    /// stay inside its input limits.
    pub fn truncated_content(&self, max_chars: usize) -> &str {
        match self.raw_content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.raw_content[..idx],
            None => &self.raw_content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_content_short_page() {
        let page = CandidatePage::new("https://example.com/job", "short content");
        assert_eq!(page.truncated_content(15_000), "short content");
    }

    #[test]
    fn test_truncated_content_caps_length() {
        let page = CandidatePage::new("https://example.com/job", "x".repeat(20_000));
        assert_eq!(page.truncated_content(15_000).len(), 15_000);
    }

    #[test]
    fn test_truncated_content_multibyte_boundary() {
        let page = CandidatePage::new("https://example.com/job", "héllo wörld");
        // Must not panic on a non-ASCII boundary
        assert_eq!(page.truncated_content(2), "hé");
    }
}
