//! The search-provider-facing directive produced by the planner.

use serde::{Deserialize, Serialize};

/// A search directive: query string plus scoping hints.
///
/// Derived deterministically from a `SearchRequest`; the refiner may
/// produce augmented copies, never mutate one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDirective {
    /// The provider-facing query string
    pub query: String,

    /// Preferred job-board domains (empty = whole web)
    #[serde(default)]
    pub include_domains: Vec<String>,

    /// Recency window in days (`None` = no restriction)
    pub window_days: Option<u32>,
}

impl SearchDirective {
    /// Create a directive from a bare query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_domains: Vec::new(),
            window_days: None,
        }
    }

    /// Scope to preferred domains.
    pub fn with_domains(mut self, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_domains = domains.into_iter().map(|d| d.into()).collect();
        self
    }

    /// Set the recency window.
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = Some(days);
        self
    }

    /// Broadened copy: extra terms appended, domain scoping dropped.
    ///
    /// Used by the refiner; dropping the scoping is what actually
    /// widens the net when the job boards came up dry.
    pub fn broadened(&self, extra_terms: &str) -> Self {
        Self {
            query: format!("{} {}", self.query, extra_terms),
            include_domains: Vec::new(),
            window_days: self.window_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadened_appends_and_unscopes() {
        let directive = SearchDirective::new("\"Backend Engineer\" jobs")
            .with_domains(["greenhouse.io"])
            .with_window_days(7);

        let broadened = directive.broadened("remote hiring now");
        assert!(broadened.query.contains("remote hiring now"));
        assert!(broadened.include_domains.is_empty());
        assert_eq!(broadened.window_days, Some(7));

        // Original untouched
        assert_eq!(directive.include_domains.len(), 1);
    }
}
