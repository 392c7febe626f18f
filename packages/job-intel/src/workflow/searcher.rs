//! Searcher stage: one gateway call per invocation.
//!
//! Emptiness is a normal, inspectable outcome here: a failed gateway
//! call is logged, noted, and surfaced as an empty batch so the
//! refiner can decide what happens next.

use tracing::{info, warn};

use crate::traits::search::SearchGateway;
use crate::types::{directive::SearchDirective, page::CandidatePage};

/// Result of one searcher invocation.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Candidate pages in provider ranking order, capped at the
    /// configured maximum.
    pub pages: Vec<CandidatePage>,

    /// Diagnostic note when the gateway call itself failed.
    pub failure: Option<String>,
}

/// Execute a directive against the search gateway.
pub async fn run(
    gateway: &dyn SearchGateway,
    directive: &SearchDirective,
    max_results: usize,
) -> SearchOutcome {
    match gateway.search(directive, max_results).await {
        Ok(mut pages) => {
            pages.truncate(max_results);
            info!(count = pages.len(), query = %directive.query, "search returned candidates");
            SearchOutcome {
                pages,
                failure: None,
            }
        }
        Err(e) => {
            warn!(query = %directive.query, error = %e, "search gateway call failed");
            SearchOutcome {
                pages: Vec::new(),
                failure: Some(format!("search_error: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearchGateway;

    #[tokio::test]
    async fn test_gateway_failure_yields_empty_not_error() {
        let gateway = MockSearchGateway::new().with_failure();
        let outcome = run(&gateway, &SearchDirective::new("q"), 10).await;
        assert!(outcome.pages.is_empty());
        assert!(outcome.failure.is_some());
    }

    #[tokio::test]
    async fn test_results_capped_and_ordered() {
        let gateway = MockSearchGateway::new().with_batch(vec![
            CandidatePage::new("https://a.com", "a"),
            CandidatePage::new("https://b.com", "b"),
            CandidatePage::new("https://c.com", "c"),
        ]);

        let outcome = run(&gateway, &SearchDirective::new("q"), 2).await;
        assert_eq!(outcome.pages.len(), 2);
        assert_eq!(outcome.pages[0].url, "https://a.com");
        assert_eq!(outcome.pages[1].url, "https://b.com");
        assert!(outcome.failure.is_none());
    }
}
