//! Search gateway trait for external web discovery.
//!
//! Wraps the external search provider and normalizes its results into
//! candidate pages. A failed call is distinguishable from zero
//! results: the former is `Err`, the latter `Ok(vec![])`. The
//! searcher stage decides what to do with each.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::types::{directive::SearchDirective, page::CandidatePage};

/// Web search abstraction.
///
/// # Implementations
///
/// - `TavilySearch` - Tavily API
/// - `MockSearchGateway` - for testing (scripted batches)
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Execute a directive, returning up to `max_results` candidate
    /// pages in the provider's ranking order.
    async fn search(
        &self,
        directive: &SearchDirective,
        max_results: usize,
    ) -> GatewayResult<Vec<CandidatePage>>;
}
