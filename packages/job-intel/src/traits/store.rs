//! Query record store trait.
//!
//! The store is the single source of truth for workflow status: the
//! engine persists every transition here before running the next
//! stage, so a concurrent poll always observes a committed state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::types::{
    job::JobPost,
    query::{QueryStatus, SearchQuery},
    summary::MarketSummary,
};

/// Persistence contract for search queries, job posts, and summaries.
///
/// Implementations must support concurrent access keyed by distinct
/// query ids without cross-query interference. All writes are atomic
/// per call: a reader never observes a half-updated record.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Persist a newly submitted query. Idempotent on the query id.
    async fn create(&self, query: SearchQuery) -> StoreResult<()>;

    /// Point lookup by id. `Ok(None)` for unknown ids.
    async fn get(&self, id: Uuid) -> StoreResult<Option<SearchQuery>>;

    /// Atomically update status and, for failures, the reason string.
    ///
    /// Passing `error: None` clears any previously recorded reason.
    async fn update_status(
        &self,
        id: Uuid,
        status: QueryStatus,
        error: Option<String>,
    ) -> StoreResult<()>;

    /// Record the current retry counter.
    async fn set_retries(&self, id: Uuid, retries: u32) -> StoreResult<()>;

    /// Append a diagnostic note for a partial failure.
    async fn record_failure_note(&self, id: Uuid, note: String) -> StoreResult<()>;

    /// Append job posts for a query.
    async fn append_job_posts(&self, id: Uuid, posts: &[JobPost]) -> StoreResult<()>;

    /// Set the one summary for a query (idempotent upsert).
    async fn set_summary(&self, id: Uuid, summary: &MarketSummary) -> StoreResult<()>;

    /// All job posts recorded for a query.
    async fn job_posts(&self, id: Uuid) -> StoreResult<Vec<JobPost>>;

    /// The summary for a query, if one has been set.
    async fn summary(&self, id: Uuid) -> StoreResult<Option<MarketSummary>>;
}
