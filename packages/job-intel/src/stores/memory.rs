//! In-memory query store.
//!
//! Each map write happens under a single lock acquisition, so a
//! concurrent reader always observes a fully committed record.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::QueryStore;
use crate::types::{
    job::JobPost,
    query::{QueryStatus, SearchQuery},
    summary::MarketSummary,
};

/// In-memory storage for queries, job posts, and summaries.
///
/// Suitable for tests, development, and single-process deployments;
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    queries: RwLock<HashMap<Uuid, SearchQuery>>,
    posts: RwLock<HashMap<Uuid, Vec<JobPost>>>,
    summaries: RwLock<HashMap<Uuid, MarketSummary>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored queries.
    pub fn query_count(&self) -> usize {
        self.queries.read().unwrap().len()
    }
}

#[async_trait]
impl QueryStore for MemoryStore {
    async fn create(&self, query: SearchQuery) -> StoreResult<()> {
        self.queries.write().unwrap().insert(query.id, query);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<SearchQuery>> {
        Ok(self.queries.read().unwrap().get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: QueryStatus,
        error: Option<String>,
    ) -> StoreResult<()> {
        let mut queries = self.queries.write().unwrap();
        let query = queries
            .get_mut(&id)
            .ok_or(StoreError::QueryNotFound { id })?;
        query.status = status;
        query.error_message = error;
        Ok(())
    }

    async fn set_retries(&self, id: Uuid, retries: u32) -> StoreResult<()> {
        let mut queries = self.queries.write().unwrap();
        let query = queries
            .get_mut(&id)
            .ok_or(StoreError::QueryNotFound { id })?;
        query.retries = retries;
        Ok(())
    }

    async fn record_failure_note(&self, id: Uuid, note: String) -> StoreResult<()> {
        let mut queries = self.queries.write().unwrap();
        let query = queries
            .get_mut(&id)
            .ok_or(StoreError::QueryNotFound { id })?;
        query.failure_notes.push(note);
        Ok(())
    }

    async fn append_job_posts(&self, id: Uuid, posts: &[JobPost]) -> StoreResult<()> {
        self.posts
            .write()
            .unwrap()
            .entry(id)
            .or_default()
            .extend_from_slice(posts);
        Ok(())
    }

    async fn set_summary(&self, id: Uuid, summary: &MarketSummary) -> StoreResult<()> {
        self.summaries.write().unwrap().insert(id, summary.clone());
        Ok(())
    }

    async fn job_posts(&self, id: Uuid) -> StoreResult<Vec<JobPost>> {
        Ok(self.posts.read().unwrap().get(&id).cloned().unwrap_or_default())
    }

    async fn summary(&self, id: Uuid) -> StoreResult<Option<MarketSummary>> {
        Ok(self.summaries.read().unwrap().get(&id).cloned())
    }
}
