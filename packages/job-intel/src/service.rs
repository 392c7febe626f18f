//! Submission and status-polling service.
//!
//! Submission returns a query id immediately; the workflow runs as a
//! detached background task keyed by that id, with the store as the
//! single source of truth for progress. The caller observes the run
//! only by polling.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::gateways::{OpenAiCompletion, TavilySearch};
use crate::stores::MemoryStore;
use crate::traits::{
    completion::CompletionGateway, search::SearchGateway, store::QueryStore,
};
use crate::types::{
    job::JobPost,
    query::{QueryStatus, SearchQuery},
    request::SearchRequest,
    summary::MarketSummary,
};
use crate::workflow::WorkflowEngine;

/// Point-in-time view of a query, as returned to pollers.
///
/// Posts and summary are populated only once the query is COMPLETE,
/// so no partial result set is ever exposed.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Query identifier
    pub id: Uuid,

    /// Current status
    pub status: QueryStatus,

    /// Failure reason, present only when status is FAILED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Search retries taken so far
    pub retries: u32,

    /// Partial-failure diagnostics (rejected pages, failed attempts)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_notes: Vec<String>,

    /// Final job post set, once COMPLETE
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub job_posts: Vec<JobPost>,

    /// Market summary, once COMPLETE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MarketSummary>,
}

/// The job intel agent: submit requests, poll for results.
#[derive(Clone)]
pub struct JobIntel {
    store: Arc<dyn QueryStore>,
    engine: Arc<WorkflowEngine>,
}

impl JobIntel {
    /// Assemble an agent from explicit collaborators.
    pub fn new(
        store: Arc<dyn QueryStore>,
        search: Arc<dyn SearchGateway>,
        completion: Arc<dyn CompletionGateway>,
        config: &AgentConfig,
    ) -> Self {
        let engine = Arc::new(WorkflowEngine::new(
            store.clone(),
            search,
            completion,
            config.limits.clone(),
        ));
        Self { store, engine }
    }

    /// Assemble an agent with the default collaborators: Tavily
    /// search, OpenAI completions, in-memory store.
    pub fn from_config(config: &AgentConfig) -> Self {
        let store: Arc<dyn QueryStore> = Arc::new(MemoryStore::new());
        let search: Arc<dyn SearchGateway> = Arc::new(TavilySearch::new(
            config.tavily_api_key.expose(),
            config.limits.request_timeout,
        ));
        let completion: Arc<dyn CompletionGateway> = Arc::new(OpenAiCompletion::new(
            config.openai_api_key.expose(),
            &config.model,
            config.limits.request_timeout,
        ).with_base_url(&config.openai_base_url));

        Self::new(store, search, completion, config)
    }

    /// Submit a search request.
    ///
    /// Validates, persists a PENDING query, spawns the workflow, and
    /// returns the query id without waiting for completion.
    pub async fn submit(&self, request: SearchRequest) -> Result<Uuid> {
        request.validate()?;

        let query = SearchQuery::new(request);
        let id = query.id;
        self.store.create(query).await?;
        info!(query_id = %id, "search query submitted");

        let engine = self.engine.clone();
        tokio::spawn(async move {
            engine.run(id).await;
        });

        Ok(id)
    }

    /// Current status for a query; `Ok(None)` for unknown ids.
    ///
    /// Re-reading a COMPLETE query returns identical post and summary
    /// data on every call: the record is immutable once terminal.
    pub async fn status(&self, id: Uuid) -> Result<Option<StatusReport>> {
        let Some(query) = self.store.get(id).await? else {
            return Ok(None);
        };

        let (job_posts, summary) = if query.status == QueryStatus::Complete {
            (
                self.store.job_posts(id).await?,
                self.store.summary(id).await?,
            )
        } else {
            (Vec::new(), None)
        };

        Ok(Some(StatusReport {
            id,
            status: query.status,
            error_message: query.error_message,
            retries: query.retries,
            failure_notes: query.failure_notes,
            job_posts,
            summary,
        }))
    }
}
