//! Workflow engine: the state machine that sequences the stages.
//!
//! Every transition is persisted to the store before the next stage
//! runs, so a concurrent poll always observes a committed status.
//! Fatal errors (store writes, analysis after its retry) move the
//! query to FAILED with a recorded reason; the workflow never resumes
//! from FAILED.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::WorkflowLimits;
use crate::error::{AgentError, Result, StoreError};
use crate::traits::{
    completion::CompletionGateway, search::SearchGateway, store::QueryStore,
};
use crate::types::{page::CandidatePage, query::QueryStatus};
use crate::workflow::{analyzer, parser, planner, refiner, searcher, RefinerDecision};

/// Drives one search query from PENDING to COMPLETE or FAILED.
///
/// Engines are cheap to clone behind `Arc` and hold no per-query
/// state: workflows for distinct queries are fully independent.
pub struct WorkflowEngine {
    store: Arc<dyn QueryStore>,
    search: Arc<dyn SearchGateway>,
    completion: Arc<dyn CompletionGateway>,
    limits: WorkflowLimits,
}

impl WorkflowEngine {
    /// Create a new engine.
    pub fn new(
        store: Arc<dyn QueryStore>,
        search: Arc<dyn SearchGateway>,
        completion: Arc<dyn CompletionGateway>,
        limits: WorkflowLimits,
    ) -> Self {
        Self {
            store,
            search,
            completion,
            limits,
        }
    }

    /// Run the workflow for a submitted query to its terminal state.
    ///
    /// Never returns an error: a fatal error is recorded on the query
    /// as FAILED. A store failure while recording the failure itself
    /// can only be logged.
    pub async fn run(&self, id: Uuid) {
        if let Err(e) = self.drive(id).await {
            error!(query_id = %id, error = %e, "workflow failed");
            // A record that already reached a terminal state must not
            // be overwritten, even by the failure path.
            match self.store.get(id).await {
                Ok(Some(query)) if !query.status.is_terminal() => {
                    if let Err(store_err) = self
                        .store
                        .update_status(id, QueryStatus::Failed, Some(e.to_string()))
                        .await
                    {
                        error!(query_id = %id, error = %store_err, "could not record failure status");
                    }
                }
                Ok(_) => {}
                Err(store_err) => {
                    error!(query_id = %id, error = %store_err, "could not record failure status");
                }
            }
        }
    }

    async fn drive(&self, id: Uuid) -> Result<()> {
        let query = self
            .store
            .get(id)
            .await?
            .ok_or(StoreError::QueryNotFound { id })?;

        info!(query_id = %id, job_title = %query.request.job_title, "starting workflow");
        self.transition(id, QueryStatus::Planning).await?;
        let mut directive = planner::build_directive(&query.request);

        // Candidates are deduplicated by URL across retry batches;
        // first occurrence wins, so provider order of the earliest
        // batch is preserved.
        let mut candidates: IndexMap<String, CandidatePage> = IndexMap::new();
        let mut retries = 0u32;

        loop {
            self.transition(id, QueryStatus::Searching).await?;
            let outcome = searcher::run(self.search.as_ref(), &directive, self.limits.max_results).await;
            if let Some(note) = outcome.failure {
                self.store.record_failure_note(id, note).await?;
            }
            for page in outcome.pages {
                candidates.entry(page.url.clone()).or_insert(page);
            }

            self.transition(id, QueryStatus::Refining).await?;
            match refiner::decide(candidates.len(), retries, &directive, &self.limits) {
                RefinerDecision::Proceed => break,
                RefinerDecision::Retry(augmented) => {
                    retries += 1;
                    self.store.set_retries(id, retries).await?;
                    info!(query_id = %id, retries, query = %augmented.query, "broadening search");
                    directive = augmented;
                }
            }
        }

        self.transition(id, QueryStatus::Parsing).await?;
        let pages: Vec<CandidatePage> = candidates.into_values().collect();
        let parsed = parser::parse_pages(self.completion.as_ref(), id, &pages, &self.limits).await;
        for note in parsed.error_notes {
            self.store.record_failure_note(id, note).await?;
        }
        if !parsed.posts.is_empty() {
            self.store.append_job_posts(id, &parsed.posts).await?;
        }

        self.transition(id, QueryStatus::Analyzing).await?;
        let summary = analyzer::analyze(self.completion.as_ref(), id, &parsed.posts)
            .await
            .map_err(AgentError::Analysis)?;
        self.store.set_summary(id, &summary).await?;

        self.transition(id, QueryStatus::Complete).await?;
        info!(query_id = %id, posts = parsed.posts.len(), "workflow complete");
        Ok(())
    }

    /// Persist a status move after checking it against the state
    /// machine's legality rules.
    async fn transition(&self, id: Uuid, status: QueryStatus) -> Result<()> {
        let current = self
            .store
            .get(id)
            .await?
            .ok_or(StoreError::QueryNotFound { id })?;
        if !current.status.can_transition_to(status) {
            return Err(AgentError::IllegalTransition {
                from: current.status,
                to: status,
            });
        }
        info!(query_id = %id, status = %status, "status transition");
        self.store.update_status(id, status, None).await?;
        Ok(())
    }
}
