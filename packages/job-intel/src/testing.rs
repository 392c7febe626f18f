//! Testing utilities including mock gateways.
//!
//! These make it possible to exercise full workflows without real
//! search or LLM calls: batches and completions are scripted, and
//! call counts are tracked for assertions.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{GatewayError, GatewayResult};
use crate::traits::{completion::CompletionGateway, search::SearchGateway};
use crate::types::{directive::SearchDirective, page::CandidatePage};

/// A scripted parser response for a valid active posting.
///
/// Convenience for tests that only care about the title.
pub fn parse_response_for(title: &str) -> String {
    format!(
        r#"{{"classification": "job_posting", "title": "{title}", "company": "Acme",
            "location": "Remote", "apply_url": "https://acme.example/apply",
            "posted_date": null}}"#
    )
}

enum ScriptedBatch {
    Pages(Vec<CandidatePage>),
    Failure,
}

/// Mock search gateway returning scripted batches in order.
///
/// Once the script is exhausted, further calls return zero results
/// (the provider "ran dry").
#[derive(Default)]
pub struct MockSearchGateway {
    script: Mutex<VecDeque<ScriptedBatch>>,
    calls: AtomicUsize,
}

impl MockSearchGateway {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful batch to the script.
    pub fn with_batch(self, pages: Vec<CandidatePage>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedBatch::Pages(pages));
        self
    }

    /// Append a gateway failure to the script.
    pub fn with_failure(self) -> Self {
        self.script.lock().unwrap().push_back(ScriptedBatch::Failure);
        self
    }

    /// Number of search calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchGateway for MockSearchGateway {
    async fn search(
        &self,
        _directive: &SearchDirective,
        max_results: usize,
    ) -> GatewayResult<Vec<CandidatePage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedBatch::Pages(mut pages)) => {
                pages.truncate(max_results);
                Ok(pages)
            }
            Some(ScriptedBatch::Failure) => Err(GatewayError::BadStatus {
                provider: "mock",
                status: 503,
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Mock completion gateway with needle-matched scripted responses.
///
/// The first scripted entry whose needle appears in the system or
/// user prompt is returned. Unmatched prompts yield a malformed
/// response error so tests never silently succeed on a missing
/// script. `failing_calls(n)` forces the next `n` calls to fail
/// regardless of the script, for exercising retry paths.
#[derive(Default)]
pub struct MockCompletionGateway {
    responses: Mutex<Vec<(String, String)>>,
    forced_failures: AtomicUsize,
    calls: AtomicUsize,
}

impl MockCompletionGateway {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for prompts containing `needle`.
    pub fn with_response(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Force the next `n` calls to fail with a gateway error.
    pub fn failing_calls(self, n: usize) -> Self {
        self.forced_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Number of completion calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, system: &str, user: &str) -> GatewayResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.forced_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.forced_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(GatewayError::BadStatus {
                provider: "mock",
                status: 503,
            });
        }

        let responses = self.responses.lock().unwrap();
        for (needle, response) in responses.iter() {
            if system.contains(needle.as_str()) || user.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }
        Err(GatewayError::MalformedResponse {
            provider: "mock",
            reason: "no scripted response matched the prompt".to_string(),
        })
    }
}

#[async_trait]
impl CompletionGateway for MockCompletionGateway {
    async fn complete(&self, system: &str, user: &str) -> GatewayResult<String> {
        self.respond(system, user)
    }

    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        _schema: serde_json::Value,
    ) -> GatewayResult<String> {
        self.respond(system, user)
    }
}
