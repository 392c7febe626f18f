//! Analyzer stage: one aggregate completion call over all posts.
//!
//! The only stage permitted an internal retry beyond the refiner
//! loop: the call is attempted at most twice with the same input,
//! then the failure is surfaced to the engine.

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{GatewayError, GatewayResult};
use crate::traits::completion::CompletionGateway;
use crate::types::{job::JobPost, summary::MarketSummary};
use crate::workflow::prompts;

/// Completion response shape for the market analysis.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    top_skills: Vec<String>,
    #[serde(default)]
    top_tech_stacks: Vec<String>,
    #[serde(default)]
    summary_text: String,
}

/// Produce the market summary for a query's job post set.
///
/// An empty post set yields an explanatory empty summary without
/// calling the gateway; persistence is never skipped.
pub async fn analyze(
    completion: &dyn CompletionGateway,
    query_id: Uuid,
    posts: &[JobPost],
) -> GatewayResult<MarketSummary> {
    if posts.is_empty() {
        info!(query_id = %query_id, "no postings to analyze, producing empty summary");
        return Ok(MarketSummary::empty(
            query_id,
            "No job postings met the search filters.",
        ));
    }

    let user = prompts::format_analyze_user(posts);

    match attempt(completion, query_id, &user).await {
        Ok(summary) => Ok(summary),
        Err(first) => {
            warn!(query_id = %query_id, error = %first, "analysis attempt failed, retrying once");
            attempt(completion, query_id, &user).await
        }
    }
}

async fn attempt(
    completion: &dyn CompletionGateway,
    query_id: Uuid,
    user: &str,
) -> GatewayResult<MarketSummary> {
    let raw = completion
        .complete_structured(
            prompts::ANALYZE_SYSTEM_PROMPT,
            user,
            prompts::analyze_response_schema(),
        )
        .await?;

    // A summary is never promoted from an unparseable response.
    let parsed: AnalyzeResponse = serde_json::from_str(prompts::strip_code_fences(&raw))
        .map_err(|e| GatewayError::MalformedResponse {
            provider: "openai",
            reason: e.to_string(),
        })?;

    Ok(MarketSummary::new(
        query_id,
        parsed.top_skills,
        parsed.top_tech_stacks,
        parsed.summary_text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletionGateway;

    fn posts(query_id: Uuid) -> Vec<JobPost> {
        vec![JobPost::new(
            query_id,
            "Backend Engineer",
            "Acme",
            "Remote",
            "https://acme.com/apply",
            "https://acme.com/jobs/1",
        )]
    }

    #[tokio::test]
    async fn test_empty_posts_yield_empty_summary_without_calls() {
        let completion = MockCompletionGateway::new();
        let id = Uuid::new_v4();

        let summary = analyze(&completion, id, &[]).await.unwrap();
        assert!(summary.top_skills.is_empty());
        assert!(summary.summary_text.contains("No job postings"));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let completion = MockCompletionGateway::new().with_response(
            "job_posts",
            r#"{"top_skills": ["Rust", "SQL"], "top_tech_stacks": ["AWS"],
                "summary_text": "Healthy demand."}"#,
        );
        let id = Uuid::new_v4();

        let summary = analyze(&completion, id, &posts(id)).await.unwrap();
        assert_eq!(summary.top_skills, vec!["Rust", "SQL"]);
        assert_eq!(summary.summary_text, "Healthy demand.");
        assert_eq!(completion.calls(), 1);
    }

    #[tokio::test]
    async fn test_one_retry_then_success() {
        let completion = MockCompletionGateway::new()
            .failing_calls(1)
            .with_response(
                "job_posts",
                r#"{"top_skills": ["Go"], "top_tech_stacks": [], "summary_text": "ok"}"#,
            );
        let id = Uuid::new_v4();

        let summary = analyze(&completion, id, &posts(id)).await.unwrap();
        assert_eq!(summary.top_skills, vec!["Go"]);
        assert_eq!(completion.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_after_retry_is_surfaced() {
        let completion = MockCompletionGateway::new().failing_calls(2);
        let id = Uuid::new_v4();

        let result = analyze(&completion, id, &posts(id)).await;
        assert!(result.is_err());
        assert_eq!(completion.calls(), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_consumes_the_retry() {
        let completion = MockCompletionGateway::new().with_response("job_posts", "not json");
        let id = Uuid::new_v4();

        let result = analyze(&completion, id, &posts(id)).await;
        assert!(matches!(
            result,
            Err(GatewayError::MalformedResponse { .. })
        ));
        assert_eq!(completion.calls(), 2);
    }
}
