//! Parser stage: per-page classification and extraction.
//!
//! Pages are evaluated concurrently and independently; one malformed
//! completion never aborts the batch, and the order in which pages
//! finish does not affect the final post set.

use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::WorkflowLimits;
use crate::traits::completion::CompletionGateway;
use crate::types::{job::JobPost, page::CandidatePage};
use crate::workflow::prompts;

/// Completion response shape for one page.
#[derive(Debug, Deserialize)]
struct ParseResponse {
    classification: Classification,
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    apply_url: Option<String>,
    posted_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Classification {
    JobPosting,
    Listing,
    Closed,
}

/// Outcome of one page evaluation.
enum PageVerdict {
    /// A single active posting with the required fields
    Valid(JobPost),
    /// Not a single active posting; dropped silently
    Rejected,
    /// Gateway failure or unparseable completion; dropped, but noted
    Errored(String),
}

/// Result of parsing one batch of candidate pages.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Validated job posts (page order not guaranteed or meaningful)
    pub posts: Vec<JobPost>,

    /// Diagnostic notes for pages that errored
    pub error_notes: Vec<String>,
}

/// Evaluate all candidate pages concurrently.
pub async fn parse_pages(
    completion: &dyn CompletionGateway,
    query_id: Uuid,
    pages: &[CandidatePage],
    limits: &WorkflowLimits,
) -> ParseOutcome {
    let verdicts = join_all(
        pages
            .iter()
            .map(|page| evaluate_page(completion, query_id, page, limits)),
    )
    .await;

    let mut outcome = ParseOutcome::default();
    for verdict in verdicts {
        match verdict {
            PageVerdict::Valid(post) => outcome.posts.push(post),
            PageVerdict::Rejected => {}
            PageVerdict::Errored(note) => outcome.error_notes.push(note),
        }
    }

    debug!(
        valid = outcome.posts.len(),
        errored = outcome.error_notes.len(),
        total = pages.len(),
        "parsed candidate batch"
    );
    outcome
}

/// Classify one page and, if it is a single active posting, extract a
/// job post from it.
async fn evaluate_page(
    completion: &dyn CompletionGateway,
    query_id: Uuid,
    page: &CandidatePage,
    limits: &WorkflowLimits,
) -> PageVerdict {
    let content = page.truncated_content(limits.max_page_chars);
    if content.trim().is_empty() {
        return PageVerdict::Rejected;
    }

    let user = prompts::format_parse_user(page, content);
    let raw = match completion
        .complete_structured(
            prompts::PARSE_SYSTEM_PROMPT,
            &user,
            prompts::parse_response_schema(),
        )
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!(url = %page.url, error = %e, "completion call failed for page");
            return PageVerdict::Errored(format!("parse_error: {}: {e}", page.url));
        }
    };

    // Untrusted model output: schema-validate before promotion.
    let parsed: ParseResponse = match serde_json::from_str(prompts::strip_code_fences(&raw)) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(url = %page.url, error = %e, "unparseable completion response");
            return PageVerdict::Errored(format!("parse_error: {}: {e}", page.url));
        }
    };

    promote(parsed, query_id, page)
}

/// Promote a schema-valid response to a job post, or reject it.
fn promote(parsed: ParseResponse, query_id: Uuid, page: &CandidatePage) -> PageVerdict {
    if parsed.classification != Classification::JobPosting {
        return PageVerdict::Rejected;
    }

    let (Some(title), Some(company)) = (parsed.title, parsed.company) else {
        return PageVerdict::Rejected;
    };
    if title.trim().is_empty() || company.trim().is_empty() {
        return PageVerdict::Rejected;
    }

    // A posting without a usable extracted apply link still has one
    // usable link: the page itself. Extracted links are model output
    // and must actually parse as absolute URLs.
    let apply_url = parsed
        .apply_url
        .filter(|u| url::Url::parse(u).is_ok())
        .unwrap_or_else(|| page.url.clone());

    let mut post = JobPost::new(
        query_id,
        title,
        company,
        parsed.location.unwrap_or_default(),
        apply_url,
        &page.url,
    );
    if let Some(date) = parsed.posted_date.filter(|d| !d.trim().is_empty()) {
        post = post.with_posted_date(date);
    }
    PageVerdict::Valid(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletionGateway;

    fn page(url: &str) -> CandidatePage {
        CandidatePage::new(url, format!("content of {url}"))
    }

    fn valid_response(title: &str) -> String {
        format!(
            r#"{{"classification": "job_posting", "title": "{title}", "company": "Acme",
                "location": "Remote", "apply_url": "https://acme.com/apply",
                "posted_date": null}}"#
        )
    }

    #[tokio::test]
    async fn test_valid_pages_become_posts() {
        let completion = MockCompletionGateway::new()
            .with_response("https://a.com", valid_response("Role A"))
            .with_response("https://b.com", valid_response("Role B"));

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://a.com"), page("https://b.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert_eq!(outcome.posts.len(), 2);
        assert!(outcome.error_notes.is_empty());
    }

    #[tokio::test]
    async fn test_listing_and_closed_are_silent_rejections() {
        let completion = MockCompletionGateway::new()
            .with_response(
                "https://a.com",
                r#"{"classification": "listing", "title": null, "company": null,
                    "location": null, "apply_url": null, "posted_date": null}"#,
            )
            .with_response(
                "https://b.com",
                r#"{"classification": "closed", "title": "Old Role", "company": "Acme",
                    "location": null, "apply_url": null, "posted_date": null}"#,
            );

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://a.com"), page("https://b.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert!(outcome.posts.is_empty());
        assert!(outcome.error_notes.is_empty());
    }

    #[tokio::test]
    async fn test_one_bad_page_never_aborts_the_batch() {
        let completion = MockCompletionGateway::new()
            .with_response("https://good.com", valid_response("Good Role"))
            .with_response("https://bad.com", "this is not json at all");

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://bad.com"), page("https://good.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(outcome.posts[0].title, "Good Role");
        assert_eq!(outcome.error_notes.len(), 1);
        assert!(outcome.error_notes[0].contains("https://bad.com"));
    }

    #[tokio::test]
    async fn test_missing_apply_url_falls_back_to_page_url() {
        let completion = MockCompletionGateway::new().with_response(
            "https://a.com",
            r#"{"classification": "job_posting", "title": "Role", "company": "Acme",
                "location": null, "apply_url": null, "posted_date": "2026-08-01"}"#,
        );

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://a.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(outcome.posts[0].apply_url, "https://a.com");
        assert_eq!(outcome.posts[0].posted_date.as_deref(), Some("2026-08-01"));
    }

    #[tokio::test]
    async fn test_relative_apply_url_falls_back_to_page_url() {
        let completion = MockCompletionGateway::new().with_response(
            "https://a.com",
            r#"{"classification": "job_posting", "title": "Role", "company": "Acme",
                "location": null, "apply_url": "/careers/apply", "posted_date": null}"#,
        );

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://a.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(outcome.posts[0].apply_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted() {
        let completion = MockCompletionGateway::new().with_response(
            "https://a.com",
            format!("```json\n{}\n```", valid_response("Fenced Role")),
        );

        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[page("https://a.com")],
            &WorkflowLimits::default(),
        )
        .await;

        assert_eq!(outcome.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_content_skips_the_completion_call() {
        let completion = MockCompletionGateway::new();
        let outcome = parse_pages(
            &completion,
            Uuid::new_v4(),
            &[CandidatePage::new("https://a.com", "   ")],
            &WorkflowLimits::default(),
        )
        .await;

        assert!(outcome.posts.is_empty());
        assert_eq!(completion.calls(), 0);
    }
}
