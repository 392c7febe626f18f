//! LLM prompts and response schemas for the parser and analyzer stages.

use crate::types::{job::JobPost, page::CandidatePage};

/// System prompt for classifying and extracting a candidate page.
pub const PARSE_SYSTEM_PROMPT: &str = r#"You are an expert job description analyst. Analyze the page and determine:
1. Is this a single, specific job posting? (not a list of jobs, an article, or a repository)
2. Is the posting still accepting applications? Look for phrases like "no longer accepting", "position filled", or "closed".

Classify the page as exactly one of:
- "job_posting" - a single job posting that is still active
- "listing" - a list of jobs, an article, or anything that is not one posting
- "closed" - a single posting that is no longer accepting applications

If and only if the classification is "job_posting", also extract the role title, the hiring company, the location, the application URL, and the posting date if the page states one. Use null for anything the page does not state."#;

/// System prompt for the aggregate market analysis.
pub const ANALYZE_SYSTEM_PROMPT: &str = r#"Analyze the following job postings and identify the top skills and top technical stacks in demand, ordered most-frequent first, and write a concise market summary.

Only report skills and stacks that actually appear in the postings."#;

/// User prompt for one candidate page.
pub fn format_parse_user(page: &CandidatePage, content: &str) -> String {
    format!(
        "URL: {}\nTITLE: {}\nCONTENT:\n{}",
        page.url,
        page.title.as_deref().unwrap_or("(none)"),
        content
    )
}

/// User prompt for the analyzer: all posts as one JSON document.
pub fn format_analyze_user(posts: &[JobPost]) -> String {
    let postings: Vec<_> = posts
        .iter()
        .map(|p| {
            serde_json::json!({
                "title": p.title,
                "company": p.company,
                "location": p.location,
                "posted_date": p.posted_date,
            })
        })
        .collect();
    serde_json::json!({ "job_posts": postings }).to_string()
}

/// JSON schema for the parser response (OpenAI strict mode shape:
/// every property listed in `required`, optionality via null types).
pub fn parse_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "classification": {
                "type": "string",
                "enum": ["job_posting", "listing", "closed"]
            },
            "title": { "type": ["string", "null"] },
            "company": { "type": ["string", "null"] },
            "location": { "type": ["string", "null"] },
            "apply_url": { "type": ["string", "null"] },
            "posted_date": { "type": ["string", "null"] }
        },
        "required": ["classification", "title", "company", "location", "apply_url", "posted_date"],
        "additionalProperties": false
    })
}

/// JSON schema for the analyzer response.
pub fn analyze_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "top_skills": { "type": "array", "items": { "type": "string" } },
            "top_tech_stacks": { "type": "array", "items": { "type": "string" } },
            "summary_text": { "type": "string" }
        },
        "required": ["top_skills", "top_tech_stacks", "summary_text"],
        "additionalProperties": false
    })
}

/// Strip a markdown code fence from a model response, if present.
///
/// Completion responses are untrusted input; some models wrap JSON in
/// ```json fences even when asked not to.
pub(crate) fn strip_code_fences(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_user_includes_url_and_content() {
        let page = CandidatePage::new("https://example.com/job", "body text").with_title("Role");
        let user = format_parse_user(&page, "body text");
        assert!(user.contains("https://example.com/job"));
        assert!(user.contains("Role"));
        assert!(user.contains("body text"));
    }

    #[test]
    fn test_analyze_user_is_valid_json() {
        let posts = vec![JobPost::new(
            Uuid::new_v4(),
            "Backend Engineer",
            "Acme",
            "Remote",
            "https://acme.com/apply",
            "https://acme.com/jobs/1",
        )];
        let user = format_analyze_user(&posts);
        let value: serde_json::Value = serde_json::from_str(&user).unwrap();
        assert_eq!(value["job_posts"][0]["company"], "Acme");
    }
}
