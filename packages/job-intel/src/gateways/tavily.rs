//! Tavily-backed search gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};
use crate::security::SecretString;
use crate::traits::search::SearchGateway;
use crate::types::{directive::SearchDirective, page::CandidatePage};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Tavily search request.
#[derive(Debug, Serialize)]
struct TavilyRequest {
    query: String,
    search_depth: String,
    max_results: usize,
    include_raw_content: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
}

/// Tavily search response.
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

/// A single Tavily search result.
#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    title: Option<String>,
    content: Option<String>,
    raw_content: Option<String>,
}

/// Search gateway backed by the Tavily API.
pub struct TavilySearch {
    client: reqwest::Client,
    api_key: SecretString,
    search_depth: String,
    timeout: Duration,
}

impl TavilySearch {
    /// Create a new Tavily gateway with a per-call timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: SecretString::new(api_key),
            search_depth: "advanced".to_string(),
            timeout,
        }
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

#[async_trait]
impl SearchGateway for TavilySearch {
    async fn search(
        &self,
        directive: &SearchDirective,
        max_results: usize,
    ) -> GatewayResult<Vec<CandidatePage>> {
        let request = TavilyRequest {
            query: directive.query.clone(),
            search_depth: self.search_depth.clone(),
            max_results,
            include_raw_content: true,
            include_domains: directive.include_domains.clone(),
            days: directive.window_days,
        };

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::http)?;

        if !response.status().is_success() {
            return Err(GatewayError::BadStatus {
                provider: "tavily",
                status: response.status().as_u16(),
            });
        }

        let tavily_response: TavilyResponse =
            response
                .json()
                .await
                .map_err(|e| GatewayError::MalformedResponse {
                    provider: "tavily",
                    reason: e.to_string(),
                })?;

        // Provider ranking order preserved; results without content
        // carry nothing for the parser and are dropped here.
        Ok(tavily_response
            .results
            .into_iter()
            .filter_map(|r| {
                let content = r.raw_content.or(r.content).filter(|c| !c.is_empty())?;
                let mut page = CandidatePage::new(r.url, content);
                if let Some(title) = r.title {
                    page = page.with_title(title);
                }
                Some(page)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_scoping() {
        let request = TavilyRequest {
            query: "backend engineer".to_string(),
            search_depth: "advanced".to_string(),
            max_results: 10,
            include_raw_content: true,
            include_domains: vec![],
            days: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("include_domains").is_none());
        assert!(json.get("days").is_none());
    }

    #[test]
    fn test_request_carries_scoping_when_set() {
        let request = TavilyRequest {
            query: "backend engineer".to_string(),
            search_depth: "advanced".to_string(),
            max_results: 10,
            include_raw_content: true,
            include_domains: vec!["greenhouse.io".to_string()],
            days: Some(7),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["include_domains"][0], "greenhouse.io");
        assert_eq!(json["days"], 7);
    }

    #[test]
    fn test_result_without_content_is_dropped() {
        let raw = r#"{"results": [
            {"url": "https://a.com", "title": "A", "raw_content": "job text"},
            {"url": "https://b.com", "title": "B"}
        ]}"#;
        let parsed: TavilyResponse = serde_json::from_str(raw).unwrap();
        let pages: Vec<_> = parsed
            .results
            .into_iter()
            .filter_map(|r| {
                let content = r.raw_content.or(r.content).filter(|c| !c.is_empty())?;
                Some(CandidatePage::new(r.url, content))
            })
            .collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].url, "https://a.com");
    }
}
