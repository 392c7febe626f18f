//! Process-wide configuration.
//!
//! Loaded once at startup into an immutable structure and passed
//! explicitly into gateway and engine constructors; stage logic never
//! reads the environment on its own.

use std::time::Duration;

use crate::error::{AgentError, Result};
use crate::security::SecretString;

/// Tunables for a single workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowLimits {
    /// Maximum candidate pages taken from one search call.
    ///
    /// Caps downstream LLM cost. Default: 12.
    pub max_results: usize,

    /// Minimum candidate count before the refiner stops broadening.
    ///
    /// Below this, the refiner signals a retry (if any remain).
    /// Default: 3.
    pub min_candidates: usize,

    /// Hard cap on refiner-triggered search retries.
    ///
    /// Guarantees the search loop terminates even if the provider
    /// returns nothing usable. Default: 2.
    pub max_search_retries: u32,

    /// Page content is truncated to this many characters before being
    /// handed to the completion service. Default: 15_000.
    pub max_page_chars: usize,

    /// Per-call timeout for gateway HTTP requests. Default: 30s.
    pub request_timeout: Duration,
}

impl Default for WorkflowLimits {
    fn default() -> Self {
        Self {
            max_results: 12,
            min_candidates: 3,
            max_search_retries: 2,
            max_page_chars: 15_000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl WorkflowLimits {
    /// Create limits with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search result cap.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set the minimum candidate threshold.
    pub fn with_min_candidates(mut self, min: usize) -> Self {
        self.min_candidates = min;
        self
    }

    /// Set the search retry bound.
    pub fn with_max_search_retries(mut self, max: u32) -> Self {
        self.max_search_retries = max;
        self
    }

    /// Set the page content truncation cap.
    pub fn with_max_page_chars(mut self, max: usize) -> Self {
        self.max_page_chars = max;
        self
    }

    /// Set the per-call gateway timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Immutable agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Tavily API key (secret)
    pub tavily_api_key: SecretString,

    /// OpenAI API key (secret)
    pub openai_api_key: SecretString,

    /// Chat model used for parsing and analysis
    pub model: String,

    /// OpenAI-compatible base URL (for Azure, proxies, etc.)
    pub openai_base_url: String,

    /// Workflow tunables
    pub limits: WorkflowLimits,
}

impl AgentConfig {
    /// Create a config from the two required API keys.
    pub fn new(tavily_api_key: impl Into<String>, openai_api_key: impl Into<String>) -> Self {
        Self {
            tavily_api_key: SecretString::new(tavily_api_key),
            openai_api_key: SecretString::new(openai_api_key),
            model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            limits: WorkflowLimits::default(),
        }
    }

    /// Load from `TAVILY_API_KEY`, `OPENAI_API_KEY` and optional
    /// `OPENAI_MODEL` environment variables.
    pub fn from_env() -> Result<Self> {
        let tavily = std::env::var("TAVILY_API_KEY")
            .map_err(|_| AgentError::Config("TAVILY_API_KEY not set".into()))?;
        let openai = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AgentError::Config("OPENAI_API_KEY not set".into()))?;

        let mut config = Self::new(tavily, openai);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom OpenAI-compatible base URL.
    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    /// Set the workflow limits.
    pub fn with_limits(mut self, limits: WorkflowLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults() {
        let limits = WorkflowLimits::default();
        assert_eq!(limits.min_candidates, 3);
        assert_eq!(limits.max_search_retries, 2);
        assert_eq!(limits.max_page_chars, 15_000);
    }

    #[test]
    fn test_config_builder() {
        let config = AgentConfig::new("tvly-key", "sk-key")
            .with_model("gpt-4o")
            .with_limits(WorkflowLimits::new().with_max_results(5));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.limits.max_results, 5);
    }

    #[test]
    fn test_keys_redacted_in_debug() {
        let config = AgentConfig::new("tvly-key", "sk-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("tvly-key"));
        assert!(!debug.contains("sk-key"));
    }
}
