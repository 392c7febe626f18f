//! Completion gateway trait for LLM operations.
//!
//! Wraps the external completion service. The gateway has no retry
//! policy of its own; the parser and analyzer stages own retries.

use async_trait::async_trait;

use crate::error::GatewayResult;

/// LLM completion abstraction.
///
/// # Implementations
///
/// - `OpenAiCompletion` - OpenAI chat completions
/// - `MockCompletionGateway` - for testing (scripted responses)
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Plain text completion for a system + user prompt pair.
    async fn complete(&self, system: &str, user: &str) -> GatewayResult<String>;

    /// Completion constrained to a JSON shape.
    ///
    /// `schema` is a JSON Schema value; providers that support native
    /// structured output should enforce it, others may fall back to
    /// prompting. The returned string is still untrusted input and
    /// must be schema-validated by the caller before promotion to a
    /// domain record.
    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> GatewayResult<String> {
        let _ = schema;
        self.complete(system, user).await
    }
}
