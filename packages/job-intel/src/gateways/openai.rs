//! OpenAI implementation of the completion gateway.
//!
//! Uses the chat-completions endpoint; structured output goes through
//! OpenAI's `json_schema` response_format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};
use crate::security::SecretString;
use crate::traits::completion::CompletionGateway;

/// Completion gateway backed by OpenAI chat completions.
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiCompletion {
    /// Create a new OpenAI gateway.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: SecretString::new(api_key),
            model: model.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout,
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, body: serde_json::Value) -> GatewayResult<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::http)?;

        if !response.status().is_success() {
            return Err(GatewayError::BadStatus {
                provider: "openai",
                status: response.status().as_u16(),
            });
        }

        let chat_response: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| GatewayError::MalformedResponse {
                    provider: "openai",
                    reason: e.to_string(),
                })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GatewayError::EmptyCompletion)
    }

    fn messages(system: &str, user: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user.to_string(),
            },
        ]
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletion {
    async fn complete(&self, system: &str, user: &str) -> GatewayResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": Self::messages(system, user),
            "temperature": 0.0,
        });
        self.chat(body).await
    }

    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> GatewayResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": Self::messages(system, user),
            "temperature": 0.0,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "structured_response",
                    "strict": true,
                    "schema": schema,
                }
            }
        });
        self.chat(body).await
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let gateway = OpenAiCompletion::new("sk-test", "gpt-4o-mini", Duration::from_secs(30))
            .with_base_url("https://custom.api.com/v1");

        assert_eq!(gateway.model(), "gpt-4o-mini");
        assert_eq!(gateway.base_url, "https://custom.api.com/v1");
    }

    #[test]
    fn test_response_decoding() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "hello"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }
}
