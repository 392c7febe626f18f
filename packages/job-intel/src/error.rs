//! Typed errors for the job intel agent.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::types::query::QueryStatus;

/// Errors that can occur when talking to an external gateway
/// (search provider or completion service).
///
/// These are the transient upstream failures: a stage either retries
/// them per its own policy or escalates them to the workflow engine.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport failure (connect error, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The provider answered with a non-success status
    #[error("{provider} API error: {status}")]
    BadStatus { provider: &'static str, status: u16 },

    /// The provider answered but the body could not be decoded
    #[error("malformed {provider} response: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    /// The completion service returned no choices
    #[error("empty completion response")]
    EmptyCompletion,
}

impl GatewayError {
    pub(crate) fn http(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Errors from the query record store.
///
/// Persistence failures are always fatal to a workflow: the status
/// record cannot be trusted once a write has failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the given query id
    #[error("search query not found: {id}")]
    QueryNotFound { id: uuid::Uuid },

    /// Backend write/read failure
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Umbrella error for the service layer.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Gateway call failed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A submitted request failed validation
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Market analysis failed after its permitted retry
    #[error("analysis failed: {0}")]
    Analysis(#[source] GatewayError),

    /// The engine attempted a status move the state machine forbids
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition { from: QueryStatus, to: QueryStatus },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// JSON handling error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
