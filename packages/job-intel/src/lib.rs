//! Job market intelligence agent.
//!
//! Turns a natural-language job-search request into a verified list of
//! open job postings plus a market summary. The core is a stateful
//! workflow (plan, search, refine in a bounded retry loop, parse,
//! analyze) driven by [`WorkflowEngine`] and observed through the
//! asynchronous polling contract of [`JobIntel`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_intel::{AgentConfig, JobIntel, SearchRequest, ExperienceLevel, TimeFilter};
//!
//! let config = AgentConfig::from_env()?;
//! let agent = JobIntel::from_config(&config);
//!
//! let id = agent.submit(
//!     SearchRequest::new("Backend Engineer", ExperienceLevel::Mid)
//!         .with_location("Remote")
//!         .with_time_filter(TimeFilter::Past7d),
//! ).await?;
//!
//! // Poll until terminal
//! let report = agent.status(id).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Gateway and store abstractions
//! - [`types`] - Domain types and the status state machine
//! - [`workflow`] - The five stages and the engine
//! - [`gateways`] - Tavily and OpenAI implementations
//! - [`stores`] - Store implementations
//! - [`testing`] - Scripted mocks for tests

pub mod config;
pub mod error;
pub mod gateways;
pub mod security;
pub mod service;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod workflow;

// Re-export core types at crate root
pub use config::{AgentConfig, WorkflowLimits};
pub use error::{AgentError, GatewayError, StoreError};
pub use service::{JobIntel, StatusReport};
pub use traits::{
    completion::CompletionGateway,
    search::SearchGateway,
    store::QueryStore,
};
pub use types::{
    directive::SearchDirective,
    job::JobPost,
    page::CandidatePage,
    query::{QueryStatus, SearchQuery},
    request::{ExperienceLevel, SearchRequest, TimeFilter},
    summary::MarketSummary,
};

// Re-export implementations
pub use gateways::{OpenAiCompletion, TavilySearch};
pub use stores::MemoryStore;
pub use workflow::WorkflowEngine;
