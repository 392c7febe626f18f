//! Gateway implementations for the external collaborators.

pub mod openai;
pub mod tavily;

pub use openai::OpenAiCompletion;
pub use tavily::TavilySearch;
