//! The workflow: five stages and the engine that sequences them.
//!
//! Control flow is `planner -> searcher -> refiner -> (searcher |
//! parser) -> analyzer -> persistence`, with the refiner's bounded
//! feedback edge as the single cycle.

pub mod analyzer;
pub mod engine;
pub mod parser;
pub mod planner;
pub mod prompts;
pub mod refiner;
pub mod searcher;

pub use engine::WorkflowEngine;
pub use refiner::RefinerDecision;
