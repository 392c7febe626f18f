//! Domain types for the job intel agent.

pub mod directive;
pub mod job;
pub mod page;
pub mod query;
pub mod request;
pub mod summary;
