//! Core trait abstractions: search gateway, completion gateway, query store.

pub mod completion;
pub mod search;
pub mod store;
