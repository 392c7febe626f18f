//! Storage implementations for the query record store.

pub mod memory;

pub use memory::MemoryStore;
