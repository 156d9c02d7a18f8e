//! Storage abstractions for the service layer
//!
//! A collection is persisted as one JSON document keyed by name. Backends
//! only move bytes (`DocumentStore`); `JsonStorage` adds the typed
//! serialize/deserialize step on top of whichever backend is injected.
//!
//! Nothing here locks across a read-modify-write cycle: two callers that
//! `get` before either `save`s will lose one update.

pub mod document_store;
pub mod file_store;
pub mod json_storage;
pub mod memory_store;

pub use document_store::DocumentStore;
pub use file_store::FileDocumentStore;
pub use json_storage::JsonStorage;
pub use memory_store::MemoryDocumentStore;
