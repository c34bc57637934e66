//! Storage abstractions for the graph service
//!
//! `GraphStorage` is the port the service talks to; `fs_store` keeps one
//! JSON file per graph in a directory and `memory_store` keeps everything in
//! a map for tests and embedding.

pub mod port;
pub mod fs_store;
pub mod memory_store;

pub use fs_store::FileGraphStorage;
pub use memory_store::MemoryGraphStorage;
pub use port::GraphStorage;
