//! Service layer for the graph store.
//! - `graph` holds name validation, request/response models and `GraphService`.
//! - `storage` holds the storage port and its file/in-memory adapters.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod storage;
pub mod graph;
