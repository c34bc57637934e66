use crate::errors::ServiceError;
use crate::graph::name::GraphName;
use async_trait::async_trait;

/// Trait abstraction for graph document storage, keyed by validated name.
/// Implementations can be directory-backed, in-memory, or remote.
///
/// Values are opaque bytes; (de)serialization happens in `GraphService`.
/// There is no cross-call locking: concurrent writes to one key are
/// last-writer-wins, but a single `write` must replace the value whole.
#[async_trait]
pub trait GraphStorage: Send + Sync {
    /// Names of every stored document, in no particular order.
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError>;
    /// `Ok(None)` when nothing is stored under `key`.
    async fn read(&self, key: &GraphName) -> Result<Option<Vec<u8>>, ServiceError>;
    async fn write(&self, key: &GraphName, bytes: &[u8]) -> Result<(), ServiceError>;
    /// Returns whether an entry existed.
    async fn remove(&self, key: &GraphName) -> Result<bool, ServiceError>;
}
