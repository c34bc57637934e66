use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::graph::document::{GraphDocument, SaveGraphInput};
use crate::graph::name::GraphName;
use crate::storage::port::GraphStorage;

/// Graph document operations on top of an injected `GraphStorage`.
///
/// Every call is a single independent read or write; failures are returned
/// immediately without retries.
#[derive(Clone)]
pub struct GraphService {
    storage: Arc<dyn GraphStorage>,
}

impl GraphService {
    pub fn new(storage: Arc<dyn GraphStorage>) -> Self { Self { storage } }

    /// Names of all stored graphs, sorted.
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        let mut names = self.storage.list_keys().await?;
        names.sort();
        names.dedup();
        debug!(count = names.len(), "graphs listed");
        Ok(names)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<GraphDocument, ServiceError> {
        let key = GraphName::parse(name)?;
        let bytes = self
            .storage
            .read(&key)
            .await?
            .ok_or_else(|| ServiceError::not_found(key.as_str()))?;
        let data: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::StorageRead(format!("graph \"{key}\" is not valid JSON: {e}")))?;
        Ok(GraphDocument { name: key.into_inner(), data })
    }

    /// Create or fully replace a graph. Returns the stored name.
    pub async fn save(&self, input: SaveGraphInput) -> Result<GraphName, ServiceError> {
        let (key, data) = input.validate()?;
        let bytes = serde_json::to_vec_pretty(&data).map_err(|e| ServiceError::Serialization(e.to_string()))?;
        self.storage.write(&key, &bytes).await?;
        info!(name = %key, len = bytes.len(), "graph saved");
        Ok(key)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<GraphName, ServiceError> {
        let key = GraphName::parse(name)?;
        if !self.storage.remove(&key).await? {
            return Err(ServiceError::not_found(key.as_str()));
        }
        info!(name = %key, "graph deleted");
        Ok(key)
    }
}
