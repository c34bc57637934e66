use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::graph::name::GraphName;
use crate::storage::port::GraphStorage;

/// In-memory `GraphStorage`; contents vanish with the process.
#[derive(Default)]
pub struct MemoryGraphStorage {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryGraphStorage {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl GraphStorage for MemoryGraphStorage {
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.keys().cloned().collect())
    }

    async fn read(&self, key: &GraphName) -> Result<Option<Vec<u8>>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(key.as_str()).cloned())
    }

    async fn write(&self, key: &GraphName, bytes: &[u8]) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key.as_str().to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &GraphName) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(key.as_str()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_basic_crud() -> Result<(), anyhow::Error> {
        let store = MemoryGraphStorage::new();
        let a = GraphName::parse("a")?;

        assert!(store.list_keys().await?.is_empty());
        assert_eq!(store.read(&a).await?, None);

        store.write(&a, b"1").await?;
        store.write(&a, b"2").await?;
        assert_eq!(store.read(&a).await?, Some(b"2".to_vec()));
        assert_eq!(store.list_keys().await?, vec!["a".to_string()]);

        assert!(store.remove(&a).await?);
        assert!(!store.remove(&a).await?);
        Ok(())
    }
}
