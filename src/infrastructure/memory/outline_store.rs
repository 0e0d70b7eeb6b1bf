//! In-Memory Outline Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{OutlineStorePort, StoreError};
use crate::domain::outline::OutlineData;

/// 内存大纲存储
#[derive(Debug, Default)]
pub struct InMemoryOutlineStore {
    /// thread_id -> OutlineData
    outlines: DashMap<String, OutlineData>,
}

impl InMemoryOutlineStore {
    pub fn new() -> Self {
        Self {
            outlines: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

#[async_trait]
impl OutlineStorePort for InMemoryOutlineStore {
    async fn save(&self, thread_id: &str, outline: &OutlineData) -> Result<(), StoreError> {
        if thread_id.is_empty() {
            return Err(StoreError::InvalidKey("empty thread_id".to_string()));
        }
        self.outlines.insert(thread_id.to_string(), outline.clone());

        tracing::debug!(thread_id = %thread_id, "Outline stored in memory");
        Ok(())
    }

    async fn find(&self, thread_id: &str) -> Result<Option<OutlineData>, StoreError> {
        Ok(self.outlines.get(thread_id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, thread_id: &str) -> Result<bool, StoreError> {
        Ok(self.outlines.remove(thread_id).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.outlines.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::OutlineBuilder;

    #[tokio::test]
    async fn test_save_find_delete() {
        let store = InMemoryOutlineStore::new();
        let outline = OutlineBuilder::new("p1").content("# 大纲").build();

        store.save("t1", &outline).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("t1").await.unwrap(), Some(outline));

        assert!(store.delete("t1").await.unwrap());
        assert!(!store.delete("t1").await.unwrap());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = InMemoryOutlineStore::new();
        store.save("t1", &OutlineBuilder::new("a").build()).await.unwrap();
        store.save("t1", &OutlineBuilder::new("b").build()).await.unwrap();

        let outline = store.find("t1").await.unwrap().unwrap();
        assert_eq!(outline.project_id(), "b");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let store = InMemoryOutlineStore::new();
        for key in ["c", "a", "b"] {
            store.save(key, &OutlineBuilder::new("p").build()).await.unwrap();
        }

        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_rejects_empty_key() {
        let store = InMemoryOutlineStore::new();
        let result = store.save("", &OutlineBuilder::new("p").build()).await;

        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
